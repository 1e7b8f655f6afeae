//! Invariants for the SCC tracer.
//!
//! Components are checked against a transitive-closure oracle: two nodes share
//! a component iff each reaches the other along forward edges. Traces are
//! checked for determinism and for the documented frame ordering.

use proptest::prelude::*;
use stepscope_core::io::to_cbor;
use stepscope_core::Replay;
use stepscope_scc::generator::random_graph;
use stepscope_scc::kosaraju::components_of;
use stepscope_scc::{decompose, decompose_graph, Graph, NodeId, Pass, Phase, SccStep};

/// `reach[a][b]` iff `b` is reachable from `a` (reflexive).
fn closure(g: &Graph) -> Vec<Vec<bool>> {
    let n = g.node_count();
    let mut reach = vec![vec![false; n]; n];
    for (a, row) in reach.iter_mut().enumerate() {
        row[a] = true;
        let mut todo = vec![a];
        while let Some(v) = todo.pop() {
            for &w in g.successors(v) {
                if !row[w] {
                    row[w] = true;
                    todo.push(w);
                }
            }
        }
    }
    reach
}

/// Panics unless `components` partitions the nodes into mutual-reachability classes.
#[track_caller]
fn assert_scc_partition(g: &Graph, components: &[Vec<NodeId>]) {
    let n = g.node_count();
    let mut owner = vec![usize::MAX; n];
    for (ci, comp) in components.iter().enumerate() {
        assert!(!comp.is_empty(), "component {ci} is empty");
        for &v in comp {
            assert_eq!(owner[v], usize::MAX, "node {v} appears twice");
            owner[v] = ci;
        }
    }
    assert!(owner.iter().all(|&o| o != usize::MAX), "some node is uncovered");

    let reach = closure(g);
    for a in 0..n {
        for b in 0..n {
            let mutual = reach[a][b] && reach[b][a];
            assert_eq!(
                owner[a] == owner[b],
                mutual,
                "nodes {a} and {b}: same component = {}, mutually reachable = {mutual}",
                owner[a] == owner[b]
            );
        }
    }
}

fn graph(n: usize, edges: &[(NodeId, NodeId)]) -> Graph {
    Graph::new((0..n).map(|i| format!("v{i}")), edges.iter().copied()).unwrap()
}

#[test]
fn scenario_two_triangles() {
    let labels = ["A", "B", "C", "D", "E", "F"];
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)];
    let t = decompose(labels, edges).unwrap();
    let comps = components_of(&t);
    assert_eq!(comps.len(), 2);
    let g = Graph::new(labels, edges).unwrap();
    assert_scc_partition(&g, comps);
    let named: Vec<String> = comps.iter().map(|c| g.show(c)).collect();
    assert_eq!(named, vec!["{A, C, B}", "{D, F, E}"]);
}

#[test]
fn cyclic_graph_is_one_component() {
    let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
    let t = decompose_graph(&g);
    assert_eq!(components_of(&t).len(), 1);
    assert_scc_partition(&g, components_of(&t));
}

#[test]
fn acyclic_graph_is_all_singletons() {
    let g = graph(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]);
    let t = decompose_graph(&g);
    let comps = components_of(&t);
    assert_eq!(comps.len(), 5);
    assert_scc_partition(&g, comps);
    // Reverse finish order of a DAG is a topological order.
    assert_eq!(t.last().state.order, vec![0, 2, 1, 3, 4]);
}

#[test]
fn no_edges_gives_singletons_in_reverse_finish_order() {
    let g = graph(4, &[]);
    let t = decompose_graph(&g);

    let forward_visits: Vec<NodeId> = t
        .iter()
        .filter_map(|f| match f.kind {
            SccStep::Visit {
                node,
                pass: Pass::Forward,
            } => Some(node),
            _ => None,
        })
        .collect();
    assert_eq!(forward_visits, vec![0, 1, 2, 3]);

    let last = &t.last().state;
    assert_eq!(last.finish_order, vec![0, 1, 2, 3]);
    assert_eq!(last.order, vec![3, 2, 1, 0]);
    assert_eq!(
        components_of(&t),
        &[vec![3], vec![2], vec![1], vec![0]]
    );
    assert_eq!(t.count(|k| matches!(k, SccStep::Skip { .. })), 0);
}

#[test]
fn disconnected_subgraphs_are_restarted() {
    let g = graph(6, &[(0, 1), (1, 0), (3, 4), (4, 3), (4, 5)]);
    let t = decompose_graph(&g);
    assert_scc_partition(&g, components_of(&t));
    assert_eq!(components_of(&t).len(), 4);
}

#[test]
fn self_loops_and_parallel_edges() {
    let g = graph(3, &[(0, 0), (0, 1), (0, 1), (1, 0), (2, 2), (1, 2)]);
    let t = decompose_graph(&g);
    assert_scc_partition(&g, components_of(&t));
    assert_eq!(components_of(&t).len(), 2);
}

#[test]
fn assigned_nodes_are_skipped_explicitly() {
    let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
    let t = decompose_graph(&g);
    let skipped: Vec<NodeId> = t
        .iter()
        .filter_map(|f| match f.kind {
            SccStep::Skip { node } => Some(node),
            _ => None,
        })
        .collect();
    assert_eq!(skipped.len(), 2);
    let last = &t.last().state;
    assert_eq!(skipped, last.order[1..].to_vec());
}

#[test]
fn phases_progress_monotonically() {
    let g = random_graph(10, 18, 3);
    let t = decompose_graph(&g);
    let rank = |p: Phase| match p {
        Phase::Forward => 0,
        Phase::Reverse => 1,
        Phase::Done => 2,
    };
    let ranks: Vec<u8> = t.iter().map(|f| rank(f.state.phase)).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(t.iter().filter(|f| f.kind == SccStep::Reverse).count(), 1);
    assert_eq!(t.last().kind, SccStep::Done);
}

#[test]
fn long_chain_does_not_recurse() {
    let n = 200;
    let edges: Vec<(NodeId, NodeId)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    let g = graph(n, &edges);
    let t = decompose_graph(&g);
    assert_eq!(components_of(&t).len(), n);
    let deepest = t.iter().map(|f| f.state.stack.len()).max().unwrap();
    assert_eq!(deepest, n);
}

#[test]
fn earlier_frames_are_unaffected_by_later_steps() {
    let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
    let t = decompose_graph(&g);
    let mut r = Replay::new(&t);
    let init = r.current().clone();
    r.seek_end();
    assert!(init.state.components.is_empty());
    assert!(init.state.visited.iter().all(|v| !v));
    assert!(r.rewind().state.finish_order.is_empty());
    let back = r
        .next_where(|k| matches!(k, SccStep::ComponentComplete { .. }))
        .unwrap();
    assert_eq!(back.state.components.len(), 1);
    assert!(back.state.current.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    #[test]
    fn partition_matches_mutual_reachability(
        n in 0usize..=9,
        raw in prop::collection::vec((0usize..9, 0usize..9), 0..24),
    ) {
        let edges: Vec<(NodeId, NodeId)> = if n == 0 {
            Vec::new()
        } else {
            raw.into_iter().map(|(a, b)| (a % n, b % n)).collect()
        };
        let g = graph(n, &edges);
        let t = decompose_graph(&g);
        assert_scc_partition(&g, components_of(&t));

        // Forward pass: every node finishes exactly once.
        let mut fo = t.last().state.finish_order.clone();
        fo.sort_unstable();
        prop_assert_eq!(fo, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn trace_is_deterministic(seed in any::<u64>(), n in 1usize..=8, m in 0usize..=16) {
        let g = random_graph(n, m, seed);
        let a = decompose_graph(&g);
        let b = decompose_graph(&g);
        prop_assert_eq!(to_cbor(&a).unwrap(), to_cbor(&b).unwrap());
    }

    #[test]
    fn out_of_range_edges_are_rejected(n in 0usize..=5, extra in 0usize..3) {
        let bad = (n + extra, 0);
        prop_assert!(decompose((0..n).map(|i| i.to_string()), [bad]).is_err());
    }
}
