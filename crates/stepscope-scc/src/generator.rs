// crates/stepscope-scc/src/generator.rs

//! Tiny seeded graph generator used by the CLI `scc --random` mode and benches.
//! Produces a [`Graph`] with `nodes` nodes labeled `n0..` and `edges` edges.

use rand::{rngs::StdRng, Rng as _, SeedableRng};

use crate::graph::Graph;

/// Generate a random directed graph:
/// - labels are `n0`, `n1`, ...
/// - each edge picks both endpoints uniformly, so self-loops and parallel
///   edges occur naturally
/// - the same `(nodes, edges, seed)` always yields the same graph
///
/// With `nodes == 0` no edge can exist and the edge count is ignored.
#[must_use]
pub fn random_graph(nodes: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels = (0..nodes).map(|i| format!("n{i}")).collect();
    let edge_list = if nodes == 0 {
        Vec::new()
    } else {
        (0..edges)
            .map(|_| (rng.random_range(0..nodes), rng.random_range(0..nodes)))
            .collect()
    };
    Graph::from_valid(labels, edge_list)
}
