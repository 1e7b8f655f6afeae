// crates/stepscope-scc/src/kosaraju.rs

//! Two-pass SCC tracer (Kosaraju).
//!
//! 1. **Forward pass**: DFS from every unvisited node in label order; a node
//!    is appended to `finish_order` once its successors are exhausted.
//! 2. **Reverse**: flip every edge; process nodes in `reverse(finish_order)`.
//! 3. **Reverse pass**: each DFS over the flipped graph started from a node
//!    not yet assigned collects exactly one component; already assigned
//!    nodes produce an explicit `skip` frame.
//!
//! DFS uses an explicit stack of `(node, next successor offset)` frames
//! instead of recursion, emitting `visit` / `traverse_edge` / `finish` in the
//! same order a recursive DFS would. Successors are followed in
//! edge-insertion order and the visited guard is checked before following
//! any edge (self-loops included).

use serde::{Deserialize, Serialize};
use std::fmt;
use stepscope_core::{StepKind, Trace, TraceBuilder, TraceError};

use crate::graph::{Graph, NodeId};

/// Which graph a DFS step runs on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Forward adjacency; computes the finish order.
    Forward,
    /// Reversed adjacency; collects components.
    Reverse,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        })
    }
}

/// Coarse algorithm phase, carried on every frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First DFS pass over the original graph.
    Forward,
    /// Second DFS pass over the reversed graph.
    Reverse,
    /// All components found.
    Done,
}

/// Observable steps of the decomposition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SccStep {
    /// Nothing visited yet.
    Init,
    /// `node` touched for the first time in `pass` and pushed on the DFS stack.
    Visit {
        /// Node being visited.
        node: NodeId,
        /// Pass the visit belongs to.
        pass: Pass,
    },
    /// About to descend along `from -> to` (in the pass's own orientation).
    TraverseEdge {
        /// Node on top of the DFS stack.
        from: NodeId,
        /// Unvisited successor.
        to: NodeId,
        /// Pass the edge belongs to.
        pass: Pass,
    },
    /// `node`'s successors are exhausted; popped from the DFS stack.
    Finish {
        /// Node being finished.
        node: NodeId,
        /// Pass the finish belongs to.
        pass: Pass,
    },
    /// Edges flipped; `order` is now `reverse(finish_order)`.
    Reverse,
    /// `node` already belongs to a component; the reverse pass moves on.
    Skip {
        /// Node skipped.
        node: NodeId,
    },
    /// Component number `index` (0-based) appended to the result list.
    ComponentComplete {
        /// Position of the component in `components`.
        index: usize,
    },
    /// Decomposition finished.
    Done,
}

impl StepKind for SccStep {
    fn label(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Visit { .. } => "visit",
            Self::TraverseEdge { .. } => "traverse_edge",
            Self::Finish { .. } => "finish",
            Self::Reverse => "reverse",
            Self::Skip { .. } => "skip",
            Self::ComponentComplete { .. } => "component_complete",
            Self::Done => "done",
        }
    }
}

/// Algorithm state visible at one step. Every collection is an owned copy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SccState {
    /// Node labels by id, so a frame renders without the original graph.
    pub labels: Vec<String>,
    /// Current phase.
    pub phase: Phase,
    /// Node the cursor is on, if any.
    pub active_node: Option<NodeId>,
    /// Edge being traversed, if any.
    pub active_edge: Option<(NodeId, NodeId)>,
    /// DFS stack, bottom first.
    pub stack: Vec<NodeId>,
    /// Nodes touched by the forward pass.
    pub visited: Vec<bool>,
    /// Forward-pass finish order (one list across all DFS trees).
    pub finish_order: Vec<NodeId>,
    /// Reverse-pass processing order; empty until the `reverse` frame.
    pub order: Vec<NodeId>,
    /// Nodes already placed in a component by the reverse pass.
    pub assigned: Vec<bool>,
    /// Component being collected, in visit order.
    pub current: Vec<NodeId>,
    /// Completed components, in discovery order.
    pub components: Vec<Vec<NodeId>>,
}

impl SccState {
    fn new(graph: &Graph) -> Self {
        let n = graph.node_count();
        Self {
            labels: graph.labels().to_vec(),
            phase: Phase::Forward,
            active_node: None,
            active_edge: None,
            stack: Vec::new(),
            visited: vec![false; n],
            finish_order: Vec::with_capacity(n),
            order: Vec::new(),
            assigned: vec![false; n],
            current: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Render `nodes` by label as `{A, B, C}`; unknown ids print as `#id`.
    #[must_use]
    pub fn show(&self, nodes: &[NodeId]) -> String {
        let names: Vec<String> = nodes
            .iter()
            .map(|&v| {
                self.labels
                    .get(v)
                    .map_or_else(|| format!("#{v}"), Clone::clone)
            })
            .collect();
        format!("{{{}}}", names.join(", "))
    }

    fn seen(&self, node: NodeId, pass: Pass) -> bool {
        match pass {
            Pass::Forward => self.visited[node],
            Pass::Reverse => self.assigned[node],
        }
    }
}

/// Full trace of one decomposition.
pub type SccTrace = Trace<SccStep, SccState>;

/// Trace the decomposition of `nodes` / `edges`.
///
/// # Errors
/// [`TraceError::InvalidEdge`] if an edge names a node outside `[0, nodes.len())`;
/// no frames are produced in that case.
pub fn decompose<L: Into<String>>(
    nodes: impl IntoIterator<Item = L>,
    edges: impl IntoIterator<Item = (NodeId, NodeId)>,
) -> Result<SccTrace, TraceError> {
    Ok(decompose_graph(&Graph::new(nodes, edges)?))
}

/// Trace the decomposition of an already validated graph.
///
/// The last frame's `state.components` is a partition of all nodes.
#[must_use]
pub fn decompose_graph(graph: &Graph) -> SccTrace {
    let n = graph.node_count();
    let mut run = Run::new(graph);

    // ---- Forward pass: restart from every unvisited node, in label order ----
    for root in 0..n {
        if !run.state.visited[root] {
            run.dfs(graph, root, Pass::Forward);
        }
    }

    // ---- Reverse ----
    let reversed = graph.reversed();
    run.state.phase = Phase::Reverse;
    run.state.order = run.state.finish_order.iter().rev().copied().collect();
    run.state.active_node = None;
    run.state.active_edge = None;
    let note = format!(
        "flip all {} edges; process nodes in reverse finish order {}",
        graph.edge_count(),
        graph.show(&run.state.order)
    );
    run.emit(SccStep::Reverse, note);

    // ---- Reverse pass: one DFS tree per component ----
    let order = run.state.order.clone();
    for root in order {
        if run.state.assigned[root] {
            run.state.active_node = Some(root);
            let note = format!("skip {}: already in a component", graph.label(root));
            run.emit(SccStep::Skip { node: root }, note);
            continue;
        }
        run.dfs(&reversed, root, Pass::Reverse);

        let component = std::mem::take(&mut run.state.current);
        let index = run.state.components.len();
        let note = format!("component #{index}: {}", graph.show(&component));
        run.state.components.push(component);
        run.state.active_node = None;
        run.emit(SccStep::ComponentComplete { index }, note);
    }

    run.state.phase = Phase::Done;
    run.state.active_node = None;
    run.state.active_edge = None;
    let note = format!(
        "{} strongly connected component(s)",
        run.state.components.len()
    );
    run.emit(SccStep::Done, note);

    run.out.finish()
}

/// The final component partition of a finished trace.
#[must_use]
pub fn components_of(trace: &SccTrace) -> &[Vec<NodeId>] {
    &trace.last().state.components
}

/// One DFS stack entry: the node and the offset of its next successor.
#[derive(Clone, Copy, Debug)]
struct DfsFrame {
    node: NodeId,
    next: usize,
}

/// Working state + recorder for one decomposition.
struct Run {
    state: SccState,
    out: TraceBuilder<SccStep, SccState>,
}

impl Run {
    fn new(graph: &Graph) -> Self {
        let state = SccState::new(graph);
        let out = TraceBuilder::new(
            SccStep::Init,
            format!(
                "{} node(s), {} edge(s); forward pass starts",
                graph.node_count(),
                graph.edge_count()
            ),
            state.clone(),
        );
        Self { state, out }
    }

    fn emit(&mut self, kind: SccStep, note: String) {
        self.out.push(kind, note, self.state.clone());
    }

    fn enter(&mut self, g: &Graph, node: NodeId, pass: Pass) {
        match pass {
            Pass::Forward => self.state.visited[node] = true,
            Pass::Reverse => {
                self.state.assigned[node] = true;
                self.state.current.push(node);
            }
        }
        self.state.stack.push(node);
        self.state.active_node = Some(node);
        let note = format!("visit {} ({pass} pass)", g.label(node));
        self.emit(SccStep::Visit { node, pass }, note);
    }

    /// Iterative DFS from `root`, which must be unseen in `pass`.
    fn dfs(&mut self, g: &Graph, root: NodeId, pass: Pass) {
        self.state.active_edge = None;
        self.enter(g, root, pass);
        let mut st = vec![DfsFrame {
            node: root,
            next: 0,
        }];

        while let Some(top) = st.last_mut() {
            let node = top.node;
            if let Some(&to) = g.successors(node).get(top.next) {
                top.next += 1;
                if self.state.seen(to, pass) {
                    continue;
                }
                self.state.active_edge = Some((node, to));
                self.state.active_node = Some(node);
                let note = format!("traverse {} -> {}", g.label(node), g.label(to));
                self.emit(SccStep::TraverseEdge { from: node, to, pass }, note);
                self.enter(g, to, pass);
                st.push(DfsFrame { node: to, next: 0 });
                continue;
            }

            // Successors exhausted.
            st.pop();
            self.state.stack.pop();
            self.state.active_edge = None;
            self.state.active_node = Some(node);
            let note = match pass {
                Pass::Forward => {
                    self.state.finish_order.push(node);
                    format!(
                        "finish {}; finish order {}",
                        g.label(node),
                        g.show(&self.state.finish_order)
                    )
                }
                Pass::Reverse => format!("finish {} (reverse pass)", g.label(node)),
            };
            self.emit(SccStep::Finish { node, pass }, note);
        }
    }
}
