// crates/stepscope-scc/src/graph.rs

//! Directed graph over labeled nodes `0..n`.
//!
//! Edges keep the order they were supplied in; a node's successors are the
//! targets of its outgoing edges in that order. Self-loops and parallel edges
//! are kept as-is and isolated nodes are never pruned.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stepscope_core::TraceError;

/// Node index in `0..n`.
pub type NodeId = usize;

/// Validated directed graph with insertion-ordered adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<String>,
    edges: Vec<(NodeId, NodeId)>,
    succ: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Build a graph, rejecting any edge that names a node outside `[0, n)`.
    ///
    /// # Errors
    /// [`TraceError::InvalidEdge`] for the first offending edge; nothing else
    /// is rejected (duplicate labels, self-loops and parallel edges are fine).
    pub fn new<L: Into<String>>(
        labels: impl IntoIterator<Item = L>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self, TraceError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let edges: Vec<(NodeId, NodeId)> = edges.into_iter().collect();
        let nodes = labels.len();
        if let Some((edge, &(from, to))) = edges
            .iter()
            .enumerate()
            .find(|&(_, &(f, t))| f >= nodes || t >= nodes)
        {
            return Err(TraceError::InvalidEdge {
                edge,
                from,
                to,
                nodes,
            });
        }
        Ok(Self::from_valid(labels, edges))
    }

    /// Caller guarantees every endpoint is `< labels.len()`.
    pub(crate) fn from_valid(labels: Vec<String>, edges: Vec<(NodeId, NodeId)>) -> Self {
        let mut succ = vec![Vec::new(); labels.len()];
        for &(from, to) in &edges {
            succ[from].push(to);
        }
        Self {
            labels,
            edges,
            succ,
        }
    }

    /// Same nodes, every edge flipped, in the original edge order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let edges = self.edges.iter().map(|&(f, t)| (t, f)).collect();
        Self::from_valid(self.labels.clone(), edges)
    }

    /// Number of nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges (parallel edges counted separately).
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Display label of `node`. Panics if `node` is out of range.
    #[inline]
    #[must_use]
    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node]
    }

    /// All labels in node order.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Edges in supplied order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Successors of `node` in edge-insertion order.
    #[inline]
    #[must_use]
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.succ[node]
    }

    /// Render a list of nodes as `{A, B, C}`.
    #[must_use]
    pub fn show(&self, nodes: &[NodeId]) -> String {
        let names: Vec<&str> = nodes.iter().map(|&v| self.label(v)).collect();
        format!("{{{}}}", names.join(", "))
    }
}

/// On-disk / wire description of a graph (`nodes` + `edges`).
///
/// ```toml
/// nodes = ["A", "B", "C"]
/// edges = [[0, 1], [1, 2], [2, 0]]
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphSpec {
    /// Node labels; the index of a label is its node id.
    pub nodes: Vec<String>,
    /// Directed edges `(from, to)`.
    #[serde(default)]
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphSpec {
    /// Validate into a [`Graph`].
    pub fn into_graph(self) -> Result<Graph, TraceError> {
        Graph::new(self.nodes, self.edges)
    }

    /// Read a spec from `.toml` or `.json` (by extension, case-insensitive).
    pub fn read_auto<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read graph {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => toml::from_str(&src).context("parse graph toml"),
            Some("json") => serde_json::from_str(&src).context("parse graph json"),
            Some(other) => Err(anyhow!(
                "unsupported graph extension: {} (supported: .toml, .json)",
                other
            )),
            None => Err(anyhow!("path has no extension (expected .toml or .json)")),
        }
    }
}

impl From<&Graph> for GraphSpec {
    fn from(g: &Graph) -> Self {
        Self {
            nodes: g.labels.clone(),
            edges: g.edges.clone(),
        }
    }
}
