// crates/stepscope-scc/src/lib.rs

//! Instrumented strongly-connected-components decomposition.
//!
//! - [`graph`]: validated directed graph with insertion-ordered adjacency,
//!   plus a serde-friendly [`GraphSpec`] for TOML/JSON graph files.
//! - [`kosaraju`]: two-pass DFS tracer emitting one frame per visit, edge
//!   descent, finish, skip, and completed component.
//! - [`generator`]: seeded random graphs for demos and benches.
//!
//! Traversal is iterative (explicit stack), so deep graphs cannot exhaust the
//! call stack, and frame order is identical to the textbook recursive DFS.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Seeded random graph generator.
pub mod generator;
/// Graph model and graph-file spec.
pub mod graph;
/// Two-pass SCC tracer.
pub mod kosaraju;

pub use graph::{Graph, GraphSpec, NodeId};
pub use kosaraju::{decompose, decompose_graph, Pass, Phase, SccState, SccStep, SccTrace};
