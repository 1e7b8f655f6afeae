//! Error taxonomy for tracers and trace consumers.
//!
//! Inputs to the tracers are plain value types, so the set is deliberately
//! small: a graph edge pointing outside the node range, and a replay seek past
//! the end of a trace. Degenerate inputs (empty text, empty pattern, empty
//! node set, zero edges) are never errors.

use thiserror::Error;

/// Errors reported synchronously by tracers and the replay cursor.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// An edge references a node index outside `[0, nodes)`.
    #[error("edge #{edge} ({from} -> {to}) references a node outside [0, {nodes})")]
    InvalidEdge {
        /// Position of the offending edge in the supplied edge list.
        edge: usize,
        /// Source index as supplied.
        from: usize,
        /// Target index as supplied.
        to: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },

    /// A replay seek asked for a frame the trace does not have.
    #[error("step {index} is out of range for a trace of {len} frames")]
    StepOutOfRange {
        /// Requested frame index.
        index: usize,
        /// Number of frames in the trace.
        len: usize,
    },
}
