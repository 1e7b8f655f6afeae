//! stepscope-core — frame/trace model, replay cursor, and trace I/O.
//!
//! This crate defines the **shared contract** every stepscope tracer emits:
//! - [`Frame`]: one owned, independently renderable snapshot of algorithm state,
//! - [`Trace`]: the ordered, append-only (until sealed) sequence of frames,
//! - [`Replay`]: a borrowed cursor for scrubbing forward/backward through a trace,
//! - JSON/CBOR/JSONL I/O so traces can be dumped and re-opened later.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use stepscope_core::{StepKind, TraceBuilder};
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
//! enum Tick { Init, Bump }
//!
//! impl StepKind for Tick {
//!     fn label(&self) -> &'static str {
//!         match self { Tick::Init => "init", Tick::Bump => "bump" }
//!     }
//! }
//!
//! let mut b = TraceBuilder::new(Tick::Init, "start at zero", 0u32);
//! b.push(Tick::Bump, "add one", 1);
//! let trace = b.finish();
//! assert_eq!(trace.len(), 2);
//! assert_eq!(trace.last().state, 1);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Typed errors surfaced by tracers and the replay cursor.
pub mod error;
/// JSON/CBOR helpers and auto-detecting read/write APIs for traces.
pub mod io;
/// JSON Lines (one frame per line) trace I/O.
pub mod io_jsonl;
/// Replay cursor over a finished trace.
pub mod replay;
/// Frame, trace, and builder types shared by every tracer.
pub mod types;

pub use error::*;
pub use replay::*;
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use stepscope_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        error::TraceError,
        replay::Replay,
        types::{Frame, StepKind, Trace, TraceBuilder},
    };
}
