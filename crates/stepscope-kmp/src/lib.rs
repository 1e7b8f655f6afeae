// crates/stepscope-kmp/src/lib.rs

//! Instrumented Knuth–Morris–Pratt tracers.
//!
//! - [`prefix::build`]: failure-table construction, one frame per compare,
//!   fallback, and table write.
//! - [`search::search`]: linear-time search reporting every (possibly
//!   overlapping) occurrence, one frame per compare, fallback, advance, and hit.
//!
//! Strings are indexed by **codepoint** (`char`), never by UTF-8 byte, so
//! non-ASCII input behaves exactly like ASCII input.
//!
//! Both tracers are total: every finite input (including empty strings) yields
//! a trace, and the summary (table / match list) is read from the last frame.

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
#![allow(clippy::module_name_repetitions, clippy::cast_possible_wrap)]

/// Prefix-function (failure table) tracer.
pub mod prefix;
/// String-search tracer.
pub mod search;
/// Failure table and compiled pattern types.
pub mod table;

pub use prefix::{PrefixState, PrefixStep, PrefixTrace};
pub use search::{SearchState, SearchStep, SearchTrace};
pub use table::{Border, FailureTable, Pattern};

/// Render a slice of chars for frame notes.
pub(crate) fn show(chars: &[char]) -> String {
    chars.iter().collect()
}
