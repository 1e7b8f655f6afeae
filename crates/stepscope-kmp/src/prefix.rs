// crates/stepscope-kmp/src/prefix.rs

//! Prefix-function tracer.
//!
//! Builds the failure table of a pattern with the classic border recurrence,
//! keeping two cursors:
//!
//! - `i`: length of the prefix whose border is being computed next (starts at 0),
//! - `j`: candidate border length (starts at -1).
//!
//! While `j >= 0` and `p[i] != p[j]`, the candidate shrinks to `table[j]`
//! (one `compare` + one `fallback` frame per shrink). A surviving candidate is
//! recorded as a matching `compare`. Then both cursors advance and
//! `table[i] = j` is written (`set` frame).
//!
//! An empty pattern yields just the `init` frame with table `[-1]`.

use serde::{Deserialize, Serialize};
use stepscope_core::{StepKind, Trace, TraceBuilder};

use crate::show;
use crate::table::Border;

/// Observable steps of the prefix-function construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum PrefixStep {
    /// Table holds only the `-1` sentinel; `i = 0`, `j = -1`.
    Init,
    /// `pattern[i]` compared with `pattern[j]`.
    Compare {
        /// Index of the character extending the prefix.
        i: usize,
        /// Candidate border length (index of the compared character).
        j: usize,
        /// Whether the characters are equal.
        matched: bool,
    },
    /// After a mismatch the candidate shrinks: `j := table[from]`.
    Fallback {
        /// Index of the character that mismatched.
        i: usize,
        /// Candidate border length before falling back.
        from: usize,
        /// Candidate border length after falling back (`-1` means none).
        to: Border,
    },
    /// `table[len] = border` written.
    Set {
        /// Prefix length whose border was just computed.
        len: usize,
        /// Its longest proper border.
        border: Border,
    },
}

impl StepKind for PrefixStep {
    fn label(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Compare { .. } => "compare",
            Self::Fallback { .. } => "fallback",
            Self::Set { .. } => "set",
        }
    }
}

/// Algorithm state visible at one step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrefixState {
    /// Prefix-length cursor.
    pub i: usize,
    /// Candidate-border cursor (`-1` when there is none).
    pub j: Border,
    /// Table so far: entries `0..=i` are final.
    pub table: Vec<Border>,
}

/// Full trace of one prefix-function construction.
pub type PrefixTrace = Trace<PrefixStep, PrefixState>;

/// Trace the failure-table construction for `pattern` (split into codepoints).
#[must_use]
pub fn build(pattern: &str) -> PrefixTrace {
    let chars: Vec<char> = pattern.chars().collect();
    build_chars(&chars)
}

/// Trace the failure-table construction for an already split pattern.
///
/// The last frame's `state.table` is the complete table.
#[must_use]
pub fn build_chars(pattern: &[char]) -> PrefixTrace {
    let n = pattern.len();
    let mut table: Vec<Border> = Vec::with_capacity(n + 1);
    table.push(-1);
    let mut i = 0usize;
    let mut j: Border = -1;

    let snap = |i: usize, j: Border, table: &[Border]| PrefixState {
        i,
        j,
        table: table.to_vec(),
    };

    let mut out = TraceBuilder::new(
        PrefixStep::Init,
        format!(
            "build failure table for {:?} ({n} chars): table[0] = -1, i = 0, j = -1",
            show(pattern)
        ),
        snap(i, j, &table),
    );

    while i < n {
        while let Some(k) = index(j).filter(|&k| pattern[i] != pattern[k]) {
            out.push(
                PrefixStep::Compare {
                    i,
                    j: k,
                    matched: false,
                },
                format!(
                    "pattern[{i}] {:?} != pattern[{k}] {:?}: mismatch",
                    pattern[i], pattern[k]
                ),
                snap(i, j, &table),
            );
            j = table[k];
            out.push(
                PrefixStep::Fallback { i, from: k, to: j },
                format!("fall back: j = table[{k}] = {j}"),
                snap(i, j, &table),
            );
        }

        if let Some(k) = index(j) {
            out.push(
                PrefixStep::Compare {
                    i,
                    j: k,
                    matched: true,
                },
                format!(
                    "pattern[{i}] {:?} == pattern[{k}] {:?}: match",
                    pattern[i], pattern[k]
                ),
                snap(i, j, &table),
            );
        }

        i += 1;
        j += 1;
        table.push(j);
        out.push(
            PrefixStep::Set { len: i, border: j },
            format!(
                "table[{i}] = {j}: longest proper border of {:?} has length {j}",
                show(&pattern[..i])
            ),
            snap(i, j, &table),
        );
    }

    out.finish()
}

/// The final table of a finished trace.
#[must_use]
pub fn table_of(trace: &PrefixTrace) -> &[Border] {
    &trace.last().state.table
}

/// `Some(j)` as an index when `j` is a real candidate (not the `-1` sentinel).
#[inline]
pub(crate) fn index(j: Border) -> Option<usize> {
    usize::try_from(j).ok()
}
