// crates/stepscope-kmp/src/table.rs

//! Failure table (prefix function) and a pattern compiled against it.

use serde::{Deserialize, Serialize};

use crate::prefix::{self, PrefixTrace};

/// Border length; `-1` is the sentinel stored at `table[0]`.
pub type Border = isize;

/// `table[i]` is the length of the longest proper border of the length-`i`
/// prefix of the pattern; `table[0] == -1`. Length is `pattern.len() + 1`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FailureTable(Vec<Border>);

impl FailureTable {
    /// Compute the table for `pattern` without recording frames.
    ///
    /// Agrees with [`FailureTable::from_trace`] on [`prefix::build_chars`].
    #[must_use]
    pub fn of(pattern: &[char]) -> Self {
        Self(borders(pattern))
    }

    /// Read the table off the last frame of a prefix-function trace.
    #[must_use]
    pub fn from_trace(trace: &PrefixTrace) -> Self {
        Self(trace.last().state.table.clone())
    }

    /// Entries in order, starting with the `-1` sentinel.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Border] {
        &self.0
    }

    /// Number of entries (`pattern.len() + 1`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries; never true for a built table, which
    /// keeps its sentinel even for an empty pattern.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `table[len]`, i.e. where the search resumes after a mismatch at `len`.
    #[inline]
    #[must_use]
    pub fn border(&self, len: usize) -> Option<Border> {
        self.0.get(len).copied()
    }

    /// Consume into the raw entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<Border> {
        self.0
    }
}

/// Untraced border recurrence; memory is O(m).
fn borders(pattern: &[char]) -> Vec<Border> {
    let mut table: Vec<Border> = Vec::with_capacity(pattern.len() + 1);
    table.push(-1);
    let mut j: Border = -1;
    for &c in pattern {
        while let Some(k) = prefix::index(j).filter(|&k| c != pattern[k]) {
            j = table[k];
        }
        j += 1;
        table.push(j);
    }
    table
}

/// A pattern together with its failure table, ready for repeated searches.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
    table: FailureTable,
}

impl Pattern {
    /// Split `pattern` into codepoints and precompute its table.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self::from_chars(pattern.chars().collect())
    }

    /// Same as [`Pattern::new`] for an already split pattern.
    #[must_use]
    pub fn from_chars(chars: Vec<char>) -> Self {
        let table = FailureTable::of(&chars);
        Self { chars, table }
    }

    /// Pattern codepoints.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Precomputed failure table.
    #[inline]
    #[must_use]
    pub const fn table(&self) -> &FailureTable {
        &self.table
    }

    /// Length in codepoints.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the pattern has no codepoints.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
