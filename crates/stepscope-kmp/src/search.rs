// crates/stepscope-kmp/src/search.rs

//! String-search tracer.
//!
//! Scans `text` once with cursors `i` (text index) and `j` (pattern index):
//!
//! 1. while `j >= 0` and `text[i] != pattern[j]`: `compare` (mismatch), then
//!    `fallback` to `j := table[j]`;
//! 2. if `j >= 0`: `compare` (match);
//! 3. `i += 1; j += 1`: `advance`;
//! 4. if `j == len(pattern)`: record `i - j` (`found`), then `fallback` to
//!    `table[j]` so overlapping occurrences are still reported.
//!
//! Empty text or an empty pattern yields only the `init` frame and no matches;
//! an empty pattern is never reported as occurring anywhere.

use serde::{Deserialize, Serialize};
use stepscope_core::{StepKind, Trace, TraceBuilder};

use crate::prefix::index;
use crate::show;
use crate::table::{Border, Pattern};

/// Observable steps of the search phase.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SearchStep {
    /// Cursors at `i = 0`, `j = 0`, no matches.
    Init,
    /// `text[i]` compared with `pattern[j]`.
    Compare {
        /// Text index.
        i: usize,
        /// Pattern index.
        j: usize,
        /// Whether the characters are equal.
        matched: bool,
    },
    /// Pattern cursor falls back: `j := table[from]`.
    Fallback {
        /// Text index at the time of the fallback.
        i: usize,
        /// Pattern cursor before falling back.
        from: usize,
        /// Pattern cursor after falling back (`-1` means restart).
        to: Border,
    },
    /// Both cursors advanced; values are post-increment.
    Advance {
        /// New text index.
        i: usize,
        /// New pattern index.
        j: usize,
    },
    /// A full occurrence ends just before `i`.
    Found {
        /// Start of the occurrence in `text`.
        start: usize,
    },
}

impl StepKind for SearchStep {
    fn label(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Compare { .. } => "compare",
            Self::Fallback { .. } => "fallback",
            Self::Advance { .. } => "advance",
            Self::Found { .. } => "found",
        }
    }
}

/// Algorithm state visible at one step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchState {
    /// Text cursor.
    pub i: usize,
    /// Pattern cursor (`-1` right after falling off the start).
    pub j: Border,
    /// Failure table of the pattern.
    pub table: Vec<Border>,
    /// Match starts found so far, ascending.
    pub matches: Vec<usize>,
}

/// Full trace of one search.
pub type SearchTrace = Trace<SearchStep, SearchState>;

/// Trace a search for every occurrence of `pattern` in `text`.
#[must_use]
pub fn search(text: &str, pattern: &str) -> SearchTrace {
    let text: Vec<char> = text.chars().collect();
    search_compiled(&text, &Pattern::new(pattern))
}

/// Trace a search over an already split `text` with a precompiled pattern.
///
/// The last frame's `state.matches` is the complete, ascending match list.
#[must_use]
pub fn search_compiled(text: &[char], pattern: &Pattern) -> SearchTrace {
    let p = pattern.chars();
    let table = pattern.table().as_slice();
    let (n, m) = (text.len(), p.len());
    let mut matches: Vec<usize> = Vec::new();
    let mut i = 0usize;
    let mut j: Border = 0;

    let snap = |i: usize, j: Border, matches: &[usize]| SearchState {
        i,
        j,
        table: table.to_vec(),
        matches: matches.to_vec(),
    };

    let mut out = TraceBuilder::new(
        SearchStep::Init,
        format!(
            "search {:?} ({m} chars) in {:?} ({n} chars)",
            show(p),
            show(text)
        ),
        snap(i, j, &matches),
    );

    if n == 0 || m == 0 {
        return out.finish();
    }

    while i < n {
        while let Some(k) = index(j).filter(|&k| text[i] != p[k]) {
            out.push(
                SearchStep::Compare {
                    i,
                    j: k,
                    matched: false,
                },
                format!(
                    "text[{i}] {:?} != pattern[{k}] {:?}: mismatch",
                    text[i], p[k]
                ),
                snap(i, j, &matches),
            );
            j = table[k];
            out.push(
                SearchStep::Fallback { i, from: k, to: j },
                format!("fall back: j = table[{k}] = {j}"),
                snap(i, j, &matches),
            );
        }

        if let Some(k) = index(j) {
            out.push(
                SearchStep::Compare {
                    i,
                    j: k,
                    matched: true,
                },
                format!("text[{i}] {:?} == pattern[{k}] {:?}: match", text[i], p[k]),
                snap(i, j, &matches),
            );
        }

        i += 1;
        j += 1;
        let jj = index(j).unwrap_or_default();
        out.push(
            SearchStep::Advance { i, j: jj },
            format!("advance: i = {i}, j = {j}"),
            snap(i, j, &matches),
        );

        if jj == m {
            let start = i - m;
            matches.push(start);
            out.push(
                SearchStep::Found { start },
                format!(
                    "match at {start}: text[{start}..{i}] = {:?}",
                    show(&text[start..i])
                ),
                snap(i, j, &matches),
            );
            j = table[m];
            out.push(
                SearchStep::Fallback { i, from: m, to: j },
                format!("fall back to keep scanning: j = table[{m}] = {j}"),
                snap(i, j, &matches),
            );
        }
    }

    out.finish()
}

/// The final match list of a finished trace.
#[must_use]
pub fn matches_of(trace: &SearchTrace) -> &[usize] {
    &trace.last().state.matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_match() {
        let t = search("ABABDABABCABAB", "ABABC");
        assert_eq!(matches_of(&t), &[5]);
    }

    #[test]
    fn overlapping_matches_are_reported() {
        let t = search("AAAA", "AA");
        assert_eq!(matches_of(&t), &[0, 1, 2]);
        assert_eq!(t.count(|k| matches!(k, SearchStep::Found { .. })), 3);
    }

    #[test]
    fn every_found_is_followed_by_a_fallback() {
        let t = search("ABABABAB", "ABAB");
        let frames = t.frames();
        for (idx, f) in frames.iter().enumerate() {
            if let SearchStep::Found { .. } = f.kind {
                match frames[idx + 1].kind {
                    SearchStep::Fallback { from, to, .. } => {
                        assert_eq!(from, 4);
                        assert_eq!(to, 2);
                    }
                    ref other => panic!("expected fallback after found, got {other:?}"),
                }
            }
        }
        assert_eq!(matches_of(&t), &[0, 2, 4]);
    }

    #[test]
    fn degenerate_inputs_only_init() {
        for (text, pat) in [("", "A"), ("ABC", ""), ("", "")] {
            let t = search(text, pat);
            assert_eq!(t.len(), 1, "{text:?} / {pat:?}");
            assert!(matches_of(&t).is_empty());
        }
    }

    #[test]
    fn pattern_longer_than_text_never_matches() {
        let t = search("AB", "ABC");
        assert!(matches_of(&t).is_empty());
        assert_eq!(t.count(|k| matches!(k, SearchStep::Advance { .. })), 2);
    }

    #[test]
    fn tiny_trace_frame_sequence() {
        let t = search("BA", "A");
        assert_eq!(
            t.labels(),
            vec![
                "init", //
                "compare", "fallback", "advance", // B vs A, restart
                "compare", "advance", "found", "fallback", // A == A
            ]
        );
        assert_eq!(matches_of(&t), &[1]);
    }

    #[test]
    fn non_ascii_is_indexed_by_codepoint() {
        let t = search("ééaé", "é");
        assert_eq!(matches_of(&t), &[0, 1, 3]);
    }
}
