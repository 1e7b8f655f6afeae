//! Canonical frame/trace types shared by every tracer.
//!
//! A tracer runs its algorithm to completion, handing an **owned** state
//! snapshot to [`TraceBuilder::push`] at every observable micro-step. Nothing
//! in a [`Frame`] aliases the tracer's working state, so later mutation can
//! never change a frame that was already emitted.
//!
//! Serialized forms are conservative (serde) and deterministic: the same input
//! always produces byte-identical encodings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A tracer's closed set of step kinds.
///
/// Implementors are plain enums whose variants carry the cursor positions of
/// the step (text/pattern indices, active node/edge, ...).
pub trait StepKind {
    /// Stable snake_case tag for this kind (`init`, `compare`, `fallback`, ...).
    fn label(&self) -> &'static str;
}

/// One immutable snapshot of algorithm state at a single observable step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frame<K, S> {
    /// What happened at this step, including its cursor positions.
    pub kind: K,
    /// Human-readable description of the transition.
    pub note: String,
    /// Full copy of the mutable algorithm state visible at this instant.
    pub state: S,
}

impl<K: StepKind, S> Frame<K, S> {
    /// Shorthand for `self.kind.label()`.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl<K: StepKind, S> fmt::Display for Frame<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.note)
    }
}

/// Append-only recorder used while a tracer runs.
///
/// Seeded with the `init` frame, so every finished [`Trace`] has at least one
/// frame.
#[derive(Clone, Debug)]
pub struct TraceBuilder<K, S> {
    frames: Vec<Frame<K, S>>,
}

impl<K, S> TraceBuilder<K, S> {
    /// Start a trace with its `init` frame.
    #[must_use]
    pub fn new(kind: K, note: impl Into<String>, state: S) -> Self {
        Self {
            frames: vec![Frame {
                kind,
                note: note.into(),
                state,
            }],
        }
    }

    /// Append one frame. `state` must be an owned snapshot.
    pub fn push(&mut self, kind: K, note: impl Into<String>, state: S) {
        self.frames.push(Frame {
            kind,
            note: note.into(),
            state,
        });
    }

    /// Number of frames recorded so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: the builder holds the `init` frame from construction.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Seal the trace.
    #[must_use]
    pub fn finish(self) -> Trace<K, S> {
        Trace {
            frames: self.frames,
        }
    }
}

/// Ordered, finite, non-empty sequence of frames for one run on one input.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Trace<K, S> {
    frames: Vec<Frame<K, S>>,
}

impl<K, S> Trace<K, S> {
    /// Rebuild a trace from raw frames (e.g. after reading JSONL).
    ///
    /// Returns `None` for an empty vector, which no tracer can produce.
    #[must_use]
    pub fn from_frames(frames: Vec<Frame<K, S>>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    /// Number of frames.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Frame at position `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Frame<K, S>> {
        self.frames.get(index)
    }

    /// The `init` frame.
    #[inline]
    #[must_use]
    pub fn first(&self) -> &Frame<K, S> {
        &self.frames[0]
    }

    /// The final frame; summaries (tables, matches, components) are read here.
    #[inline]
    #[must_use]
    pub fn last(&self) -> &Frame<K, S> {
        &self.frames[self.frames.len() - 1]
    }

    /// All frames in order.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[Frame<K, S>] {
        &self.frames
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame<K, S>> {
        self.frames.iter()
    }

    /// Consume the trace, returning its frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<Frame<K, S>> {
        self.frames
    }

    /// Index of the first frame whose kind satisfies `pred`.
    pub fn position(&self, mut pred: impl FnMut(&K) -> bool) -> Option<usize> {
        self.frames.iter().position(|f| pred(&f.kind))
    }

    /// Number of frames whose kind satisfies `pred`.
    pub fn count(&self, mut pred: impl FnMut(&K) -> bool) -> usize {
        self.frames.iter().filter(|f| pred(&f.kind)).count()
    }
}

impl<K: StepKind, S> Trace<K, S> {
    /// Stable labels of every frame, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.frames.iter().map(Frame::label).collect()
    }
}

impl<'a, K, S> IntoIterator for &'a Trace<K, S> {
    type Item = &'a Frame<K, S>;
    type IntoIter = std::slice::Iter<'a, Frame<K, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[derive(Deserialize)]
struct RawTrace<K, S> {
    frames: Vec<Frame<K, S>>,
}

impl<'de, K, S> Deserialize<'de> for Trace<K, S>
where
    K: Deserialize<'de>,
    S: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTrace::<K, S>::deserialize(deserializer)?;
        Self::from_frames(raw.frames)
            .ok_or_else(|| D::Error::custom("trace must contain at least the init frame"))
    }
}
