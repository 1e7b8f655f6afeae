//! Replay cursor over a finished [`Trace`].
//!
//! - [`Replay`]: borrowed, read-only cursor; scrub forward/backward, seek to
//!   any step, or jump to the next/previous frame of a given kind.
//!
//! Every frame is a self-contained snapshot, so moving the cursor is O(1) and
//! never recomputes anything: the frame at position `i` is rendered exactly as
//! the tracer recorded it.

use crate::{Frame, Trace, TraceError};

/// Borrowed cursor over a trace, positioned on frame 0 when created.
///
/// Not `Copy`: it is an [`Iterator`], and an implicit copy would advance
/// instead of the original. Use `by_ref()` or [`Clone`] explicitly.
#[derive(Debug)]
pub struct Replay<'t, K, S> {
    trace: &'t Trace<K, S>,
    pos: usize,
}

// Manual impl: cloning a cursor never needs `K: Clone` or `S: Clone`.
impl<K, S> Clone for Replay<'_, K, S> {
    fn clone(&self) -> Self {
        Self {
            trace: self.trace,
            pos: self.pos,
        }
    }
}

impl<'t, K, S> Replay<'t, K, S> {
    /// Open a cursor on the `init` frame.
    #[must_use]
    pub const fn new(trace: &'t Trace<K, S>) -> Self {
        Self { trace, pos: 0 }
    }

    /// The trace being replayed.
    #[inline]
    #[must_use]
    pub const fn trace(&self) -> &'t Trace<K, S> {
        self.trace
    }

    /// Current step index.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Frame under the cursor.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &'t Frame<K, S> {
        &self.trace.frames()[self.pos]
    }

    /// Whether the cursor sits on the `init` frame.
    #[inline]
    #[must_use]
    pub const fn is_at_start(&self) -> bool {
        self.pos == 0
    }

    /// Whether the cursor sits on the final frame.
    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos + 1 == self.trace.len()
    }

    /// Move one step forward. Returns `None` (cursor unchanged) at the end.
    pub fn step_forward(&mut self) -> Option<&'t Frame<K, S>> {
        if self.is_at_end() {
            return None;
        }
        self.pos += 1;
        Some(self.current())
    }

    /// Move one step back. Returns `None` (cursor unchanged) at the start.
    pub fn step_back(&mut self) -> Option<&'t Frame<K, S>> {
        if self.is_at_start() {
            return None;
        }
        self.pos -= 1;
        Some(self.current())
    }

    /// Jump to step `index`.
    ///
    /// # Errors
    /// [`TraceError::StepOutOfRange`] if `index >= len`; the cursor is unchanged.
    pub fn seek(&mut self, index: usize) -> Result<&'t Frame<K, S>, TraceError> {
        if index >= self.trace.len() {
            return Err(TraceError::StepOutOfRange {
                index,
                len: self.trace.len(),
            });
        }
        self.pos = index;
        Ok(self.current())
    }

    /// Jump back to the `init` frame.
    pub fn rewind(&mut self) -> &'t Frame<K, S> {
        self.pos = 0;
        self.current()
    }

    /// Jump to the final frame.
    pub fn seek_end(&mut self) -> &'t Frame<K, S> {
        self.pos = self.trace.len() - 1;
        self.current()
    }

    /// Advance to the next frame (strictly after the cursor) whose kind
    /// satisfies `pred`. Cursor is unchanged if there is none.
    pub fn next_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> Option<&'t Frame<K, S>> {
        let found = self.trace.frames()[self.pos + 1..]
            .iter()
            .position(|f| pred(&f.kind))?;
        self.pos += found + 1;
        Some(self.current())
    }

    /// Move back to the previous frame (strictly before the cursor) whose kind
    /// satisfies `pred`. Cursor is unchanged if there is none.
    pub fn prev_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> Option<&'t Frame<K, S>> {
        let found = self.trace.frames()[..self.pos]
            .iter()
            .rposition(|f| pred(&f.kind))?;
        self.pos = found;
        Some(self.current())
    }
}

impl<'t, K, S> Iterator for Replay<'t, K, S> {
    type Item = &'t Frame<K, S>;

    /// Yields the frame *after* the cursor, mirroring [`Replay::step_forward`].
    fn next(&mut self) -> Option<Self::Item> {
        self.step_forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StepKind, TraceBuilder};

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum K {
        Init,
        Even,
        Odd,
    }

    impl StepKind for K {
        fn label(&self) -> &'static str {
            match self {
                Self::Init => "init",
                Self::Even => "even",
                Self::Odd => "odd",
            }
        }
    }

    fn sample() -> Trace<K, usize> {
        let mut b = TraceBuilder::new(K::Init, "start", 0);
        for i in 1..=5 {
            let k = if i % 2 == 0 { K::Even } else { K::Odd };
            b.push(k, format!("step {i}"), i);
        }
        b.finish()
    }

    #[test]
    fn scrubs_forward_and_back_within_bounds() {
        let t = sample();
        let mut r = Replay::new(&t);
        assert!(r.is_at_start());
        assert!(r.step_back().is_none());
        assert_eq!(r.step_forward().map(|f| f.state), Some(1));
        assert_eq!(r.step_forward().map(|f| f.state), Some(2));
        assert_eq!(r.step_back().map(|f| f.state), Some(1));
        r.seek_end();
        assert!(r.is_at_end());
        assert!(r.step_forward().is_none());
        assert_eq!(r.position(), 5);
    }

    #[test]
    fn seek_rejects_out_of_range_and_keeps_position() {
        let t = sample();
        let mut r = Replay::new(&t);
        r.seek(3).unwrap();
        let err = r.seek(6).unwrap_err();
        assert_eq!(err, TraceError::StepOutOfRange { index: 6, len: 6 });
        assert_eq!(r.position(), 3);
        assert_eq!(r.rewind().state, 0);
    }

    #[test]
    fn jumps_by_kind() {
        let t = sample();
        let mut r = Replay::new(&t);
        assert_eq!(r.next_where(|k| *k == K::Even).map(|f| f.state), Some(2));
        assert_eq!(r.next_where(|k| *k == K::Even).map(|f| f.state), Some(4));
        assert!(r.next_where(|k| *k == K::Even).is_none());
        assert_eq!(r.position(), 4);
        assert_eq!(r.prev_where(|k| *k == K::Odd).map(|f| f.state), Some(3));
        assert_eq!(r.prev_where(|k| *k == K::Init).map(|f| f.state), Some(0));
        assert!(r.prev_where(|_| true).is_none());
    }

    #[test]
    fn iterates_remaining_frames() {
        let t = sample();
        let r = Replay::new(&t);
        let rest: Vec<usize> = r.map(|f| f.state).collect();
        assert_eq!(rest, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn iterating_by_ref_advances_the_cursor_itself() {
        let t = sample();
        let mut r = Replay::new(&t);
        let taken: Vec<usize> = r.by_ref().take(2).map(|f| f.state).collect();
        assert_eq!(taken, vec![1, 2]);
        assert_eq!(r.position(), 2);

        let mut ahead = r.clone();
        ahead.seek_end();
        assert_eq!(ahead.position(), 5);
        assert_eq!(r.position(), 2);
        assert_eq!(r.current().state, 2);
    }

    #[test]
    fn clones_without_cloneable_payloads() {
        #[derive(Debug)]
        struct Opaque;
        let t = TraceBuilder::new(K::Init, "start", Opaque).finish();
        let r = Replay::new(&t);
        let c = r.clone();
        assert_eq!(c.position(), r.position());
    }
}
