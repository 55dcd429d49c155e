//! Pending/committed span updates.

/*
Parameter Commit Protocol
=========================

Control input arrives whenever it likes. The audio side reads parameters
every sample. A span is two numbers (start, end) that arrive as two separate
writes, so between them the pair can be nonsense: a new start that lies past
the old end, or an end that has arrived before its start.

Vocabulary
----------

  pending     The raw values written by control input. Each write clamps only
              its own value into the store. No relationship between start and
              end is guaranteed.

  committed   The span the audio side actually reads. Always non-empty:
              end > start.

  commit      Copying pending into committed, fixing up the pair on the way:

                  start = clamp(pending_start, 0, frames - 1)
                  end   = max(start + 1, clamp(pending_end, 0, frames))


The State Machine
-----------------

    ┌──────┐   set_start / set_end   ┌───────────────┐
    │ Idle │ ──────────────────────→ │ PendingCommit │
    └──────┘ ←────────────────────── └───────────────┘
                    commit_now

Only commit_now clears the pending state. What differs between players is
WHEN it runs, and that is a policy of the span, not of the player:

  Immediate     Commit inside the write itself. Used by the spawn engines:
                each grain or trigger copies the span when it is born, so a
                change can only ever affect future voices.

  OnPhaseWrap   Commit when the player's phasor wraps. Used by the phasor
                players: the same voice reads the span continuously, and
                moving it mid-cycle would make the read position jump.
*/

use crate::store::SampleSpan;

/// When a pending span becomes the committed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    Immediate,
    OnPhaseWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    Idle,
    PendingCommit,
}

/// Clamp a control value to a frame index in `[0, max]`.
///
/// Non-finite input maps to 0.
#[inline]
pub fn clamp_frame(value: f32, max: usize) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value as f64).round().min(max as f64) as usize
}

/// Span control with a pending/committed pair.
#[derive(Debug, Clone, Copy)]
pub struct SpanControl {
    pending_start: usize,
    pending_end: usize,
    committed: SampleSpan,
    state: CommitState,
    policy: CommitPolicy,
}

impl SpanControl {
    /// Starts out committed to `[0, 1)`.
    pub fn new(policy: CommitPolicy) -> Self {
        Self {
            pending_start: 0,
            pending_end: 1,
            committed: SampleSpan { start: 0, end: 1 },
            state: CommitState::Idle,
            policy,
        }
    }

    /// Write a pending start, clamped to `[0, frames - 1]`.
    ///
    /// Ignored when the store is unavailable (`frames == 0`).
    pub fn set_start(&mut self, value: f32, frames: usize) {
        if frames == 0 {
            return;
        }
        self.pending_start = clamp_frame(value, frames - 1);
        self.mark_pending(frames);
    }

    /// Write a pending end, clamped to `[0, frames]`.
    ///
    /// Ignored when the store is unavailable (`frames == 0`).
    pub fn set_end(&mut self, value: f32, frames: usize) {
        if frames == 0 {
            return;
        }
        self.pending_end = clamp_frame(value, frames);
        self.mark_pending(frames);
    }

    fn mark_pending(&mut self, frames: usize) {
        self.state = CommitState::PendingCommit;
        if self.policy == CommitPolicy::Immediate {
            self.commit_now(frames);
        }
    }

    /// Apply the pending values. Returns `true` if a commit happened.
    pub fn commit_now(&mut self, frames: usize) -> bool {
        if self.state == CommitState::Idle || frames == 0 {
            return false;
        }
        self.committed = SampleSpan::committed(self.pending_start, self.pending_end, frames);
        self.state = CommitState::Idle;
        true
    }

    /// Phase-wrap hook. Commits only under [`CommitPolicy::OnPhaseWrap`].
    #[inline]
    pub fn on_wrap(&mut self, frames: usize) -> bool {
        match self.policy {
            CommitPolicy::OnPhaseWrap => self.commit_now(frames),
            CommitPolicy::Immediate => false,
        }
    }

    #[inline]
    pub fn committed(&self) -> SampleSpan {
        self.committed
    }

    /// Raw `(start, end)` as last written.
    pub fn pending(&self) -> (usize, usize) {
        (self.pending_start, self.pending_end)
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: usize = 1000;

    #[test]
    fn immediate_commits_on_every_write() {
        let mut span = SpanControl::new(CommitPolicy::Immediate);
        span.set_start(100.0, FRAMES);
        assert_eq!(span.state(), CommitState::Idle);
        assert_eq!(span.committed(), SampleSpan { start: 100, end: 101 });

        span.set_end(400.0, FRAMES);
        assert_eq!(span.committed(), SampleSpan { start: 100, end: 400 });
    }

    #[test]
    fn wrap_policy_holds_until_wrap() {
        let mut span = SpanControl::new(CommitPolicy::OnPhaseWrap);
        span.set_start(250.0, FRAMES);
        span.set_end(750.0, FRAMES);

        assert_eq!(span.state(), CommitState::PendingCommit);
        assert_eq!(span.committed(), SampleSpan { start: 0, end: 1 });

        assert!(span.on_wrap(FRAMES));
        assert_eq!(span.committed(), SampleSpan { start: 250, end: 750 });
        assert!(!span.on_wrap(FRAMES), "nothing left to commit");
    }

    #[test]
    fn immediate_policy_ignores_wraps() {
        let mut span = SpanControl::new(CommitPolicy::Immediate);
        assert!(!span.on_wrap(FRAMES));
    }

    #[test]
    fn end_before_start_still_commits_a_valid_span() {
        for policy in [CommitPolicy::Immediate, CommitPolicy::OnPhaseWrap] {
            let mut span = SpanControl::new(policy);
            span.set_end(300.0, FRAMES);
            span.set_start(900.0, FRAMES);
            span.commit_now(FRAMES);

            let committed = span.committed();
            assert!(committed.end > committed.start, "{policy:?}: {committed:?}");
            assert_eq!(committed, SampleSpan { start: 900, end: 901 });
        }
    }

    #[test]
    fn writes_clamp_into_the_store() {
        let mut span = SpanControl::new(CommitPolicy::OnPhaseWrap);
        span.set_start(-50.0, FRAMES);
        span.set_end(1e9, FRAMES);
        assert_eq!(span.pending(), (0, FRAMES));

        span.set_start(5000.0, FRAMES);
        assert_eq!(span.pending().0, FRAMES - 1);

        span.set_start(f32::NAN, FRAMES);
        assert_eq!(span.pending().0, 0);
    }

    #[test]
    fn writes_ignored_without_a_store() {
        let mut span = SpanControl::new(CommitPolicy::Immediate);
        span.set_start(10.0, 0);
        assert_eq!(span.pending(), (0, 1));
        assert_eq!(span.state(), CommitState::Idle);
    }
}
