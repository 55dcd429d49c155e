//! Phase accumulators for playback and event scheduling.

/*
Phase Accumulators
==================

Both the looping phasor players and the grain spawner are driven by the same
tiny machine: a number in [0, 1) that grows a little every sample and wraps
back around when it reaches 1.

Vocabulary
----------

  phase       Position inside the current cycle, 0.0 (start) to 1.0 (end,
              exclusive).

  increment   How much phase grows per sample.

  wrap        The sample on which phase crosses 1.0 and is pulled back by
              subtracting 1.0. One wrap = one completed cycle.


Two Ways To Express Rate
------------------------

A phasor player expresses rate in cycles per second (Hz):

    increment = rate_hz / sample_rate

The spawn scheduler expresses rate as an interval in milliseconds, which is
the musically meaningful unit for "how often does a grain start":

    interval_samples = (rate_ms / 1000) * sample_rate
    increment        = 1 / interval_samples

Example: 100 ms at 44.1 kHz
  - interval = 0.1 * 44100 = 4410 samples
  - increment = 1 / 4410 ≈ 0.000227
  - one wrap (one spawn attempt) every 4410 samples, ten per second


Why A Phase And Not A Sample Counter
------------------------------------

The phase is the source of truth, not "samples since the last event". A
counter would need to be rebased whenever the rate changes, and an integer
counter cannot represent an interval of 4410.5 samples without drift. The
phase simply keeps its fractional remainder across the wrap:

    phase = 0.9998 + 0.000227 = 1.000027  →  wrap  →  0.000027

so the next wrap lands one full interval after the true crossing, and the
block size the host picks has no influence on when events fire.


Wraps Are Safe Points
---------------------

A wrap is the only instant where something that is being read continuously
(a looping voice) starts over. It is the natural place to apply pending
parameter changes and to fire scheduled spawns: nothing is mid-cycle.

We use f64 for the phase. At long intervals the increment is tiny and f32
accumulation error would visibly shift event timing after a few minutes.
*/

/// A phase accumulator in `[0, 1)` that reports wraps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phasor {
    phase: f64,
}

impl Phasor {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Advance by `increment` and return `true` if the phase wrapped.
    ///
    /// Increments of a full cycle or more collapse into a single wrap.
    #[inline]
    pub fn advance(&mut self, increment: f64) -> bool {
        self.phase += increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            if self.phase >= 1.0 {
                self.phase = self.phase.fract();
            }
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Samples between two scheduler wraps.
#[inline]
pub fn interval_samples(sample_rate: f32, rate_ms: f32) -> f64 {
    (rate_ms as f64 / 1000.0) * sample_rate as f64
}

/// Fires spawn events at a rate given in milliseconds.
///
/// The scheduler does not validate `rate_ms`. A non-positive rate produces a
/// meaningless increment, so callers clamp it to at least 1 ms first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateScheduler {
    phasor: Phasor,
}

impl RateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one sample. Returns `true` on the sample where a wrap occurs.
    #[inline]
    pub fn advance(&mut self, sample_rate: f32, rate_ms: f32) -> bool {
        debug_assert!(rate_ms > 0.0 && sample_rate > 0.0);
        self.phasor
            .advance(1.0 / interval_samples(sample_rate, rate_ms))
    }

    pub fn phase(&self) -> f64 {
        self.phasor.phase()
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }
}
