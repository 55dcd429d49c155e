/*
Playback Envelopes
==================

A voice that starts or stops reading a sample in the middle of a waveform
produces a click: the output jumps from zero to whatever the sample holds.
An envelope is a gain multiplier that ramps up at the start and down at the
end so every voice begins and ends at silence.

Vocabulary
----------

  gain        The envelope's output (0.0 to 1.0), multiplied into each sample.

  position    Where the envelope is evaluated. For grains this is the voice's
              read cursor in frames; for phasor players it is the phase.

  fade-in     The rising ramp at the start.

  hold        The flat region at full gain.

  fade-out    The falling ramp at the end.


Grain Shape: 20 / 60 / 20 Trapezoid
-----------------------------------

  Gain
    1.0 ┐      ┌────────────────┐
        │     ╱                  ╲
        │    ╱                    ╲
    0.0 └───╱──────────────────────╲──→ cursor
          start  +0.2 len   +0.8 len  end

The boundaries sit at start + 0.2·length and start + 0.8·length. Each ramp is
therefore a fifth of the grain and the hold is the middle three fifths:

    cursor < fade_in_end     gain = (cursor - start) / (fade_in_end - start)
    cursor > fade_out_start  gain = (end - cursor) / (end - fade_out_start)
    otherwise                gain = 1.0

The envelope is measured in frames of the store, not in output samples. A
grain played at speed 3 covers its fade-in three times as fast, so the ramp
always spans the same slice of the source material.


Phasor Shape: 10% Edges On Phase
--------------------------------

Looping phasor players read the span once per cycle. Their envelope is
measured against the phase in [0, 1), so it does not depend on span length
or rate:

    phase < 0.1   gain = phase / 0.1
    phase > 0.9   gain = (1.0 - phase) / 0.1
    otherwise     gain = 1.0

The loop point (phase 0 ≡ 1) is then always silent, which hides the jump back
to the start of the span.


Implementation Notes
--------------------

Both shapes are pure functions of position. Nothing is stored per sample, so
an envelope can be queried any number of times and costs a couple of
comparisons and one division. Results are clamped into [0, 1]: a grain whose
end was clipped by the store's length can otherwise land outside the ramps.
*/

/// Fraction of a grain's length at which the fade-in ends.
pub const GRAIN_FADE_IN_END: f64 = 0.2;
/// Fraction of a grain's length at which the fade-out begins.
pub const GRAIN_FADE_OUT_START: f64 = 0.8;
/// Width of each fade on a phasor player's phase.
pub const PHASE_FADE_WIDTH: f64 = 0.1;

/// Which ramp a position falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    FadeIn,
    Hold,
    FadeOut,
}

/// Trapezoid envelope over a grain's frame range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainEnvelope {
    start: f64,
    fade_in_end: f64,
    fade_out_start: f64,
    end: f64,
}

impl GrainEnvelope {
    /// Envelope for a grain covering frames `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        let start = start as f64;
        let end = end as f64;
        let length = end - start;
        Self {
            start,
            fade_in_end: start + GRAIN_FADE_IN_END * length,
            fade_out_start: start + GRAIN_FADE_OUT_START * length,
            end,
        }
    }

    pub fn stage(&self, position: f64) -> EnvelopeStage {
        if position < self.fade_in_end {
            EnvelopeStage::FadeIn
        } else if position > self.fade_out_start {
            EnvelopeStage::FadeOut
        } else {
            EnvelopeStage::Hold
        }
    }

    /// Gain at a cursor position, in `[0, 1]`. An empty range is silent.
    #[inline]
    pub fn gain(&self, position: f64) -> f32 {
        if self.end <= self.start {
            return 0.0;
        }
        let gain = match self.stage(position) {
            EnvelopeStage::FadeIn => (position - self.start) / (self.fade_in_end - self.start),
            EnvelopeStage::FadeOut => (self.end - position) / (self.end - self.fade_out_start),
            EnvelopeStage::Hold => 1.0,
        };
        gain.clamp(0.0, 1.0) as f32
    }
}

/// Symmetric 10% fade measured on a phase in `[0, 1)`.
#[inline]
pub fn phase_fade(phase: f64) -> f32 {
    let gain = if phase < PHASE_FADE_WIDTH {
        phase / PHASE_FADE_WIDTH
    } else if phase > 1.0 - PHASE_FADE_WIDTH {
        (1.0 - phase) / PHASE_FADE_WIDTH
    } else {
        1.0
    };
    gain.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn grain_is_silent_at_both_edges() {
        let env = GrainEnvelope::new(100, 1100);
        assert!(env.gain(100.0).abs() < EPS);
        assert!(env.gain(1100.0).abs() < EPS);
    }

    #[test]
    fn grain_is_full_in_the_middle() {
        let env = GrainEnvelope::new(100, 1100);
        assert!((env.gain(600.0) - 1.0).abs() < EPS);
        assert_eq!(env.stage(600.0), EnvelopeStage::Hold);
    }

    #[test]
    fn grain_uses_twenty_percent_ramps() {
        // 1000-frame grain: ramps end at +200 and start at +800
        let env = GrainEnvelope::new(0, 1000);
        assert!((env.gain(100.0) - 0.5).abs() < EPS);
        assert!((env.gain(200.0) - 1.0).abs() < EPS);
        assert!((env.gain(800.0) - 1.0).abs() < EPS);
        assert!((env.gain(900.0) - 0.5).abs() < EPS);
        // a 10% ramp would already be at full gain here
        assert!(env.gain(150.0) < 0.8);
    }

    #[test]
    fn grain_gain_is_clamped_past_the_end() {
        let env = GrainEnvelope::new(0, 50);
        assert_eq!(env.gain(75.0), 0.0);
        assert_eq!(env.gain(-5.0), 0.0);
    }

    #[test]
    fn phase_fade_edges() {
        assert!(phase_fade(0.0).abs() < EPS);
        assert!((phase_fade(0.05) - 0.5).abs() < EPS);
        assert!((phase_fade(0.5) - 1.0).abs() < EPS);
        assert!((phase_fade(0.95) - 0.5).abs() < 1e-5);
        assert!(phase_fade(0.999_999) < 1e-4);
    }

    #[test]
    fn empty_grain_is_silent_not_nan() {
        let env = GrainEnvelope::new(500, 500);
        for position in [499.0, 500.0, 501.0] {
            assert_eq!(env.gain(position), 0.0);
        }
    }
}
