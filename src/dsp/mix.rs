//! Mixdown of concurrent voices into an output block.

/*
Voice Mixdown
=============

Every active voice produces one frame per output sample. The mixdown stage
adds those frames together, per channel, and writes the sum into the block.

    out[ch][i] = Σ voice_frame[ch] × voice_gain        (over active voices)

Vocabulary
----------

  frame       One sample per channel at a single instant. Voices hand back
              fixed-size frames ([f32; MAX_CHANNELS]) so nothing allocates.

  summing     Plain addition, no weighting. A pool of K voices at full level
              can peak at K × 1.0, so the per-voice random gain and the
              envelopes are what keep the sum in range. No limiter is applied.

  block       The host's output buffer: one Vec<f32> per output channel,
              non-interleaved.


Clipping Risk
-------------

Summing is unweighted on purpose: halving every voice when a second one
starts would make the level pump as grains come and go. Two grains that both
peak at 0.8 can sum to 1.6. Hosts that care apply gain after the engine.
*/

use crate::{Frame, MAX_CHANNELS};

/// Running sum of voice frames for one output sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mixdown {
    sum: Frame,
}

impl Mixdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new output sample.
    #[inline]
    pub fn clear(&mut self) {
        self.sum = [0.0; MAX_CHANNELS];
    }

    /// Add a voice's frame, scaled by `gain`.
    #[inline]
    pub fn add(&mut self, frame: &Frame, gain: f32) {
        for (acc, &sample) in self.sum.iter_mut().zip(frame.iter()) {
            *acc += sample * gain;
        }
    }

    #[inline]
    pub fn frame(&self) -> Frame {
        self.sum
    }

    /// Write the sum into sample `index` of every output channel.
    #[inline]
    pub fn write(&self, buffers: &mut [Vec<f32>], index: usize) {
        write_frame(buffers, index, &self.sum);
    }
}

/// Write one frame into sample `index` of each channel buffer.
///
/// Output channels beyond [`MAX_CHANNELS`] are left untouched.
#[inline]
pub fn write_frame(buffers: &mut [Vec<f32>], index: usize, frame: &Frame) {
    for (buffer, &sample) in buffers.iter_mut().zip(frame.iter()) {
        if let Some(slot) = buffer.get_mut(index) {
            *slot = sample;
        }
    }
}

/// Zero every channel of a block.
#[inline]
pub fn silence(buffers: &mut [Vec<f32>]) {
    for buffer in buffers.iter_mut() {
        buffer.fill(0.0);
    }
}
