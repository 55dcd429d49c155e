//! Synthesized source material, so the demo runs without any audio files

use std::f32::consts::TAU;

/// Partials of a minor seventh chord, in Hz.
const PARTIALS: [f32; 4] = [220.0, 261.63, 329.63, 392.0];

/// A stereo chord whose partials fade in one after another.
///
/// The left channel leans on the low partials and the right on the high
/// ones, so grains read from different positions sound different.
pub fn chord(sample_rate: f32, seconds: f32) -> Vec<Vec<f32>> {
    let frames = (sample_rate * seconds) as usize;
    let mut left = vec![0.0; frames];
    let mut right = vec![0.0; frames];

    for (n, &freq) in PARTIALS.iter().enumerate() {
        let onset = n as f32 / PARTIALS.len() as f32;
        let pan = n as f32 / (PARTIALS.len() - 1) as f32;
        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            let t = i as f32 / sample_rate;
            let progress = i as f32 / frames as f32;
            let level = ((progress - onset) * 4.0).clamp(0.0, 1.0) * 0.2;
            let sample = (TAU * freq * t).sin() * level;
            *l += sample * (1.0 - pan);
            *r += sample * pan;
        }
    }

    vec![left, right]
}
