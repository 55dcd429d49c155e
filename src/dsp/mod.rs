//! Low-level DSP primitives used by the voices and players.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the per-sample
//! math so the pool and players can layer on scheduling and control.

/// Grain trapezoid and phase-edge fades.
pub mod envelope;
/// Summing voice frames into output blocks.
pub mod mix;
/// Phase accumulators and the millisecond-rate spawn scheduler.
pub mod phasor;

pub use envelope::{phase_fade, GrainEnvelope};
pub use mix::Mixdown;
pub use phasor::{Phasor, RateScheduler};
