//! Benchmarks for low-level DSP primitives.

mod envelope;
mod mix;
mod phasor;

pub use envelope::bench_envelope;
pub use mix::bench_mix;
pub use phasor::bench_phasor;
