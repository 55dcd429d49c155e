//! Benchmarks for the grain trapezoid and phase-edge fade.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use grainer::dsp::envelope::{phase_fade, GrainEnvelope};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // A grain wide enough that one block stays inside the fade-in
        let grain = GrainEnvelope::new(10_000, 20_000);
        group.bench_with_input(BenchmarkId::new("grain_fade_in", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = grain.gain(black_box(10_000.0 + i as f64 * 1.5));
                }
            })
        });

        // Short grain: one block crosses every stage
        let short = GrainEnvelope::new(0, size);
        group.bench_with_input(BenchmarkId::new("grain_all_stages", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = short.gain(black_box(i as f64));
                }
            })
        });

        let step = 1.0 / size as f64;
        group.bench_with_input(BenchmarkId::new("phase_fade", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = phase_fade(black_box(i as f64 * step));
                }
            })
        });
    }

    group.finish();
}
