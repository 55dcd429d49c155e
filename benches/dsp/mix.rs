//! Benchmarks for frame accumulation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use grainer::dsp::mix::{silence, Mixdown};

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let mut buffers = vec![vec![0.0f32; size]; 2];
        let frames: Vec<[f32; 2]> = (0..size)
            .map(|i| [(i as f32 * 0.1).sin(), (i as f32 * 0.15).cos()])
            .collect();

        // Eight voices summed per output sample, the default grain capacity
        let mut mix = Mixdown::new();
        group.bench_with_input(BenchmarkId::new("mixdown_8_voices", size), &size, |b, _| {
            b.iter(|| {
                for (i, frame) in frames.iter().enumerate() {
                    mix.clear();
                    for voice in 0..8 {
                        mix.add(black_box(frame), 0.1 * voice as f32);
                    }
                    mix.write(&mut buffers, i);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("silence", size), &size, |b, _| {
            b.iter(|| silence(black_box(&mut buffers)))
        });
    }

    group.finish();
}
