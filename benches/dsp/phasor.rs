//! Benchmarks for phase accumulators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use grainer::dsp::phasor::{Phasor, RateScheduler};

use crate::BLOCK_SIZES;

pub fn bench_phasor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/phasor");

    for &size in BLOCK_SIZES {
        // Looping playback rate: 1 Hz at 48 kHz
        let mut phasor = Phasor::new();
        let increment = 1.0 / 48_000.0;
        group.bench_with_input(BenchmarkId::new("advance", size), &size, |b, &size| {
            b.iter(|| {
                let mut wraps = 0;
                for _ in 0..size {
                    wraps += phasor.advance(black_box(increment)) as u32;
                }
                wraps
            })
        });

        // Spawn scheduler at 1 ms, so wraps are frequent
        let mut scheduler = RateScheduler::new();
        group.bench_with_input(BenchmarkId::new("scheduler_1ms", size), &size, |b, &size| {
            b.iter(|| {
                let mut wraps = 0;
                for _ in 0..size {
                    wraps += scheduler.advance(black_box(48_000.0), black_box(1.0)) as u32;
                }
                wraps
            })
        });
    }

    group.finish();
}
