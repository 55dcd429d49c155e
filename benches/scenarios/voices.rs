//! Benchmarks for the rate-scheduled spawn engines.
//!
//! Engines are warmed up until the pool is full, then measured per block.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use grainer::{
    control::ControlMessage, io::AudioOutput, store::MemoryStore, EngineConfig, GrainEngine,
    Player, TriggerEngine,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;
const STORE_FRAMES: usize = 10 * 48_000;

fn store(name: &str) -> MemoryStore {
    let left: Vec<f32> = (0..STORE_FRAMES)
        .map(|i| (i as f32 * 0.01).sin() * 0.5)
        .collect();
    let right = left.iter().map(|s| s * 0.8).collect();
    let mut store = MemoryStore::new();
    store
        .insert(name, vec![left, right])
        .expect("bench store is well formed");
    store
}

fn warm_up<P: Player>(player: &mut P, store: &MemoryStore) {
    let mut out = AudioOutput::new(2, 512);
    for _ in 0..200 {
        player.render(store, &mut out);
    }
}

pub fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engines");
    let grain_store = store("grainer");
    let trigger_store = store("trigger");

    for &size in BLOCK_SIZES {
        let mut out = AudioOutput::new(2, size);

        // === DEFAULT GRAINS ===
        // 8 voices, a spawn every 100 ms
        let config = EngineConfig::granular()
            .with_sample_rate(SAMPLE_RATE)
            .with_seed(1);
        let mut grains = GrainEngine::new(config).expect("valid config");
        grains.control(&grain_store, ControlMessage::SpanEnd(STORE_FRAMES as f32));
        warm_up(&mut grains, &grain_store);

        group.bench_with_input(BenchmarkId::new("grain_default", size), &size, |b, _| {
            b.iter(|| grains.render(black_box(&grain_store), black_box(&mut out)))
        });

        // === DENSE GRAINS ===
        // 32 voices, a spawn every millisecond: the pool stays saturated
        let config = EngineConfig::granular()
            .with_sample_rate(SAMPLE_RATE)
            .with_capacity(32)
            .with_rate_ms(1.0)
            .with_max_speed(2.0)
            .with_seed(2);
        let mut dense = GrainEngine::new(config).expect("valid config");
        dense.control(&grain_store, ControlMessage::SpanEnd(STORE_FRAMES as f32));
        warm_up(&mut dense, &grain_store);

        group.bench_with_input(BenchmarkId::new("grain_dense_32", size), &size, |b, _| {
            b.iter(|| dense.render(black_box(&grain_store), black_box(&mut out)))
        });

        // === TRIGGERS ===
        // 10 whole-buffer one-shots
        let config = EngineConfig::trigger()
            .with_sample_rate(SAMPLE_RATE)
            .with_rate_ms(50.0)
            .with_seed(3);
        let mut triggers = TriggerEngine::new(config).expect("valid config");
        warm_up(&mut triggers, &trigger_store);

        group.bench_with_input(BenchmarkId::new("trigger_10", size), &size, |b, _| {
            b.iter(|| triggers.render(black_box(&trigger_store), black_box(&mut out)))
        });
    }

    group.finish();
}
