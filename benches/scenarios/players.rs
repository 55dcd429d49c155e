//! Benchmarks for the looping phasor players.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use grainer::{
    control::ControlMessage, io::AudioOutput, store::MemoryStore, PhasorPlayer, Player,
    PlayerConfig, PolyPlayer,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;
const STORE_FRAMES: usize = 2 * 48_000;

fn store(name: &str) -> MemoryStore {
    let samples = (0..STORE_FRAMES)
        .map(|i| (i as f32 * 0.02).sin() * 0.5)
        .collect();
    let mut store = MemoryStore::new();
    store
        .insert_mono(name, samples)
        .expect("bench store is well formed");
    store
}

pub fn bench_players(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/players");
    let minimal_store = store("polyphonicPlayback");
    let poly_store = store("polyphonicPlaybackBuf");

    for &size in BLOCK_SIZES {
        let mut out = AudioOutput::new(1, size);

        let config = PlayerConfig::minimal().with_sample_rate(SAMPLE_RATE);
        let mut phasor = PhasorPlayer::new(config).expect("valid config");
        phasor.control(&minimal_store, ControlMessage::SpanEnd(STORE_FRAMES as f32));

        group.bench_with_input(BenchmarkId::new("phasor", size), &size, |b, _| {
            b.iter(|| phasor.render(black_box(&minimal_store), black_box(&mut out)))
        });

        // All six voices busy
        let config = PlayerConfig::polyphonic().with_sample_rate(SAMPLE_RATE);
        let mut poly = PolyPlayer::new(config).expect("valid config");
        poly.control(&poly_store, ControlMessage::SpanEnd(STORE_FRAMES as f32));
        for note in 0..6 {
            poly.note_on(60 + note, 100);
        }

        group.bench_with_input(BenchmarkId::new("poly_6_voices", size), &size, |b, _| {
            b.iter(|| poly.render(black_box(&poly_store), black_box(&mut out)))
        });
    }

    group.finish();
}
