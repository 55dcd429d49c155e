//! grainer - play the sample engines through the default output device
//!
//! Run with: cargo run -- grain --seconds 20

mod app;
mod source;

use std::{f32::consts::TAU, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::Output;
use grainer::{
    control::{ControlHandle, ControlMessage},
    store::MemoryStore,
    EngineConfig, GrainEngine, PhasorPlayer, Player, PlayerConfig, PolyPlayer, TriggerEngine,
};

#[derive(Parser)]
#[command(version, about = "Realtime grain and voice playback demo.")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
    /// How long to play, in seconds.
    #[arg(short, long, global = true, default_value_t = 10.0)]
    seconds: f32,
    /// Seed for the spawn RNG.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Clone, Copy)]
enum Mode {
    /// Randomized grains from a slowly wandering span.
    Grain {
        /// Spawn interval in milliseconds.
        #[arg(long, default_value_t = 100.0)]
        rate_ms: f32,
        /// Maximum concurrent grains.
        #[arg(long, default_value_t = 8)]
        voices: usize,
    },
    /// Whole-buffer one-shots.
    Trigger {
        /// Trigger interval in milliseconds.
        #[arg(long, default_value_t = 1000.0)]
        rate_ms: f32,
        /// Maximum concurrent one-shots.
        #[arg(long, default_value_t = 10)]
        voices: usize,
    },
    /// One looping voice; span changes land on the loop boundary.
    Phasor {
        /// Loop rate in cycles per second.
        #[arg(long, default_value_t = 1.0)]
        rate_hz: f32,
    },
    /// Note-keyed looping voices, one new note every second and a half.
    Poly {
        /// Loop rate in cycles per second.
        #[arg(long, default_value_t = 0.5)]
        rate_hz: f32,
    },
}

/// Seconds of synthesized source material.
const SOURCE_SECONDS: f32 = 4.0;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let output = Output::open()?;
    let sample_rate = output.sample_rate();
    let seconds = cli.seconds;

    match cli.mode {
        Mode::Grain { rate_ms, voices } => {
            let mut config = EngineConfig::granular()
                .with_sample_rate(sample_rate)
                .with_rate_ms(rate_ms)
                .with_capacity(voices)
                .with_overall_speed(0.1);
            config.seed = cli.seed;
            let player = GrainEngine::new(config).wrap_err("invalid grain settings")?;
            let (store, frames) = load(&player, sample_rate)?;
            output.play(player, store, seconds, move |handle, elapsed| {
                sweep_span(handle, elapsed, frames, 0.15);
            })
        }
        Mode::Trigger { rate_ms, voices } => {
            let mut config = EngineConfig::trigger()
                .with_sample_rate(sample_rate)
                .with_rate_ms(rate_ms)
                .with_capacity(voices)
                .with_max_speed(2.0)
                .with_volume_floor(0.4);
            config.seed = cli.seed;
            let player = TriggerEngine::new(config).wrap_err("invalid trigger settings")?;
            let (store, _) = load(&player, sample_rate)?;
            output.play(player, store, seconds, |_, _| {})
        }
        Mode::Phasor { rate_hz } => {
            let config = PlayerConfig::minimal()
                .with_sample_rate(sample_rate)
                .with_rate_hz(rate_hz);
            let player = PhasorPlayer::new(config).wrap_err("invalid phasor settings")?;
            let (store, frames) = load(&player, sample_rate)?;
            output.play(player, store, seconds, move |handle, elapsed| {
                sweep_span(handle, elapsed, frames, 0.3);
            })
        }
        Mode::Poly { rate_hz } => {
            let config = PlayerConfig::polyphonic()
                .with_sample_rate(sample_rate)
                .with_rate_hz(rate_hz);
            let player = PolyPlayer::new(config).wrap_err("invalid poly settings")?;
            let (store, frames) = load(&player, sample_rate)?;
            let mut next_note = Duration::ZERO;
            let mut note = 48u8;
            let mut primed = false;
            output.play(player, store, seconds, move |handle, elapsed| {
                if !primed {
                    handle.set_span(0.0, frames as f32 * 0.5);
                    primed = true;
                }
                if elapsed >= next_note {
                    info!(note, "Note on");
                    handle.note_on(note, 100);
                    note = 48 + (note - 48 + 7) % 24;
                    next_note += Duration::from_millis(1500);
                }
            })
        }
    }
}

/// Synthesize the source buffer under the player's store name.
fn load<P: Player>(player: &P, sample_rate: f32) -> EyreResult<(Arc<MemoryStore>, usize)> {
    let buffer = source::chord(sample_rate, SOURCE_SECONDS);
    let frames = buffer[0].len();
    let mut store = MemoryStore::new();
    store
        .insert(player.store_name(), buffer)
        .wrap_err("failed to load source buffer")?;
    Ok((Arc::new(store), frames))
}

/// Move a span of `width` (fraction of the store) slowly back and forth.
fn sweep_span(handle: &mut ControlHandle, elapsed: Duration, frames: usize, width: f32) {
    let t = elapsed.as_secs_f32();
    let travel = 1.0 - width;
    let position = 0.5 * travel * (1.0 + (TAU * t / 16.0).sin());
    let start = position * frames as f32;
    let end = start + width * frames as f32;
    handle.send(ControlMessage::SpanStart(start));
    handle.send(ControlMessage::SpanEnd(end));
}
