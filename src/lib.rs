pub mod config;
pub mod control; // Pending/committed parameters and the control queue
pub mod dsp;
pub mod engine; // Spawn engines and phasor players
pub mod error;
pub mod io;
pub mod store; // Sample store access, spans, channel sets
pub mod synth; // Voices, voice pool, spawn factories

pub use config::{EngineConfig, PlayerConfig};
pub use engine::{
    phasor::PhasorPlayer,
    poly::PolyPlayer,
    spawn::{GrainEngine, TriggerEngine},
    Player,
};
pub use error::{ConfigError, StoreError};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Output channels a single voice can carry.
pub const MAX_CHANNELS: usize = 2;

/// One output frame, one sample per channel. Unused channels stay at zero.
pub type Frame = [f32; MAX_CHANNELS];
