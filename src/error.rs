//! Construction-time errors.
//!
//! Nothing on the render path returns an error: an unavailable store renders
//! silence, bad control values are clamped or ignored, and a full voice pool
//! simply refuses the spawn. These types only surface while building engines
//! and stores.

/// Error types for engine and player configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    #[error("Voice capacity must be at least 1")]
    ZeroCapacity,

    #[error("Store name must not be empty")]
    EmptyStoreName,

    #[error("Channel set must name 1 or 2 channels, got {0}")]
    InvalidChannelCount(usize),

    #[error("Minimum grain size must be at least 1 frame")]
    ZeroMinGrainSize,

    #[error("Initial rate must be positive and finite, got {0}")]
    InvalidRate(f32),
}

/// Error types for in-memory sample stores
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store name must not be empty")]
    EmptyName,

    #[error("Store {0} has no channels")]
    NoChannels(String),

    #[error("Store {name} channel {channel} has {len} frames, expected {expected}")]
    ChannelLengthMismatch {
        name: String,
        channel: usize,
        len: usize,
        expected: usize,
    },
}
