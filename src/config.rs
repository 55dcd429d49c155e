//! Player configuration.
//!
//! Configs are plain data with builder-style setters. Initial control values
//! go through the same clamp-on-write rules as live control input when a
//! player is built, so a config can only be rejected for structural reasons
//! (see [`ConfigError`]).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, store::ChannelSet, MAX_CHANNELS};

fn check_common(sample_rate: f32, store: &str, channels: &ChannelSet) -> Result<(), ConfigError> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(ConfigError::InvalidSampleRate(sample_rate));
    }
    if store.is_empty() {
        return Err(ConfigError::EmptyStoreName);
    }
    if channels.is_empty() || channels.len() > MAX_CHANNELS {
        return Err(ConfigError::InvalidChannelCount(channels.len()));
    }
    Ok(())
}

/// Configuration for the rate-scheduled spawn engines (grain and trigger).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Name of the buffer in the sample store.
    pub store: String,
    /// Store channels to read, in output order.
    pub channels: ChannelSet,
    /// Maximum concurrent voices (K).
    pub capacity: usize,
    /// Shortest grain, in frames. Unused by the trigger engine.
    pub min_grain_size: usize,
    pub rate_ms: f32,
    pub max_speed: f32,
    pub overall_speed: f32,
    pub volume_floor: f32,
    /// Seed for the spawn RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Randomized grains: 8 voices, a spawn every 100 ms, 3500-frame minimum.
    pub fn granular() -> Self {
        Self {
            sample_rate: 44_100.0,
            store: "grainer".into(),
            channels: ChannelSet::stereo(0, 1),
            capacity: 8,
            min_grain_size: 3500,
            rate_ms: 100.0,
            max_speed: 1.0,
            overall_speed: 1.0,
            volume_floor: 1.0,
            seed: None,
        }
    }

    /// Whole-buffer one-shots: 10 voices, a trigger every second.
    pub fn trigger() -> Self {
        Self {
            store: "trigger".into(),
            capacity: 10,
            rate_ms: 1000.0,
            ..Self::granular()
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    pub fn with_channels(mut self, channels: ChannelSet) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_min_grain_size(mut self, frames: usize) -> Self {
        self.min_grain_size = frames;
        self
    }

    pub fn with_rate_ms(mut self, rate_ms: f32) -> Self {
        self.rate_ms = rate_ms;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_overall_speed(mut self, overall_speed: f32) -> Self {
        self.overall_speed = overall_speed;
        self
    }

    pub fn with_volume_floor(mut self, volume_floor: f32) -> Self {
        self.volume_floor = volume_floor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_common(self.sample_rate, &self.store, &self.channels)?;
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.min_grain_size == 0 {
            return Err(ConfigError::ZeroMinGrainSize);
        }
        if !(self.rate_ms.is_finite() && self.rate_ms > 0.0) {
            return Err(ConfigError::InvalidRate(self.rate_ms));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::granular()
    }
}

/// Configuration for the looping phasor players.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub sample_rate: f32,
    pub store: String,
    pub channels: ChannelSet,
    /// Loop rate in cycles per second.
    pub rate_hz: f32,
    /// Voice slots. The minimal player always uses one.
    pub voices: usize,
}

impl PlayerConfig {
    /// One looping voice over mono channel 0.
    pub fn minimal() -> Self {
        Self {
            sample_rate: 44_100.0,
            store: "polyphonicPlayback".into(),
            channels: ChannelSet::mono(0),
            rate_hz: 1.0,
            voices: 1,
        }
    }

    /// Six note-keyed looping voices.
    pub fn polyphonic() -> Self {
        Self {
            store: "polyphonicPlaybackBuf".into(),
            voices: 6,
            ..Self::minimal()
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    pub fn with_channels(mut self, channels: ChannelSet) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_rate_hz(mut self, rate_hz: f32) -> Self {
        self.rate_hz = rate_hz;
        self
    }

    pub fn with_voices(mut self, voices: usize) -> Self {
        self.voices = voices;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_common(self.sample_rate, &self.store, &self.channels)?;
        if self.voices == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.rate_hz.is_finite() && self.rate_hz > 0.0) {
            return Err(ConfigError::InvalidRate(self.rate_hz));
        }
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::minimal()
    }
}
