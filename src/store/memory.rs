use std::collections::HashMap;

use tracing::debug;

use super::SampleStore;
use crate::error::StoreError;

/// Planar, non-interleaved buffer: one `Vec` per channel.
#[derive(Debug, Clone)]
struct Buffer {
    channels: Vec<Vec<f32>>,
    frames: usize,
}

/// A `SampleStore` backed by owned buffers.
///
/// Used by the demo binary, tests and benches. Buffers are loaded from the
/// control side before playback; reads never allocate.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    buffers: HashMap<String, Buffer>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a named buffer. All channels must have the same length.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        channels: Vec<Vec<f32>>,
    ) -> Result<(), StoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let Some(first) = channels.first() else {
            return Err(StoreError::NoChannels(name));
        };
        let frames = first.len();
        if let Some((channel, data)) = channels
            .iter()
            .enumerate()
            .find(|(_, data)| data.len() != frames)
        {
            return Err(StoreError::ChannelLengthMismatch {
                name,
                channel,
                len: data.len(),
                expected: frames,
            });
        }

        debug!(
            store = %name,
            channels = channels.len(),
            frames,
            "Registered sample buffer"
        );
        self.buffers.insert(name, Buffer { channels, frames });
        Ok(())
    }

    /// Insert a single-channel buffer.
    pub fn insert_mono(
        &mut self,
        name: impl Into<String>,
        samples: Vec<f32>,
    ) -> Result<(), StoreError> {
        self.insert(name, vec![samples])
    }

    /// Remove a buffer. Players reading it fall silent on their next block.
    pub fn remove(&mut self, name: &str) -> bool {
        self.buffers.remove(name).is_some()
    }

    pub fn channel_count(&self, name: &str) -> usize {
        self.buffers.get(name).map_or(0, |b| b.channels.len())
    }
}

impl SampleStore for MemoryStore {
    fn frame_count(&self, name: &str) -> usize {
        self.buffers.get(name).map_or(0, |b| b.frames)
    }

    fn peek(&self, name: &str, channel: usize, frame: usize) -> f32 {
        self.buffers
            .get(name)
            .and_then(|b| b.channels.get(channel))
            .and_then(|c| c.get(frame))
            .copied()
            .unwrap_or(0.0)
    }
}
