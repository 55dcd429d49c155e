// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

/// One block of non-interleaved output, one `Vec` per channel.
#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    /// A silent block of `channels` × `frames`.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    /// Frames per channel (the shortest channel, if they differ).
    pub fn frames(&self) -> usize {
        self.buffers.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Resize to `channels` × `frames`. Only allocates when growing.
    pub fn resize(&mut self, channels: usize, frames: usize) {
        self.buffers.resize_with(channels, Vec::new);
        for buffer in &mut self.buffers {
            buffer.resize(frames, 0.0);
        }
    }

    /// Copy the block into an interleaved host buffer.
    ///
    /// Device channel `c` takes output channel `c % channels()`, so a mono
    /// block is copied to every device channel.
    pub fn interleave_into(&self, data: &mut [f32], device_channels: usize) {
        if device_channels == 0 || self.buffers.is_empty() {
            data.fill(0.0);
            return;
        }
        for (frame_index, frame) in data.chunks_mut(device_channels).enumerate() {
            for (c, sample) in frame.iter_mut().enumerate() {
                let source = &self.buffers[c % self.buffers.len()];
                *sample = source.get(frame_index).copied().unwrap_or(0.0);
            }
        }
    }
}
