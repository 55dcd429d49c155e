//! Sample store access.
//!
//! The store itself is owned by the host: a set of named, multi-channel audio
//! buffers. Engines only ever read from it through [`SampleStore`], one sample
//! at a time, and re-query the frame count every block because a store may be
//! (re)loaded at any moment.

mod memory;

pub use memory::MemoryStore;

use crate::{Frame, MAX_CHANNELS};

/// Read-only view of a named, indexable, multi-channel sample store.
pub trait SampleStore {
    /// Number of frames in `name`. Zero means the store is missing or empty.
    fn frame_count(&self, name: &str) -> usize;

    /// One sample of `channel` at `frame`.
    ///
    /// Callers always pass `frame < frame_count(name)`; reaching the store with
    /// anything else is a bug in the caller.
    fn peek(&self, name: &str, channel: usize, frame: usize) -> f32;
}

impl<T: SampleStore + ?Sized> SampleStore for &T {
    fn frame_count(&self, name: &str) -> usize {
        (**self).frame_count(name)
    }

    fn peek(&self, name: &str, channel: usize, frame: usize) -> f32 {
        (**self).peek(name, channel, frame)
    }
}

impl<T: SampleStore + ?Sized> SampleStore for std::sync::Arc<T> {
    fn frame_count(&self, name: &str) -> usize {
        (**self).frame_count(name)
    }

    fn peek(&self, name: &str, channel: usize, frame: usize) -> f32 {
        (**self).peek(name, channel, frame)
    }
}

/// Read one frame of `channels` from the store.
#[inline]
pub fn read_frame<S: SampleStore + ?Sized>(
    store: &S,
    name: &str,
    channels: &ChannelSet,
    frame: usize,
) -> Frame {
    let mut out = [0.0; MAX_CHANNELS];
    for (slot, channel) in out.iter_mut().zip(channels.iter()) {
        *slot = store.peek(name, channel, frame);
    }
    out
}

/// A half-open range of frames `[start, end)` inside a store.
///
/// Spans handed to voices always satisfy `end > start`. A voice copies its span
/// at spawn time and never sees later edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSpan {
    pub start: usize,
    pub end: usize,
}

impl SampleSpan {
    /// Create a span, or `None` if it would be empty.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Build a committed span from raw pending values.
    ///
    /// `start` is clamped into `[0, frames - 1]` and `end` into
    /// `[start + 1, frames]`, so the result is never empty even when the
    /// pending values arrive inverted. `frames` must be non-zero.
    pub fn committed(pending_start: usize, pending_end: usize, frames: usize) -> Self {
        debug_assert!(frames > 0);
        let start = pending_start.min(frames.saturating_sub(1));
        let end = pending_end.min(frames).max(start + 1);
        Self { start, end }
    }

    /// The whole store: `[0, frames)`.
    pub fn full(frames: usize) -> Option<Self> {
        Self::new(0, frames)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Round a fractional position to a frame index inside `[start, end - 1]`.
    #[inline]
    pub fn clamp_index(&self, position: f64) -> usize {
        let last = self.end.saturating_sub(1).max(self.start);
        let rounded = position.round();
        if rounded <= self.start as f64 {
            self.start
        } else if rounded >= last as f64 {
            last
        } else {
            rounded as usize
        }
    }
}

/// The store channels a player reads, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelSet {
    channels: [usize; MAX_CHANNELS],
    len: usize,
}

impl ChannelSet {
    pub fn mono(channel: usize) -> Self {
        Self {
            channels: [channel; MAX_CHANNELS],
            len: 1,
        }
    }

    pub fn stereo(left: usize, right: usize) -> Self {
        Self {
            channels: [left, right],
            len: 2,
        }
    }

    /// Build from a slice of store channel indices.
    ///
    /// Returns `None` for an empty slice or more than [`MAX_CHANNELS`] entries.
    pub fn from_slice(channels: &[usize]) -> Option<Self> {
        if channels.is_empty() || channels.len() > MAX_CHANNELS {
            return None;
        }
        let mut set = [0; MAX_CHANNELS];
        set[..channels.len()].copy_from_slice(channels);
        Some(Self {
            channels: set,
            len: channels.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.channels[..self.len].iter().copied()
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::stereo(0, 1)
    }
}
