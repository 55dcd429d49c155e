//! Players: the block-synchronous surface hosts drive.
//!
//! Four variants share one shape. The spawn engines ([`GrainEngine`],
//! [`TriggerEngine`]) fire new voices from a rate scheduler into a bounded
//! pool; the phasor players ([`PhasorPlayer`], [`PolyPlayer`]) loop a span
//! continuously. All of them take control input through [`Player::apply`]
//! and produce audio through [`Player::render`].

pub mod phasor;
pub mod poly;
pub mod spawn;

pub use phasor::{PhasorPlayer, PhasorVoice};
pub use poly::PolyPlayer;
pub use spawn::{GrainEngine, SpawnEngine, TriggerEngine};

use crate::{
    control::message::{ControlMessage, MessageReceiver},
    io::AudioOutput,
    store::SampleStore,
};

/// A block-rendering sample player.
///
/// `render` runs in the audio context: it never blocks, never allocates and
/// never fails. An unavailable store renders silence.
pub trait Player: Send {
    /// Name of the buffer this player reads.
    fn store_name(&self) -> &str;

    /// Output channels written by `render`.
    fn output_channels(&self) -> usize;

    /// Apply one control message against a store of `frames` frames.
    ///
    /// `frames` is non-zero. Messages that do not apply to this player are
    /// ignored.
    fn apply(&mut self, msg: ControlMessage, frames: usize);

    /// Fill every frame of `out`.
    fn render<S: SampleStore + ?Sized>(&mut self, store: &S, out: &mut AudioOutput);

    /// Apply one control message, looking up the frame count first.
    ///
    /// Dropped while the store is unavailable.
    fn control<S: SampleStore + ?Sized>(&mut self, store: &S, msg: ControlMessage) {
        let frames = store.frame_count(self.store_name());
        if frames > 0 {
            self.apply(msg, frames);
        }
    }

    /// Apply every queued control message.
    ///
    /// Messages are always drained so the queue cannot back up, but they are
    /// discarded while the store is unavailable.
    fn drain<S, R>(&mut self, store: &S, rx: &mut R)
    where
        S: SampleStore + ?Sized,
        R: MessageReceiver + ?Sized,
    {
        let frames = store.frame_count(self.store_name());
        while let Some(msg) = rx.pop() {
            if frames > 0 {
                self.apply(msg, frames);
            }
        }
    }

    /// One audio callback: drain control input, then render.
    fn process<S, R>(&mut self, store: &S, rx: &mut R, out: &mut AudioOutput)
    where
        S: SampleStore + ?Sized,
        R: MessageReceiver + ?Sized,
    {
        self.drain(store, rx);
        self.render(store, out);
    }
}
