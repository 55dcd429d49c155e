use crate::{
    dsp::mix::Mixdown,
    store::SampleStore,
    synth::voice::{Voice, VoiceState},
};

/// Fixed-capacity set of voice slots.
///
/// Slots are allocated once, up front. Spawning fills a free slot and a
/// finished voice frees its slot on the same pass, so nothing allocates on
/// the audio thread and the work per sample is bounded by the capacity.
pub struct VoicePool {
    slots: Vec<Option<Voice>>,
    active: usize,
}

impl VoicePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active >= self.slots.len()
    }

    /// Admission control.
    ///
    /// A full pool refuses without calling `make`, so a refused spawn draws
    /// no random numbers and changes nothing. `make` may itself decline by
    /// returning `None`.
    pub fn try_spawn<F>(&mut self, make: F) -> bool
    where
        F: FnOnce() -> Option<Voice>,
    {
        if self.is_full() {
            return false;
        }
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) else {
            return false;
        };
        match make() {
            Some(voice) => {
                *slot = Some(voice);
                self.active += 1;
                true
            }
            None => false,
        }
    }

    /// Advance every active voice by one sample and sum them into `mix`.
    ///
    /// `frames` is the store's current frame count. Voices that finish on this
    /// sample are evicted before returning.
    #[inline]
    pub fn mix_next<S: SampleStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
        frames: usize,
        mix: &mut Mixdown,
    ) {
        for slot in self.slots.iter_mut() {
            let finished = match slot.as_mut() {
                Some(voice) => {
                    let (state, frame) = voice.advance_and_sample(store, name, frames);
                    mix.add(&frame, voice.gain());
                    state == VoiceState::Finished
                }
                None => continue,
            };

            if finished {
                *slot = None;
                self.active -= 1;
            }
        }
    }

    /// Active voices in slot order.
    pub fn voices(&self) -> impl Iterator<Item = &Voice> {
        self.slots.iter().flatten()
    }

    /// Drop every voice.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.active = 0;
    }
}

impl std::fmt::Debug for VoicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoicePool")
            .field("active_voices", &self.active)
            .field("capacity", &self.slots.len())
            .finish()
    }
}
