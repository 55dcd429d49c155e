use tracing::info;

use crate::{
    config::PlayerConfig,
    control::{
        commit::{CommitPolicy, SpanControl},
        message::ControlMessage,
    },
    dsp::mix::{silence, Mixdown},
    engine::{
        phasor::{increment, set_rate, PhasorVoice},
        Player,
    },
    error::ConfigError,
    io::AudioOutput,
    store::{ChannelSet, SampleStore},
};

/// Note-keyed looping voices over one shared span.
///
/// A note-on takes the first inactive voice and is dropped when every voice
/// is busy; nothing is stolen. Voices keep looping once started: note-offs
/// are accepted and ignored.
///
/// Span writes commit at once into the shared span, and each voice picks the
/// new span up at its own next wrap, so no voice jumps mid-cycle.
pub struct PolyPlayer {
    voices: Vec<PhasorVoice>,
    span: SpanControl,
    rate_hz: f32,
    sample_rate: f32,
    store: String,
    channels: ChannelSet,
    dropped_notes: u64,
}

impl PolyPlayer {
    pub fn new(config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            store = %config.store,
            voices = config.voices,
            rate_hz = config.rate_hz,
            "Polyphonic player ready"
        );

        Ok(Self {
            voices: vec![PhasorVoice::new(); config.voices],
            span: SpanControl::new(CommitPolicy::Immediate),
            rate_hz: config.rate_hz,
            sample_rate: config.sample_rate,
            store: config.store,
            channels: config.channels,
            dropped_notes: 0,
        })
    }

    /// Start a voice for `note`. Returns `false` if the note was dropped.
    ///
    /// A velocity of zero is a note-off in MIDI terms and is ignored.
    pub fn note_on(&mut self, note: u8, velocity: u8) -> bool {
        if velocity == 0 {
            return false;
        }
        let span = self.span.committed();
        match self.voices.iter_mut().find(|voice| !voice.is_active()) {
            Some(voice) => {
                voice.start(note, velocity, span);
                true
            }
            None => {
                self.dropped_notes += 1;
                false
            }
        }
    }

    pub fn voices(&self) -> &[PhasorVoice] {
        &self.voices
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|voice| voice.is_active()).count()
    }

    /// Note-ons refused because every voice was busy.
    pub fn dropped_notes(&self) -> u64 {
        self.dropped_notes
    }

    pub fn span(&self) -> &SpanControl {
        &self.span
    }

    pub fn rate_hz(&self) -> f32 {
        self.rate_hz
    }

    pub fn set_rate_hz(&mut self, rate_hz: f32) {
        set_rate(&mut self.rate_hz, rate_hz);
    }
}

impl Player for PolyPlayer {
    fn store_name(&self) -> &str {
        &self.store
    }

    fn output_channels(&self) -> usize {
        self.channels.len()
    }

    fn apply(&mut self, msg: ControlMessage, frames: usize) {
        match msg {
            ControlMessage::SpanStart(value) => self.span.set_start(value, frames),
            ControlMessage::SpanEnd(value) => self.span.set_end(value, frames),
            ControlMessage::RateHz(value) => self.set_rate_hz(value),
            ControlMessage::NoteOn { note, velocity } => {
                self.note_on(note, velocity);
            }
            // No release path: voices loop until the player is dropped.
            ControlMessage::NoteOff { .. } => {}
            _ => {}
        }
    }

    fn render<S: SampleStore + ?Sized>(&mut self, store: &S, out: &mut AudioOutput) {
        silence(&mut out.buffers);

        let frames = store.frame_count(&self.store);
        let Some(increment) = increment(self.rate_hz, self.sample_rate) else {
            return;
        };
        if frames == 0 {
            return;
        }

        let span = self.span.committed();
        let mut mix = Mixdown::new();
        for i in 0..out.frames() {
            mix.clear();
            for voice in self.voices.iter_mut().filter(|voice| voice.is_active()) {
                if voice.advance(increment) {
                    voice.set_span(span);
                }
                let frame = voice.sample(store, &self.store, &self.channels, frames);
                mix.add(&frame, voice.gain());
            }
            mix.write(&mut out.buffers, i);
        }
    }
}

impl std::fmt::Debug for PolyPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolyPlayer")
            .field("active_voices", &self.active_voices())
            .field("voices", &self.voices.len())
            .field("rate_hz", &self.rate_hz)
            .finish()
    }
}
