use tracing::info;

use crate::{
    config::PlayerConfig,
    control::{
        commit::{CommitPolicy, SpanControl},
        message::ControlMessage,
    },
    dsp::{
        envelope::phase_fade,
        mix::{silence, write_frame},
        phasor::Phasor,
    },
    engine::Player,
    error::ConfigError,
    io::AudioOutput,
    store::{read_frame, ChannelSet, SampleSpan, SampleStore},
    Frame, MAX_CHANNELS,
};

/// A continuously looping read head.
///
/// The phase sweeps the span once per cycle. The span only changes when the
/// phase wraps, so the read position never jumps mid-cycle.
#[derive(Debug, Clone, Copy)]
pub struct PhasorVoice {
    phasor: Phasor,
    span: SampleSpan,
    gain: f32,
    note: u8,
    velocity: u8,
    active: bool,
}

impl PhasorVoice {
    /// An inactive voice.
    pub fn new() -> Self {
        Self {
            phasor: Phasor::new(),
            span: SampleSpan { start: 0, end: 1 },
            gain: 1.0,
            note: 0,
            velocity: 0,
            active: false,
        }
    }

    /// Start looping `span` from phase zero.
    pub fn start(&mut self, note: u8, velocity: u8, span: SampleSpan) {
        self.phasor.reset();
        self.span = span;
        self.note = note;
        self.velocity = velocity;
        self.gain = velocity as f32 / 127.0;
        self.active = true;
    }

    /// Start at unity gain, not tied to a note.
    pub fn start_free(&mut self, span: SampleSpan) {
        self.start(0, 127, span);
    }

    /// Advance the phase. Returns `true` on wrap, the only point where
    /// [`PhasorVoice::set_span`] should be called.
    #[inline]
    pub fn advance(&mut self, increment: f64) -> bool {
        self.phasor.advance(increment)
    }

    pub fn set_span(&mut self, span: SampleSpan) {
        self.span = span;
    }

    /// Frame at the current phase, faded at both ends of the cycle.
    ///
    /// `frames` is the store's current frame count, non-zero.
    #[inline]
    pub fn sample<S: SampleStore + ?Sized>(
        &self,
        store: &S,
        name: &str,
        channels: &ChannelSet,
        frames: usize,
    ) -> Frame {
        if self.span.is_empty() {
            return [0.0; MAX_CHANNELS];
        }
        let phase = self.phasor.phase();
        let position = self.span.start as f64 + (phase * self.span.len() as f64).round();
        let index = self.span.clamp_index(position).min(frames - 1);

        let fade = phase_fade(phase);
        let mut frame = read_frame(store, name, channels, index);
        for sample in frame.iter_mut() {
            *sample *= fade;
        }
        frame
    }

    pub fn phase(&self) -> f64 {
        self.phasor.phase()
    }

    pub fn span(&self) -> SampleSpan {
        self.span
    }

    /// Velocity scaled to `[0, 1]`.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for PhasorVoice {
    fn default() -> Self {
        Self::new()
    }
}

/// Phasor increment per sample, or `None` when the rate produces no motion.
#[inline]
pub(crate) fn increment(rate_hz: f32, sample_rate: f32) -> Option<f64> {
    if rate_hz > 0.0 && sample_rate > 0.0 {
        Some(rate_hz as f64 / sample_rate as f64)
    } else {
        None
    }
}

/// Apply a phasor rate write. Non-positive and non-finite rates are ignored.
#[inline]
pub(crate) fn set_rate(rate_hz: &mut f32, value: f32) {
    if value.is_finite() && value > 0.0 {
        *rate_hz = value;
    }
}

/// The minimal single-voice player.
///
/// One voice loops the committed span forever. Span writes stay pending
/// until the phase wraps.
pub struct PhasorPlayer {
    voice: PhasorVoice,
    span: SpanControl,
    rate_hz: f32,
    sample_rate: f32,
    store: String,
    channels: ChannelSet,
}

impl PhasorPlayer {
    pub fn new(config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            store = %config.store,
            rate_hz = config.rate_hz,
            sample_rate = config.sample_rate,
            "Phasor player ready"
        );

        let span = SpanControl::new(CommitPolicy::OnPhaseWrap);
        let mut voice = PhasorVoice::new();
        voice.start_free(span.committed());

        Ok(Self {
            voice,
            span,
            rate_hz: config.rate_hz,
            sample_rate: config.sample_rate,
            store: config.store,
            channels: config.channels,
        })
    }

    pub fn voice(&self) -> &PhasorVoice {
        &self.voice
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

impl Player for PhasorPlayer {
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

        for i in 0..out.frames() {
            if self.voice.advance(increment) && self.span.on_wrap(frames) {
                self.voice.set_span(self.span.committed());
            }
            let frame = self
                .voice
                .sample(store, &self.store, &self.channels, frames);
            write_frame(&mut out.buffers, i, &frame);
        }
    }
}
