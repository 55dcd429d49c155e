use crate::{
    dsp::envelope::GrainEnvelope,
    store::{read_frame, ChannelSet, SampleSpan, SampleStore},
    Frame, MAX_CHANNELS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Active,   // Cursor inside its span, more samples to read
    Finished, // Cursor ran past the span end, ready for eviction
}

/// How a voice shapes its amplitude over its span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoiceShape {
    /// 20/60/20 trapezoid over the grain's frames.
    Grain(GrainEnvelope),
    /// No envelope: triggers play the whole store at a constant level.
    Flat,
}

/// One spawned playback unit: a fractional cursor walking once through a
/// snapshot of the span that was committed when it was born.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    cursor: f64,
    span: SampleSpan,
    speed: f32,
    step: f64,
    gain: f32,
    channels: ChannelSet,
    shape: VoiceShape,
    state: VoiceState,
}

impl Voice {
    /// A grain over `span`.
    ///
    /// The cursor advances by `speed + overall_speed` per sample; both are
    /// fixed for the grain's lifetime.
    pub fn grain(
        span: SampleSpan,
        speed: f32,
        overall_speed: f32,
        gain: f32,
        channels: ChannelSet,
    ) -> Self {
        let speed = speed.max(1.0);
        Self {
            cursor: span.start as f64,
            span,
            speed,
            step: speed as f64 + overall_speed as f64,
            gain,
            channels,
            shape: VoiceShape::Grain(GrainEnvelope::new(span.start, span.end)),
            state: VoiceState::Active,
        }
    }

    /// A one-shot over `span` with no envelope.
    pub fn trigger(span: SampleSpan, speed: f32, gain: f32, channels: ChannelSet) -> Self {
        let speed = speed.max(1.0);
        Self {
            cursor: span.start as f64,
            span,
            speed,
            step: speed as f64,
            gain,
            channels,
            shape: VoiceShape::Flat,
            state: VoiceState::Active,
        }
    }

    /// Read the frame under the cursor, shape it, then advance.
    ///
    /// `frames` is the store's current frame count. The returned state is the
    /// one after advancing: a voice reports `Finished` on the same call that
    /// consumes its last sample. A voice whose cursor lies past the end of a
    /// store that shrank under it finishes silently without reading.
    #[inline]
    pub fn advance_and_sample<S: SampleStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
        frames: usize,
    ) -> (VoiceState, Frame) {
        if self.state == VoiceState::Finished {
            return (self.state, [0.0; MAX_CHANNELS]);
        }

        let index = self.span.clamp_index(self.cursor);
        if index >= frames {
            self.state = VoiceState::Finished;
            return (self.state, [0.0; MAX_CHANNELS]);
        }
        let envelope = self.envelope_gain();
        let mut frame = read_frame(store, name, &self.channels, index);
        for sample in frame.iter_mut() {
            *sample *= envelope;
        }

        self.cursor += self.step;
        if self.cursor >= self.span.end as f64 {
            self.state = VoiceState::Finished;
        }

        (self.state, frame)
    }

    /// Envelope gain at the current cursor.
    #[inline]
    pub fn envelope_gain(&self) -> f32 {
        match self.shape {
            VoiceShape::Grain(envelope) => envelope.gain(self.cursor),
            VoiceShape::Flat => 1.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == VoiceState::Finished
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn span(&self) -> SampleSpan {
        self.span
    }

    /// The voice's own random speed, at least 1.0.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Frames the cursor moves per output sample.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The random level drawn at spawn.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn shape(&self) -> VoiceShape {
        self.shape
    }
}
