use rand::Rng;

use crate::{
    control::params::{EngineParameters, ParamLimits},
    store::{ChannelSet, SampleSpan},
    synth::voice::Voice,
};

/// What a factory sees when it is asked for a voice.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub params: &'a EngineParameters,
    /// Current frame count of the store, non-zero.
    pub frames: usize,
    pub channels: ChannelSet,
}

/// Builds voices for a spawn engine.
///
/// This is the "instrument design" layer: the engine owns scheduling, the
/// pool and the mixdown, and the factory decides which part of the store a
/// new voice plays and how it is randomized. All random draws happen here,
/// at spawn time, never inside per-sample code.
pub trait VoiceFactory: Send {
    /// Short name used in logs.
    const KIND: &'static str;

    /// Clamp rules for this variant's control input.
    fn limits(&self) -> ParamLimits;

    /// The span voices may draw from, derived from the committed span.
    ///
    /// Called once per block. The result is never written back into the
    /// parameters. `None` means nothing can spawn this block.
    fn effective_span(&self, committed: SampleSpan, frames: usize) -> Option<SampleSpan>;

    /// Build one voice from `span`, or decline.
    fn create_voice<R: Rng>(
        &self,
        span: SampleSpan,
        ctx: &SpawnContext<'_>,
        rng: &mut R,
    ) -> Option<Voice>;
}

/// Randomized grains inside the committed span.
#[derive(Debug, Clone, Copy)]
pub struct GrainFactory {
    min_size: usize,
}

impl GrainFactory {
    pub fn new(min_size: usize) -> Self {
        Self {
            min_size: min_size.max(1),
        }
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }
}

impl VoiceFactory for GrainFactory {
    const KIND: &'static str = "grain";

    fn limits(&self) -> ParamLimits {
        ParamLimits::GRAIN
    }

    fn effective_span(&self, committed: SampleSpan, frames: usize) -> Option<SampleSpan> {
        if frames == 0 {
            return None;
        }
        // The store may have shrunk since the span was committed.
        let start = committed.start.min(frames - 1);
        let mut end = committed.end.min(frames).max(start + 1);

        // Too narrow for a minimum-size grain: push the end out, up to the
        // end of the store.
        if end - start < self.min_size {
            end = (start + self.min_size).min(frames);
        }
        SampleSpan::new(start, end)
    }

    fn create_voice<R: Rng>(
        &self,
        span: SampleSpan,
        ctx: &SpawnContext<'_>,
        rng: &mut R,
    ) -> Option<Voice> {
        if span.len() < self.min_size {
            return None;
        }

        let slack = (span.len() - self.min_size).max(1);
        let start = span.start + rng.gen_range(0..slack);
        let length = self.min_size + rng.gen_range(0..slack);
        let end = (start + length).min(ctx.frames);
        let grain = SampleSpan::new(start, end)?;

        let speed = rng.gen::<f32>() * ctx.params.max_speed();
        let floor = ctx.params.volume_floor();
        let gain = floor + rng.gen::<f32>() * (1.0 - floor);

        Some(Voice::grain(
            grain,
            speed,
            ctx.params.overall_speed(),
            gain,
            ctx.channels,
        ))
    }
}

/// Whole-store one-shots.
///
/// The random level runs from 1.0 toward the volume control, so the control
/// acts as the lower bound of a range that tops out at unity. This is the
/// mirror image of the grain range and is kept that way on purpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerFactory;

impl VoiceFactory for TriggerFactory {
    const KIND: &'static str = "trigger";

    fn limits(&self) -> ParamLimits {
        ParamLimits::TRIGGER
    }

    fn effective_span(&self, _committed: SampleSpan, frames: usize) -> Option<SampleSpan> {
        SampleSpan::full(frames)
    }

    fn create_voice<R: Rng>(
        &self,
        span: SampleSpan,
        ctx: &SpawnContext<'_>,
        rng: &mut R,
    ) -> Option<Voice> {
        let speed = rng.gen::<f32>() * ctx.params.max_speed();
        let floor = ctx.params.volume_floor();
        let gain = 1.0 + rng.gen::<f32>() * (floor - 1.0);
        Some(Voice::trigger(span, speed, gain, ctx.channels))
    }
}
