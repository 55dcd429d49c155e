use rand::{rngs::SmallRng, SeedableRng};
use tracing::info;

use crate::{
    config::EngineConfig,
    control::{message::ControlMessage, params::EngineParameters},
    dsp::{
        mix::{silence, Mixdown},
        phasor::RateScheduler,
    },
    engine::Player,
    error::ConfigError,
    io::AudioOutput,
    store::{ChannelSet, SampleSpan, SampleStore},
    synth::{
        factory::{GrainFactory, SpawnContext, TriggerFactory, VoiceFactory},
        pool::VoicePool,
        voice::Voice,
    },
};

/// Rate-scheduled spawning into a bounded voice pool.
///
/// Per output sample: advance the scheduler, attempt a spawn on wrap, then
/// advance and mix every active voice, evicting the ones that finish. The
/// factory decides what a spawned voice plays; everything else is shared.
pub struct SpawnEngine<F: VoiceFactory> {
    factory: F,
    params: EngineParameters,
    scheduler: RateScheduler,
    pool: VoicePool,
    rng: SmallRng,
    store: String,
    channels: ChannelSet,
    sample_rate: f32,
    spawn_attempts: u64,
}

/// Randomized grains from the committed span.
pub type GrainEngine = SpawnEngine<GrainFactory>;

/// Whole-buffer one-shots.
///
/// The scheduler keeps wrapping while the pool is full. A wrap that finds no
/// free slot is dropped rather than held, so the next trigger lands on the
/// next wrap after a slot frees, not on the first sample after it frees.
pub type TriggerEngine = SpawnEngine<TriggerFactory>;

impl GrainEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let factory = GrainFactory::new(config.min_grain_size);
        Self::with_factory(factory, config)
    }
}

impl TriggerEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_factory(TriggerFactory, config)
    }
}

impl<F: VoiceFactory> SpawnEngine<F> {
    /// Build an engine around any factory.
    ///
    /// The voice pool is allocated here, once. Initial control values from
    /// `config` are clamped like live input.
    pub fn with_factory(factory: F, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut params = EngineParameters::new(factory.limits());
        params.set_rate_ms(config.rate_ms);
        params.set_max_speed(config.max_speed);
        params.set_overall_speed(config.overall_speed);
        params.set_volume_floor(config.volume_floor);

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        info!(
            kind = F::KIND,
            store = %config.store,
            capacity = config.capacity,
            rate_ms = params.rate_ms(),
            sample_rate = config.sample_rate,
            "Spawn engine ready"
        );

        Ok(Self {
            factory,
            params,
            scheduler: RateScheduler::new(),
            pool: VoicePool::new(config.capacity),
            rng,
            store: config.store,
            channels: config.channels,
            sample_rate: config.sample_rate,
            spawn_attempts: 0,
        })
    }

    /// Change the sample rate the scheduler counts in. Non-positive values are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate.is_finite() && sample_rate > 0.0 {
            self.sample_rate = sample_rate;
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn params(&self) -> &EngineParameters {
        &self.params
    }

    pub fn committed_span(&self) -> SampleSpan {
        self.params.span().committed()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Active voices in slot order.
    pub fn voices(&self) -> impl Iterator<Item = &Voice> {
        self.pool.voices()
    }

    pub fn active_voices(&self) -> usize {
        self.pool.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Scheduler wraps seen so far, whether or not they produced a voice.
    pub fn spawn_attempts(&self) -> u64 {
        self.spawn_attempts
    }

    /// Attempt one spawn right now, outside the scheduler.
    ///
    /// Returns `false` if the pool is full, the store is unavailable, or the
    /// factory declined.
    pub fn try_spawn<S: SampleStore + ?Sized>(&mut self, store: &S) -> bool {
        let frames = store.frame_count(&self.store);
        match self
            .factory
            .effective_span(self.params.span().committed(), frames)
        {
            Some(span) => self.spawn_from(span, frames),
            None => false,
        }
    }

    fn spawn_from(&mut self, span: SampleSpan, frames: usize) -> bool {
        let ctx = SpawnContext {
            params: &self.params,
            frames,
            channels: self.channels,
        };
        let factory = &self.factory;
        let rng = &mut self.rng;
        self.pool
            .try_spawn(|| factory.create_voice(span, &ctx, rng))
    }
}

impl<F: VoiceFactory> Player for SpawnEngine<F> {
    fn store_name(&self) -> &str {
        &self.store
    }

    fn output_channels(&self) -> usize {
        self.channels.len()
    }

    fn apply(&mut self, msg: ControlMessage, frames: usize) {
        self.params.apply(msg, frames);
    }

    fn render<S: SampleStore + ?Sized>(&mut self, store: &S, out: &mut AudioOutput) {
        silence(&mut out.buffers);

        let frames = store.frame_count(&self.store);
        if frames == 0 {
            return;
        }

        // Widening for the minimum grain size is re-derived every block and
        // never stored back into the parameters.
        let span = self
            .factory
            .effective_span(self.params.span().committed(), frames);

        let mut mix = Mixdown::new();
        for i in 0..out.frames() {
            if self.scheduler.advance(self.sample_rate, self.params.rate_ms()) {
                self.spawn_attempts += 1;
                if let Some(span) = span {
                    self.spawn_from(span, frames);
                }
            }

            mix.clear();
            self.pool.mix_next(store, &self.store, frames, &mut mix);
            mix.write(&mut out.buffers, i);
        }
    }
}
