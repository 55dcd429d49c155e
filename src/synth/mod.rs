// Purpose: Voices, the bounded voice pool, spawn-time randomization
// This layer sits between the DSP primitives and the players

pub mod factory;
pub mod pool;
pub mod voice;

pub use factory::{GrainFactory, SpawnContext, TriggerFactory, VoiceFactory};
pub use pool::VoicePool;
pub use voice::{Voice, VoiceShape, VoiceState};
