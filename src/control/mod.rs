//! Control-side state: messages, clamp-on-write parameters, and the
//! pending/committed span protocol.

pub mod commit;
pub mod message;
pub mod params;

pub use commit::{CommitPolicy, CommitState, SpanControl};
#[cfg(feature = "rtrb")]
pub use message::ControlHandle;
pub use message::{ControlMessage, MessageReceiver};
pub use params::{EngineParameters, ParamLimits};
