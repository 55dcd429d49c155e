use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::warn;

/// A control value delivered to a player.
///
/// Every player accepts the full set and ignores messages that do not apply
/// to it (a trigger engine has no span, a phasor player has no spawn rate).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    /// Pending span start, in frames.
    SpanStart(f32),
    /// Pending span end, in frames.
    SpanEnd(f32),
    /// Spawn interval in milliseconds.
    RateMs(f32),
    /// Phasor rate in cycles per second.
    RateHz(f32),
    /// Upper bound of the random per-voice speed.
    MaxSpeed(f32),
    /// Speed added to every grain's own speed.
    OverallSpeed(f32),
    /// Bound of the random per-voice gain.
    VolumeFloor(f32),
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}

pub const CONTROL_QUEUE_SIZE: usize = 256;

/// Control-context end of a player's message queue.
///
/// Sending never blocks. When the audio side falls behind and the queue
/// fills up, the newest message is dropped.
#[cfg(feature = "rtrb")]
pub struct ControlHandle {
    tx: Producer<ControlMessage>,
}

#[cfg(feature = "rtrb")]
impl ControlHandle {
    /// Create a handle and the consumer to pass to [`crate::Player::drain`].
    pub fn new(capacity: usize) -> (Self, Consumer<ControlMessage>) {
        let (tx, rx) = RingBuffer::<ControlMessage>::new(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Queue a message. Returns `false` if the queue was full.
    pub fn send(&mut self, msg: ControlMessage) -> bool {
        match self.tx.push(msg) {
            Ok(()) => true,
            Err(_) => {
                warn!(?msg, "Control queue full, dropping message");
                false
            }
        }
    }

    /// Queue both ends of a new span. They are applied in order on the audio side.
    pub fn set_span(&mut self, start: f32, end: f32) -> bool {
        self.send(ControlMessage::SpanStart(start)) && self.send(ControlMessage::SpanEnd(end))
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) -> bool {
        self.send(ControlMessage::NoteOn { note, velocity })
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}
