use crate::{control::message::ControlMessage, io::midi::MidiEvent};

/// Map a MIDI event on `channel_filter` to a player control message.
///
/// Only notes are forwarded; everything else, and every other channel,
/// yields `None`.
pub fn midi_to_control(midi: MidiEvent, channel_filter: u8) -> Option<ControlMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(ControlMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(ControlMessage::NoteOff {
            note: key,
            velocity,
        }),
        _ => None,
    }
}
