//! Events reconstructed by the receive parser

use crate::message::{join_14bit, MidiMessage};
use crate::status::RealTime;

/// A completed inbound message
///
/// Carries the same values the handler callbacks receive. Program Change
/// and aftertouch are consumed by the parser but never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiEvent {
    /// Note On with nonzero velocity
    NoteOn { key: u8, velocity: u8 },
    /// Note Off, including Note On with velocity 0
    NoteOff { key: u8, velocity: u8 },
    /// Control Change
    ControlChange { controller: u8, value: u8 },
    /// Pitch wheel as raw data bytes, LSB first on the wire
    PitchWheel { lsb: u8, msb: u8 },
    /// System real-time byte (0xF8-0xFF), including undefined 0xF9/0xFD
    RealTime(u8),
}

impl MidiEvent {
    /// Pitch wheel position as an unsigned 14-bit value
    pub fn pitch_value(&self) -> Option<u16> {
        match *self {
            MidiEvent::PitchWheel { lsb, msb } => Some(join_14bit(lsb, msb)),
            _ => None,
        }
    }

    /// Returns true for real-time events
    pub fn is_realtime(&self) -> bool {
        matches!(self, MidiEvent::RealTime(_))
    }

    /// Build the outbound message that re-sends this event on `channel`
    ///
    /// Undefined real-time bytes have no outbound form and return `None`.
    pub fn to_message(&self, channel: u8) -> Option<MidiMessage> {
        match *self {
            MidiEvent::NoteOn { key, velocity } => Some(MidiMessage::NoteOn {
                channel,
                key,
                velocity,
            }),
            MidiEvent::NoteOff { key, velocity } => Some(MidiMessage::NoteOff {
                channel,
                key,
                velocity,
            }),
            MidiEvent::ControlChange { controller, value } => Some(MidiMessage::ControlChange {
                channel,
                controller,
                value,
            }),
            MidiEvent::PitchWheel { lsb, msb } => Some(MidiMessage::PitchWheel {
                channel,
                value: join_14bit(lsb, msb),
            }),
            MidiEvent::RealTime(byte) => RealTime::from_byte(byte).map(MidiMessage::RealTime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_value() {
        let event = MidiEvent::PitchWheel {
            lsb: 0x00,
            msb: 0x40,
        };
        assert_eq!(event.pitch_value(), Some(8192));
        assert_eq!(MidiEvent::RealTime(0xF8).pitch_value(), None);
    }

    #[test]
    fn test_to_message_rechannels() {
        let event = MidiEvent::NoteOn {
            key: 60,
            velocity: 100,
        };
        assert_eq!(
            event.to_message(5),
            Some(MidiMessage::NoteOn {
                channel: 5,
                key: 60,
                velocity: 100
            })
        );
    }

    #[test]
    fn test_to_message_pitch_roundtrip() {
        let event = MidiEvent::PitchWheel {
            lsb: 0x12,
            msb: 0x34,
        };
        let msg = event.to_message(0).unwrap();
        assert_eq!(msg.data().as_slice(), &[0x12, 0x34]);
    }

    #[test]
    fn test_undefined_realtime_has_no_message() {
        assert_eq!(MidiEvent::RealTime(0xF9).to_message(0), None);
        assert_eq!(
            MidiEvent::RealTime(0xFA).to_message(0),
            Some(MidiMessage::RealTime(RealTime::Start))
        );
    }
}
