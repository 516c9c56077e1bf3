//! Outbound MIDI messages
//!
//! A [`MidiMessage`] is one event the application wants on the wire. The
//! [`Encoder`](crate::Encoder) turns it into a [`Packet`], dropping the
//! status byte when running status allows.

use heapless::Vec;

use crate::controller::{MOD_WHEEL_LSB, MOD_WHEEL_MSB};
use crate::status::{
    channel_status, RealTime, CHANNEL_AFTERTOUCH, CONTROL_CHANGE, DATA_MASK, NOTE_OFF, NOTE_ON,
    PITCH_WHEEL,
};

/// Largest single message: status + two data bytes
pub const MAX_PACKET_SIZE: usize = 3;

/// Wire bytes for one encoded message
pub type Packet = Vec<u8, MAX_PACKET_SIZE>;

/// Center of the unsigned 14-bit pitch wheel range
pub const PITCH_WHEEL_CENTER: u16 = 0x2000;

/// Largest 14-bit value
pub const MAX_14BIT: u16 = 0x3FFF;

/// Split a 14-bit value into (LSB, MSB) data bytes
///
/// Each half is masked to 7 bits, so out-of-range input still produces
/// legal data bytes.
pub const fn split_14bit(value: u16) -> (u8, u8) {
    let lsb = (value & DATA_MASK as u16) as u8;
    let msb = ((value >> 7) & DATA_MASK as u16) as u8;
    (lsb, msb)
}

/// Join (LSB, MSB) data bytes into a 14-bit value
pub const fn join_14bit(lsb: u8, msb: u8) -> u16 {
    ((msb & DATA_MASK) as u16) << 7 | (lsb & DATA_MASK) as u16
}

/// Map signed pitch (-8192..=8191, 0 = center) to the unsigned wire range
///
/// No clamping: values outside the nominal range wrap.
pub const fn signed_to_unsigned_14bit(value: i16) -> u16 {
    (value as i32 + PITCH_WHEEL_CENTER as i32) as u16
}

/// Messages the encoder can transmit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiMessage {
    /// Start a note
    NoteOn { channel: u8, key: u8, velocity: u8 },
    /// Release a note
    NoteOff { channel: u8, key: u8, velocity: u8 },
    /// Controller value change
    ControlChange {
        channel: u8,
        controller: u8,
        value: u8,
    },
    /// Channel-wide pressure
    ChannelAftertouch { channel: u8, value: u8 },
    /// Unsigned 14-bit bend: 0 = low, 8192 = center, 16383 = high
    PitchWheel { channel: u8, value: u16 },
    /// Single-byte system real-time message
    RealTime(RealTime),
}

impl MidiMessage {
    /// Pitch wheel from a signed bend (-8192..=8191, 0 = center)
    pub const fn pitch_wheel_signed(channel: u8, value: i16) -> Self {
        MidiMessage::PitchWheel {
            channel,
            value: signed_to_unsigned_14bit(value),
        }
    }

    /// Modulation wheel, MSB only (CC 1)
    pub const fn mod_wheel_msb(channel: u8, value: u8) -> Self {
        MidiMessage::ControlChange {
            channel,
            controller: MOD_WHEEL_MSB,
            value: value & DATA_MASK,
        }
    }

    /// Modulation wheel at full 14-bit resolution
    ///
    /// Produces two Control Change messages, LSB (CC 33) first, then MSB (CC 1).
    pub const fn mod_wheel_14bit(channel: u8, value: u16) -> [Self; 2] {
        let (lsb, msb) = split_14bit(value);
        [
            MidiMessage::ControlChange {
                channel,
                controller: MOD_WHEEL_LSB,
                value: lsb,
            },
            MidiMessage::ControlChange {
                channel,
                controller: MOD_WHEEL_MSB,
                value: msb,
            },
        ]
    }

    /// Status byte for this message
    pub fn status(&self) -> u8 {
        match *self {
            MidiMessage::NoteOn { channel, .. } => channel_status(NOTE_ON, channel),
            MidiMessage::NoteOff { channel, .. } => channel_status(NOTE_OFF, channel),
            MidiMessage::ControlChange { channel, .. } => channel_status(CONTROL_CHANGE, channel),
            MidiMessage::ChannelAftertouch { channel, .. } => {
                channel_status(CHANNEL_AFTERTOUCH, channel)
            }
            MidiMessage::PitchWheel { channel, .. } => channel_status(PITCH_WHEEL, channel),
            MidiMessage::RealTime(rt) => rt.to_byte(),
        }
    }

    /// Data bytes following the status byte
    pub fn data(&self) -> Vec<u8, 2> {
        let mut data = Vec::new();
        match *self {
            MidiMessage::NoteOn { key, velocity, .. }
            | MidiMessage::NoteOff { key, velocity, .. } => {
                let _ = data.push(key);
                let _ = data.push(velocity);
            }
            MidiMessage::ControlChange {
                controller, value, ..
            } => {
                let _ = data.push(controller);
                let _ = data.push(value);
            }
            MidiMessage::ChannelAftertouch { value, .. } => {
                let _ = data.push(value);
            }
            MidiMessage::PitchWheel { value, .. } => {
                let (lsb, msb) = split_14bit(value);
                let _ = data.push(lsb);
                let _ = data.push(msb);
            }
            MidiMessage::RealTime(_) => {}
        }
        data
    }

    /// Returns true if this message participates in running status
    ///
    /// Real-time messages never do.
    pub fn uses_running_status(&self) -> bool {
        !matches!(self, MidiMessage::RealTime(_))
    }
}
