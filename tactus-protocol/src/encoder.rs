//! Transmit encoder with running-status compression
//!
//! The encoder remembers the last status byte it emitted. A channel
//! message whose status matches is sent as data bytes only. Real-time
//! messages are always a single byte and leave the remembered status alone.

use crate::message::{MidiMessage, Packet};

/// Running-status transmit encoder
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Encoder {
    /// Last status byte written to the wire (0 = none yet)
    running_status: u8,
    /// Elide repeated status bytes
    elide: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create an encoder with running-status elision enabled
    pub const fn new() -> Self {
        Self {
            running_status: 0,
            elide: true,
        }
    }

    /// Create an encoder that always sends the status byte
    ///
    /// The last status is still tracked so diagnostics stay meaningful.
    pub const fn without_running_status() -> Self {
        Self {
            running_status: 0,
            elide: false,
        }
    }

    /// Last status byte written (0 before the first channel message)
    pub fn running_status(&self) -> u8 {
        self.running_status
    }

    /// Whether repeated status bytes are elided
    pub fn elides(&self) -> bool {
        self.elide
    }

    /// Encode one message into wire bytes
    ///
    /// Updates the running status as a side effect. The caller is expected
    /// to write the returned packet; a failed write is not detected here.
    pub fn encode(&mut self, msg: &MidiMessage) -> Packet {
        let mut packet = Packet::new();
        let status = msg.status();

        if msg.uses_running_status() {
            if !(self.elide && status == self.running_status) {
                let _ = packet.push(status);
                self.running_status = status;
            }
        } else {
            let _ = packet.push(status);
        }

        // Data is at most two bytes; the status slot guarantees room
        let _ = packet.extend_from_slice(&msg.data());
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{MOD_WHEEL_LSB, MOD_WHEEL_MSB};
    use crate::status::RealTime;

    fn note_on(channel: u8, key: u8, velocity: u8) -> MidiMessage {
        MidiMessage::NoteOn {
            channel,
            key,
            velocity,
        }
    }

    #[test]
    fn test_first_message_carries_status() {
        let mut enc = Encoder::new();
        let packet = enc.encode(&note_on(2, 60, 100));
        assert_eq!(packet.as_slice(), &[0x92, 60, 100]);
        assert_eq!(enc.running_status(), 0x92);
    }

    #[test]
    fn test_repeated_status_is_elided() {
        let mut enc = Encoder::new();
        enc.encode(&note_on(0, 60, 100));
        let packet = enc.encode(&note_on(0, 64, 100));
        assert_eq!(packet.as_slice(), &[64, 100]);
    }

    #[test]
    fn test_different_status_resets_running_status() {
        let mut enc = Encoder::new();
        enc.encode(&note_on(0, 60, 100));
        let off = enc.encode(&MidiMessage::NoteOff {
            channel: 0,
            key: 60,
            velocity: 0,
        });
        assert_eq!(off.as_slice(), &[0x80, 60, 0]);
        // Back to note on: status must be resent
        let on = enc.encode(&note_on(0, 62, 90));
        assert_eq!(on.as_slice(), &[0x90, 62, 90]);
    }

    #[test]
    fn test_channel_change_breaks_running_status() {
        let mut enc = Encoder::new();
        enc.encode(&note_on(0, 60, 100));
        let packet = enc.encode(&note_on(1, 60, 100));
        assert_eq!(packet.as_slice(), &[0x91, 60, 100]);
    }

    #[test]
    fn test_realtime_bypasses_running_status() {
        let mut enc = Encoder::new();
        enc.encode(&note_on(0, 60, 100));

        let clock = enc.encode(&MidiMessage::RealTime(RealTime::TimingClock));
        assert_eq!(clock.as_slice(), &[0xF8]);
        assert_eq!(enc.running_status(), 0x90);

        // Running status survives the real-time byte
        let packet = enc.encode(&note_on(0, 61, 100));
        assert_eq!(packet.as_slice(), &[61, 100]);
    }

    #[test]
    fn test_realtime_always_one_byte() {
        let mut enc = Encoder::new();
        for rt in [
            RealTime::TimingClock,
            RealTime::Start,
            RealTime::Continue,
            RealTime::Stop,
            RealTime::ActiveSensing,
            RealTime::Reset,
        ] {
            let first = enc.encode(&MidiMessage::RealTime(rt));
            let second = enc.encode(&MidiMessage::RealTime(rt));
            assert_eq!(first.as_slice(), &[rt.to_byte()]);
            assert_eq!(second.as_slice(), &[rt.to_byte()]);
        }
        assert_eq!(enc.running_status(), 0);
    }

    #[test]
    fn test_pitch_wheel_center() {
        let mut enc = Encoder::new();
        let packet = enc.encode(&MidiMessage::PitchWheel {
            channel: 0,
            value: 8192,
        });
        assert_eq!(packet.as_slice(), &[0xE0, 0x00, 0x40]);
    }

    #[test]
    fn test_pitch_wheel_signed_center() {
        let mut enc = Encoder::new();
        let packet = enc.encode(&MidiMessage::pitch_wheel_signed(1, 0));
        assert_eq!(packet.as_slice(), &[0xE1, 0x00, 0x40]);
    }

    #[test]
    fn test_mod_wheel_14bit_shares_status() {
        let mut enc = Encoder::new();
        let [lsb, msb] = MidiMessage::mod_wheel_14bit(0, 0x2001);
        let first = enc.encode(&lsb);
        let second = enc.encode(&msb);
        assert_eq!(first.as_slice(), &[0xB0, MOD_WHEEL_LSB, 0x01]);
        assert_eq!(second.as_slice(), &[MOD_WHEEL_MSB, 0x40]);
    }

    #[test]
    fn test_channel_aftertouch_elision() {
        let mut enc = Encoder::new();
        let at = |value| MidiMessage::ChannelAftertouch { channel: 4, value };
        assert_eq!(enc.encode(&at(10)).as_slice(), &[0xD4, 10]);
        assert_eq!(enc.encode(&at(11)).as_slice(), &[11]);
    }

    #[test]
    fn test_out_of_range_channel_is_masked() {
        let mut enc = Encoder::new();
        let packet = enc.encode(&note_on(0x13, 60, 100));
        assert_eq!(packet[0], 0x93);
    }

    #[test]
    fn test_without_running_status_always_sends_status() {
        let mut enc = Encoder::without_running_status();
        enc.encode(&note_on(0, 60, 100));
        let packet = enc.encode(&note_on(0, 62, 100));
        assert_eq!(packet.as_slice(), &[0x90, 62, 100]);
        assert_eq!(enc.running_status(), 0x90);
    }
}
