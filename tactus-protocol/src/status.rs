//! Status byte values and classification
//!
//! A status byte has bit 7 set. For channel messages the high nibble is the
//! message kind and the low nibble is the zero-based channel.

/// Bit 7 set marks a status byte
pub const STATUS_BIT: u8 = 0x80;
/// Mask for the 7-bit payload of a data byte
pub const DATA_MASK: u8 = 0x7F;
/// Mask selecting the message kind of a channel status byte
pub const CLASS_MASK: u8 = 0xF0;
/// Mask selecting the channel of a channel status byte
pub const CHANNEL_MASK: u8 = 0x0F;

// Channel voice opcodes
pub const NOTE_OFF: u8 = 0x80; // 2 data bytes
pub const NOTE_ON: u8 = 0x90; // 2 data bytes
pub const POLY_AFTERTOUCH: u8 = 0xA0; // 2 data bytes
pub const CONTROL_CHANGE: u8 = 0xB0; // 2 data bytes
pub const PROGRAM_CHANGE: u8 = 0xC0; // 1 data byte
pub const CHANNEL_AFTERTOUCH: u8 = 0xD0; // 1 data byte
pub const PITCH_WHEEL: u8 = 0xE0; // 2 data bytes

// System common
pub const SYSEX_START: u8 = 0xF0;
pub const MTC_QUARTER_FRAME: u8 = 0xF1;
pub const SONG_POSITION: u8 = 0xF2;
pub const SONG_SELECT: u8 = 0xF3;
pub const TUNE_REQUEST: u8 = 0xF6;
pub const SYSEX_END: u8 = 0xF7;

/// Lowest system real-time byte; everything from here to 0xFF is real-time
pub const REALTIME_MIN: u8 = 0xF8;

// System real-time
pub const TIMING_CLOCK: u8 = 0xF8;
pub const START: u8 = 0xFA;
pub const CONTINUE: u8 = 0xFB;
pub const STOP: u8 = 0xFC;
pub const ACTIVE_SENSING: u8 = 0xFE;
pub const RESET: u8 = 0xFF;

/// Zero-based channel numbers
///
/// Channel 1 on the instrument is 0 on the wire, a frequent source of
/// off-by-one bugs. Prefer these names over bare literals.
pub mod channel {
    pub const CH1: u8 = 0;
    pub const CH2: u8 = 1;
    pub const CH3: u8 = 2;
    pub const CH4: u8 = 3;
    pub const CH5: u8 = 4;
    pub const CH6: u8 = 5;
    pub const CH7: u8 = 6;
    pub const CH8: u8 = 7;
    pub const CH9: u8 = 8;
    pub const CH10: u8 = 9;
    pub const CH11: u8 = 10;
    pub const CH12: u8 = 11;
    pub const CH13: u8 = 12;
    pub const CH14: u8 = 13;
    pub const CH15: u8 = 14;
    pub const CH16: u8 = 15;
}

/// Returns true if `byte` is a status byte (bit 7 set)
#[inline]
pub const fn is_status(byte: u8) -> bool {
    byte & STATUS_BIT != 0
}

/// Returns true if `byte` is a system real-time byte (0xF8-0xFF)
#[inline]
pub const fn is_realtime(byte: u8) -> bool {
    byte >= REALTIME_MIN
}

/// Returns true if `byte` is a channel voice status (0x80-0xEF)
#[inline]
pub const fn is_channel_status(byte: u8) -> bool {
    byte >= NOTE_OFF && byte < SYSEX_START
}

/// Build a channel status byte; out-of-range channels are masked to the low nibble
#[inline]
pub const fn channel_status(opcode: u8, channel: u8) -> u8 {
    opcode | (channel & CHANNEL_MASK)
}

/// System real-time messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RealTime {
    /// 24 pulses per quarter note
    TimingClock,
    /// Start the sequence from the beginning
    Start,
    /// Resume from the current position
    Continue,
    /// Stop playback
    Stop,
    /// Keep-alive, sent every 300 ms by devices that use it
    ActiveSensing,
    /// Return receivers to power-up state
    Reset,
}

impl RealTime {
    /// Parse a real-time message from its wire byte
    ///
    /// The undefined real-time bytes 0xF9 and 0xFD return `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TIMING_CLOCK => Some(RealTime::TimingClock),
            START => Some(RealTime::Start),
            CONTINUE => Some(RealTime::Continue),
            STOP => Some(RealTime::Stop),
            ACTIVE_SENSING => Some(RealTime::ActiveSensing),
            RESET => Some(RealTime::Reset),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            RealTime::TimingClock => TIMING_CLOCK,
            RealTime::Start => START,
            RealTime::Continue => CONTINUE,
            RealTime::Stop => STOP,
            RealTime::ActiveSensing => ACTIVE_SENSING,
            RealTime::Reset => RESET,
        }
    }

    /// Returns true for transport control (start, continue, stop)
    pub fn is_transport(&self) -> bool {
        matches!(self, RealTime::Start | RealTime::Continue | RealTime::Stop)
    }
}
