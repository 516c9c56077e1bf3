//! Receive parser
//!
//! Consumes one byte per call and reports at most one completed message.
//! State persists across calls so messages may arrive split across any
//! number of reads:
//!
//! - Running status: the last non-real-time status byte seen. Data bytes
//!   arriving without a fresh status byte reuse it.
//! - Pending first data byte of a two-data-byte message.
//!
//! Real-time bytes (0xF8-0xFF) are reported immediately and leave both
//! untouched, so they may interrupt any message mid-flight.
//!
//! Malformed input never produces an error: orphan data is discarded and
//! unsupported status bytes clear running status.

use crate::event::MidiEvent;
use crate::handler::MidiHandler;
use crate::status::{
    is_channel_status, is_realtime, is_status, CHANNEL_MASK, CLASS_MASK, CONTROL_CHANGE, NOTE_OFF,
    NOTE_ON, PITCH_WHEEL, PROGRAM_CHANGE, SONG_POSITION, SONG_SELECT, SYSEX_START, TUNE_REQUEST,
};

/// Parser position within a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserState {
    /// Waiting for a status byte or the first data byte
    Idle,
    /// First data byte stored, waiting for the second
    AwaitingSecondByte { first: u8 },
}

impl ParserState {
    /// Returns true if a second data byte is expected
    pub fn is_pending(&self) -> bool {
        matches!(self, ParserState::AwaitingSecondByte { .. })
    }
}

/// Byte-at-a-time MIDI receive state machine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiParser {
    /// Last received status byte (0 = none), channel cleared once a
    /// message completes
    running_status: u8,
    /// Channel of the last channel status byte
    channel: u8,
    state: ParserState,
    /// Tune Request seen and not yet taken
    tune_request: bool,
    /// Only surface channel messages on this channel (`None` = omni)
    rx_channel: Option<u8>,
}

impl Default for MidiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiParser {
    /// Create a parser that accepts all channels (omni)
    pub const fn new() -> Self {
        Self {
            running_status: 0,
            channel: 0,
            state: ParserState::Idle,
            tune_request: false,
            rx_channel: None,
        }
    }

    /// Create a parser that only dispatches channel messages on `channel`
    ///
    /// Messages on other channels are still consumed so running status
    /// stays in sync. Real-time bytes are always dispatched.
    pub const fn with_channel(channel: u8) -> Self {
        let mut parser = Self::new();
        parser.rx_channel = Some(channel & CHANNEL_MASK);
        parser
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.running_status = 0;
        self.channel = 0;
        self.state = ParserState::Idle;
        self.tune_request = false;
    }

    /// Current receive running status (0 = none)
    pub fn running_status(&self) -> u8 {
        self.running_status
    }

    /// Current position within a message
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Channel filter (`None` = omni)
    pub fn rx_channel(&self) -> Option<u8> {
        self.rx_channel
    }

    /// Returns and clears the Tune Request flag
    ///
    /// The parser records Tune Request (0xF6) but does not act on it.
    pub fn take_tune_request(&mut self) -> bool {
        core::mem::take(&mut self.tune_request)
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(event)` when the byte completes a supported message.
    pub fn feed(&mut self, byte: u8) -> Option<MidiEvent> {
        if is_status(byte) {
            self.feed_status(byte)
        } else {
            self.feed_data(byte)
        }
    }

    /// Feed a buffer, dispatching every completed event to `handler`
    ///
    /// Returns the number of events dispatched.
    pub fn feed_bytes<H: MidiHandler + ?Sized>(&mut self, bytes: &[u8], handler: &mut H) -> usize {
        let mut dispatched = 0;
        for &byte in bytes {
            if let Some(event) = self.feed(byte) {
                handler.dispatch(event);
                dispatched += 1;
            }
        }
        dispatched
    }

    fn feed_status(&mut self, byte: u8) -> Option<MidiEvent> {
        if is_realtime(byte) {
            return Some(MidiEvent::RealTime(byte));
        }

        // SysEx start/end and other system common bytes land here too;
        // they are held as running status but not interpreted.
        self.running_status = byte;
        self.state = ParserState::Idle;
        if is_channel_status(byte) {
            self.channel = byte & CHANNEL_MASK;
        }
        if byte == TUNE_REQUEST {
            self.tune_request = true;
        }
        None
    }

    fn feed_data(&mut self, byte: u8) -> Option<MidiEvent> {
        if let ParserState::AwaitingSecondByte { first } = self.state {
            self.state = ParserState::Idle;
            return self.complete(first, byte);
        }

        match self.running_status {
            // Orphan data with no status context
            0 => {}
            // Note off/on, poly aftertouch, control change
            status if status < PROGRAM_CHANGE => {
                self.state = ParserState::AwaitingSecondByte { first: byte };
            }
            // Program change, channel aftertouch: consumed, not dispatched
            status if status < PITCH_WHEEL => {}
            status if status < SYSEX_START => {
                self.state = ParserState::AwaitingSecondByte { first: byte };
            }
            SONG_POSITION => {
                self.running_status = 0;
                self.state = ParserState::AwaitingSecondByte { first: byte };
            }
            // Song Select carries one data byte, so nothing is left pending
            SONG_SELECT => {
                self.running_status = 0;
            }
            _ => {
                self.running_status = 0;
            }
        }
        None
    }

    fn complete(&mut self, first: u8, second: u8) -> Option<MidiEvent> {
        let status = self.running_status;
        if is_channel_status(status) {
            self.running_status = status & CLASS_MASK;
        }
        if !self.accepts(status) {
            return None;
        }

        match status & CLASS_MASK {
            // Velocity zero is a note off by convention
            NOTE_ON if second == 0 => Some(MidiEvent::NoteOff {
                key: first,
                velocity: 0,
            }),
            NOTE_ON => Some(MidiEvent::NoteOn {
                key: first,
                velocity: second,
            }),
            NOTE_OFF => Some(MidiEvent::NoteOff {
                key: first,
                velocity: second,
            }),
            PITCH_WHEEL => Some(MidiEvent::PitchWheel {
                lsb: first,
                msb: second,
            }),
            CONTROL_CHANGE => Some(MidiEvent::ControlChange {
                controller: first,
                value: second,
            }),
            // Poly aftertouch, completed song position
            _ => None,
        }
    }

    fn accepts(&self, status: u8) -> bool {
        match self.rx_channel {
            Some(channel) if is_channel_status(status) => self.channel == channel,
            _ => true,
        }
    }
}
