//! Diagnostic text for the codec state
//!
//! Renders the transmit and receive running status, the pending-byte flag
//! and a coarse state tag as one fixed-format line:
//!
//! ```text
//! run_tx:90,run_rx:B0,3rd_byte: 1,state: 2
//! ```
//!
//! Values are uppercase hex padded to two columns.

use core::fmt::{self, Write};

use heapless::String;

use crate::encoder::Encoder;
use crate::parser::{MidiParser, ParserState};

/// Capacity of the rendered diagnostic line
pub const DIAG_TEXT_LEN: usize = 64;

/// Coarse parser state: no running status
pub const STATE_NO_STATUS: u8 = 0;
/// Coarse parser state: running status held, waiting for data
pub const STATE_READY: u8 = 1;
/// Coarse parser state: waiting for the second data byte
pub const STATE_PENDING: u8 = 2;

/// Snapshot of the codec state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    pub tx_running_status: u8,
    pub rx_running_status: u8,
    /// 1 if the parser holds a first data byte, else 0
    pub pending_second_byte: u8,
    pub state: u8,
}

impl Diagnostics {
    /// Capture the state of an encoder/parser pair
    pub fn capture(encoder: &Encoder, parser: &MidiParser) -> Self {
        Self::from_parser(encoder.running_status(), parser)
    }

    /// Capture the parser state alongside a transmit running status
    /// tracked elsewhere (e.g. by another task)
    pub fn from_parser(tx_running_status: u8, parser: &MidiParser) -> Self {
        let state = match parser.state() {
            ParserState::AwaitingSecondByte { .. } => STATE_PENDING,
            ParserState::Idle if parser.running_status() != 0 => STATE_READY,
            ParserState::Idle => STATE_NO_STATUS,
        };

        Self {
            tx_running_status,
            rx_running_status: parser.running_status(),
            pending_second_byte: u8::from(parser.state().is_pending()),
            state,
        }
    }

    /// Render into a fixed-capacity string
    pub fn text(&self) -> String<DIAG_TEXT_LEN> {
        let mut text = String::new();
        // The longest line is well under capacity
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_tx:{:2X},run_rx:{:2X},3rd_byte:{:2X},state:{:2X}",
            self.tx_running_status, self.rx_running_status, self.pending_second_byte, self.state
        )
    }
}
