//! MIDI 1.0 Serial Wire Codec
//!
//! This crate converts structured MIDI events to and from the byte stream
//! carried on a 31250 baud serial link (classic 5-pin DIN MIDI).
//!
//! # Wire Overview
//!
//! Channel messages are a status byte followed by one or two data bytes:
//! ```text
//! ┌──────────────────────┬────────────┬────────────┐
//! │ STATUS 1kkk cccc     │ DATA1      │ DATA2      │
//! │ kind + channel       │ 0vvv vvvv  │ 0vvv vvvv  │
//! └──────────────────────┴────────────┴────────────┘
//! ```
//!
//! - [`Encoder`] omits the status byte when it repeats the previous one
//!   ("running status").
//! - [`MidiParser`] rebuilds events one byte at a time, tracking running
//!   status and letting real-time bytes (0xF8-0xFF) interleave anywhere.
//!
//! Neither side touches hardware. The serial port is a collaborator that
//! supplies bytes to [`MidiParser::feed`] and sends the [`Packet`]s
//! produced by [`Encoder::encode`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod diag;
pub mod encoder;
pub mod event;
pub mod handler;
pub mod message;
pub mod parser;
pub mod status;

pub use config::{ConfigError, MidiConfig};
pub use diag::Diagnostics;
pub use encoder::Encoder;
pub use event::MidiEvent;
pub use handler::{EventQueue, MidiHandler};
pub use message::{MidiMessage, Packet, MAX_PACKET_SIZE};
pub use parser::{MidiParser, ParserState};
pub use status::RealTime;
