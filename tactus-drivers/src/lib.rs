//! Serial MIDI driver
//!
//! This crate binds the `tactus-protocol` codec to a UART implementing
//! the `tactus-hal` traits:
//!
//! - [`SerialMidi`] - send operations per message kind, plus the polled
//!   receive parser
//!
//! `SerialMidi` is the blocking, polled entry point: call its send methods
//! and `receive_parser()` from a main loop. Async firmware drives the
//! `tactus-protocol` encoder and parser directly from its UART tasks.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod serial_midi;

pub use serial_midi::SerialMidi;
