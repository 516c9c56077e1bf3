//! Tactus Hardware Abstraction Layer
//!
//! This crate defines the serial I/O boundary that the MIDI codec talks to.
//! Chip-specific code (or a test mock) implements these traits; the codec
//! itself never touches registers or baud-rate setup.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tactus-drivers (SerialMidi)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tactus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip UART    │       │ embedded-io   │
//! │  (direct)     │       │ via IoUart    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`io::IoUart`] - Adapter for any `embedded-io` byte device

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::IoUart;
pub use uart::{Uart, UartConfig, UartError, UartRx, UartTx, MIDI_BAUD_RATE};
