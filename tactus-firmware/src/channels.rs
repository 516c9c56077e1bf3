//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::AtomicU8;

use tactus_protocol::{MidiEvent, MidiMessage};

/// Channel capacity for received events
const MIDI_IN_SIZE: usize = 32;

/// Channel capacity for outbound messages
const MIDI_OUT_SIZE: usize = 32;

/// Events parsed from the MIDI IN port
pub static MIDI_IN: Channel<CriticalSectionRawMutex, MidiEvent, MIDI_IN_SIZE> = Channel::new();

/// Messages queued for the MIDI OUT port
pub static MIDI_OUT: Channel<CriticalSectionRawMutex, MidiMessage, MIDI_OUT_SIZE> =
    Channel::new();

/// Last status byte written by the tx task (0 = none yet)
pub static TX_RUNNING_STATUS: AtomicU8 = AtomicU8::new(0);
