//! Event handlers
//!
//! The parser reports completed messages through [`MidiHandler`], one
//! method per message kind. Implement only the methods you care about;
//! the rest default to no-ops.
//!
//! [`EventQueue`] is a ready-made handler that buffers events for later
//! processing (e.g. from a different task than the one polling the UART).

use heapless::Deque;

use crate::event::MidiEvent;

/// Receiver of parsed MIDI messages
///
/// Each method is called synchronously from the parser's context, at
/// most once per byte fed.
pub trait MidiHandler {
    /// Note On with nonzero velocity
    fn on_note_on(&mut self, _key: u8, _velocity: u8) {}

    /// Note Off (also Note On with velocity 0)
    fn on_note_off(&mut self, _key: u8, _velocity: u8) {}

    /// Control Change
    fn on_control_change(&mut self, _controller: u8, _value: u8) {}

    /// Pitch wheel, raw LSB and MSB data bytes
    fn on_pitch_wheel(&mut self, _lsb: u8, _msb: u8) {}

    /// System real-time byte (0xF8-0xFF)
    fn on_realtime(&mut self, _byte: u8) {}

    /// Route an event to the matching method
    fn dispatch(&mut self, event: MidiEvent) {
        match event {
            MidiEvent::NoteOn { key, velocity } => self.on_note_on(key, velocity),
            MidiEvent::NoteOff { key, velocity } => self.on_note_off(key, velocity),
            MidiEvent::ControlChange { controller, value } => {
                self.on_control_change(controller, value)
            }
            MidiEvent::PitchWheel { lsb, msb } => self.on_pitch_wheel(lsb, msb),
            MidiEvent::RealTime(byte) => self.on_realtime(byte),
        }
    }
}

impl<H: MidiHandler + ?Sized> MidiHandler for &mut H {
    fn on_note_on(&mut self, key: u8, velocity: u8) {
        (**self).on_note_on(key, velocity)
    }

    fn on_note_off(&mut self, key: u8, velocity: u8) {
        (**self).on_note_off(key, velocity)
    }

    fn on_control_change(&mut self, controller: u8, value: u8) {
        (**self).on_control_change(controller, value)
    }

    fn on_pitch_wheel(&mut self, lsb: u8, msb: u8) {
        (**self).on_pitch_wheel(lsb, msb)
    }

    fn on_realtime(&mut self, byte: u8) {
        (**self).on_realtime(byte)
    }

    fn dispatch(&mut self, event: MidiEvent) {
        (**self).dispatch(event)
    }
}

/// Handler that forwards every event to a closure
pub struct FnHandler<F>(pub F);

impl<F: FnMut(MidiEvent)> MidiHandler for FnHandler<F> {
    fn dispatch(&mut self, event: MidiEvent) {
        (self.0)(event)
    }
}

/// Bounded event buffer
///
/// When full, new events are dropped and counted.
#[derive(Debug, Clone)]
pub struct EventQueue<const N: usize> {
    events: Deque<MidiEvent, N>,
    dropped: u32,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Take the oldest event
    pub fn pop(&mut self) -> Option<MidiEvent> {
        self.events.pop_front()
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are buffered
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard buffered events and the drop counter
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    fn push(&mut self, event: MidiEvent) {
        if self.events.push_back(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

impl<const N: usize> MidiHandler for EventQueue<N> {
    fn dispatch(&mut self, event: MidiEvent) {
        self.push(event);
    }

    fn on_note_on(&mut self, key: u8, velocity: u8) {
        self.push(MidiEvent::NoteOn { key, velocity });
    }

    fn on_note_off(&mut self, key: u8, velocity: u8) {
        self.push(MidiEvent::NoteOff { key, velocity });
    }

    fn on_control_change(&mut self, controller: u8, value: u8) {
        self.push(MidiEvent::ControlChange { controller, value });
    }

    fn on_pitch_wheel(&mut self, lsb: u8, msb: u8) {
        self.push(MidiEvent::PitchWheel { lsb, msb });
    }

    fn on_realtime(&mut self, byte: u8) {
        self.push(MidiEvent::RealTime(byte));
    }
}
