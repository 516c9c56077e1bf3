//! Serial MIDI port
//!
//! Combines a UART, the running-status encoder, the receive parser and an
//! event handler into one owned value. All codec state lives here; nothing
//! is global.
//!
//! Receiving is polled: call [`SerialMidi::receive_parser`] from the main
//! loop. Each call consumes at most one byte and returns immediately when
//! none is waiting.

use heapless::String;
use tactus_hal::{UartRx, UartTx};
use tactus_protocol::diag::DIAG_TEXT_LEN;
use tactus_protocol::status::RealTime;
use tactus_protocol::{Diagnostics, Encoder, MidiConfig, MidiHandler, MidiMessage, MidiParser};

/// MIDI port over a UART
pub struct SerialMidi<U, H> {
    uart: U,
    handler: H,
    encoder: Encoder,
    parser: MidiParser,
}

impl<U, H> SerialMidi<U, H> {
    /// Create a port with running status on and an omni receiver
    ///
    /// # Arguments
    /// - `uart`: Serial port already configured for 31250 baud 8N1
    /// - `handler`: Receives parsed events
    pub fn new(uart: U, handler: H) -> Self {
        Self {
            uart,
            handler,
            encoder: Encoder::new(),
            parser: MidiParser::new(),
        }
    }

    /// Create a port with codec settings taken from `config`
    pub fn with_config(uart: U, handler: H, config: &MidiConfig) -> Self {
        Self {
            uart,
            handler,
            encoder: config.encoder(),
            parser: config.parser(),
        }
    }

    /// Get access to the event handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Get mutable access to the event handler
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Get access to the underlying UART
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Get mutable access to the underlying UART
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Get access to the receive parser
    pub fn parser(&self) -> &MidiParser {
        &self.parser
    }

    /// Get mutable access to the receive parser
    pub fn parser_mut(&mut self) -> &mut MidiParser {
        &mut self.parser
    }

    /// Get access to the transmit encoder
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Snapshot of the codec state
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::capture(&self.encoder, &self.parser)
    }

    /// Diagnostic line: `run_tx:..,run_rx:..,3rd_byte:..,state:..`
    pub fn text(&self) -> String<DIAG_TEXT_LEN> {
        self.diagnostics().text()
    }

    /// Consume the port and return the UART and handler
    pub fn into_parts(self) -> (U, H) {
        (self.uart, self.handler)
    }
}

impl<U: UartRx, H: MidiHandler> SerialMidi<U, H> {
    /// Process at most one received byte
    ///
    /// Returns `Ok(false)` without blocking when no byte is available.
    /// A byte that completes a message is dispatched to the handler
    /// before this returns.
    pub fn receive_parser(&mut self) -> Result<bool, U::Error> {
        let Some(byte) = self.uart.try_read_byte()? else {
            return Ok(false);
        };

        if let Some(event) = self.parser.feed(byte) {
            self.handler.dispatch(event);
        }
        Ok(true)
    }

    /// Process every byte currently waiting
    ///
    /// Returns the number of bytes consumed.
    pub fn receive_all(&mut self) -> Result<usize, U::Error> {
        let mut consumed = 0;
        while self.receive_parser()? {
            consumed += 1;
        }
        Ok(consumed)
    }
}

impl<U: UartTx, H> SerialMidi<U, H> {
    /// Encode and write one message
    pub fn send(&mut self, msg: &MidiMessage) -> Result<(), U::Error> {
        let packet = self.encoder.encode(msg);
        self.uart.write_blocking(&packet)
    }

    /// Note On (`channel` 0-15, `key` and `velocity` 0-127)
    pub fn note_on(&mut self, channel: u8, key: u8, velocity: u8) -> Result<(), U::Error> {
        self.send(&MidiMessage::NoteOn {
            channel,
            key,
            velocity,
        })
    }

    /// Note Off
    pub fn note_off(&mut self, channel: u8, key: u8, velocity: u8) -> Result<(), U::Error> {
        self.send(&MidiMessage::NoteOff {
            channel,
            key,
            velocity,
        })
    }

    /// Control Change
    pub fn control_change(&mut self, channel: u8, controller: u8, value: u8) -> Result<(), U::Error> {
        self.send(&MidiMessage::ControlChange {
            channel,
            controller,
            value,
        })
    }

    /// Channel Aftertouch
    pub fn channel_aftertouch(&mut self, channel: u8, value: u8) -> Result<(), U::Error> {
        self.send(&MidiMessage::ChannelAftertouch { channel, value })
    }

    /// Modulation wheel, 14-bit (0-16383), sent as LSB then MSB controller
    pub fn mod_wheel_14bit(&mut self, channel: u8, value: u16) -> Result<(), U::Error> {
        for msg in MidiMessage::mod_wheel_14bit(channel, value) {
            self.send(&msg)?;
        }
        Ok(())
    }

    /// Modulation wheel, MSB only (0-127)
    pub fn mod_wheel_msb(&mut self, channel: u8, value: u8) -> Result<(), U::Error> {
        self.send(&MidiMessage::mod_wheel_msb(channel, value))
    }

    /// Modulation wheel from a plain integer
    ///
    /// Truncates to the low byte and sends it as MSB only.
    pub fn mod_wheel(&mut self, channel: u8, value: i32) -> Result<(), U::Error> {
        self.mod_wheel_msb(channel, value as u8)
    }

    /// Pitch wheel, unsigned: 0 = low, 8192 = center, 16383 = high
    pub fn pitch_wheel_unsigned(&mut self, channel: u8, value: u16) -> Result<(), U::Error> {
        self.send(&MidiMessage::PitchWheel { channel, value })
    }

    /// Pitch wheel, signed: -8192 = low, 0 = center, 8191 = high
    pub fn pitch_wheel_signed(&mut self, channel: u8, value: i16) -> Result<(), U::Error> {
        self.send(&MidiMessage::pitch_wheel_signed(channel, value))
    }

    /// Timing Clock (0xF8)
    pub fn timing_clock(&mut self) -> Result<(), U::Error> {
        self.send(&MidiMessage::RealTime(RealTime::TimingClock))
    }

    /// Start (0xFA)
    pub fn start(&mut self) -> Result<(), U::Error> {
        self.send(&MidiMessage::RealTime(RealTime::Start))
    }

    /// Continue (0xFB)
    pub fn continue_playback(&mut self) -> Result<(), U::Error> {
        self.send(&MidiMessage::RealTime(RealTime::Continue))
    }

    /// Stop (0xFC)
    pub fn stop(&mut self) -> Result<(), U::Error> {
        self.send(&MidiMessage::RealTime(RealTime::Stop))
    }

    /// Active Sensing (0xFE)
    pub fn active_sensing(&mut self) -> Result<(), U::Error> {
        self.send(&MidiMessage::RealTime(RealTime::ActiveSensing))
    }

    /// System Reset (0xFF)
    pub fn system_reset(&mut self) -> Result<(), U::Error> {
        self.send(&MidiMessage::RealTime(RealTime::Reset))
    }

    /// Flush the UART transmit buffer
    pub fn flush(&mut self) -> Result<(), U::Error> {
        self.uart.flush()
    }
}
