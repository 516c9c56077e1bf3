//! MIDI IN receive task
//!
//! Reads the UART in chunks and feeds every byte through the parser.
//! Completed events go to [`MIDI_IN`].

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use tactus_protocol::{Diagnostics, MidiEvent, MidiHandler, MidiParser};

use crate::channels::{MIDI_IN, TX_RUNNING_STATUS};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Forwards parsed events to the inbound channel
struct Forwarder;

impl MidiHandler for Forwarder {
    fn dispatch(&mut self, event: MidiEvent) {
        // Never block the parser; drop if the consumer falls behind
        if MIDI_IN.try_send(event).is_err() {
            warn!("MIDI IN channel full, dropping {:?}", event);
        }
    }
}

/// MIDI RX task - parses the incoming byte stream
#[embassy_executor::task]
pub async fn midi_rx_task(mut rx: BufferedUartRx, mut parser: MidiParser) {
    info!("MIDI RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];
    let mut forwarder = Forwarder;

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                parser.feed_bytes(&buf[..n], &mut forwarder);

                if parser.take_tune_request() {
                    debug!("Tune Request received");
                }

                let diag =
                    Diagnostics::from_parser(TX_RUNNING_STATUS.load(Ordering::Relaxed), &parser);
                trace!("{}", diag.text().as_str());
            }
            Ok(_) => {}
            Err(e) => {
                // Framing/overrun: the partial message is unrecoverable
                warn!("UART read error: {:?}", e);
                parser.reset();
            }
        }
    }
}
