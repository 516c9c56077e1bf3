//! Software MIDI thru
//!
//! Consumes received events, logs them, and when enabled re-sends them on
//! the configured transmit channel.

use defmt::*;

use tactus_protocol::MidiConfig;

use crate::channels::{MIDI_IN, MIDI_OUT};

#[embassy_executor::task]
pub async fn thru_task(config: MidiConfig) {
    info!("Thru task started (thru={})", config.thru);

    loop {
        let event = MIDI_IN.receive().await;
        debug!("MIDI IN: {:?}", event);

        if !config.thru {
            continue;
        }

        if let Some(msg) = event.to_message(config.tx_channel) {
            MIDI_OUT.send(msg).await;
        }
    }
}
