//! MIDI OUT transmit task
//!
//! Drains [`MIDI_OUT`] through the running-status encoder.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use tactus_protocol::Encoder;

use crate::channels::{MIDI_OUT, TX_RUNNING_STATUS};

/// MIDI TX task - encodes and writes outbound messages
#[embassy_executor::task]
pub async fn midi_tx_task(mut tx: BufferedUartTx, mut encoder: Encoder) {
    info!("MIDI TX task started");

    loop {
        let msg = MIDI_OUT.receive().await;
        let packet = encoder.encode(&msg);
        TX_RUNNING_STATUS.store(encoder.running_status(), Ordering::Relaxed);

        if let Err(e) = tx.write_all(&packet).await {
            warn!("Failed to send {:?}: {:?}", msg, e);
        } else {
            trace!("TX: {:X}", packet.as_slice());
        }
    }
}
