//! Tactus - Serial MIDI Interface Firmware
//!
//! Main firmware binary for RP2040 boards with a 5-pin DIN MIDI port on
//! UART0 (GPIO0 = MIDI OUT, GPIO1 = MIDI IN through an optocoupler).
//!
//! Named after the Latin "tactus" meaning "beat" -
//! the pulse that every clock byte on the wire carries.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tactus_hal::{UartConfig as LineConfig, MIDI_BAUD_RATE};
use tactus_protocol::MidiConfig;

/// Embedded configuration (compiled into firmware)
/// Edit midi.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../midi.toml");

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tactus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Setup UART for the MIDI port (8N1 matches the embassy defaults)
    let line = LineConfig::with_baudrate(config.baudrate);
    if line.baudrate != MIDI_BAUD_RATE {
        warn!("Non-standard MIDI baud rate {}", line.baudrate);
    }

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = line.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!(
        "UART initialized at {} baud ({} us per byte)",
        line.baudrate,
        line.byte_time_us()
    );

    spawner.spawn(unwrap!(tasks::midi_rx_task(rx, config.parser())));
    spawner.spawn(unwrap!(tasks::midi_tx_task(tx, config.encoder())));
    spawner.spawn(unwrap!(tasks::thru_task(config)));

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded midi.toml, falling back to defaults
///
/// build.rs validates the same file with the `toml` crate.
fn load_config() -> MidiConfig {
    match MidiConfig::from_toml(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: running_status={}, rx_channel={:?}, tx_channel={}, thru={}",
                config.running_status, config.rx_channel, config.tx_channel, config.thru
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}, using defaults", e);
            MidiConfig::default()
        }
    }
}
