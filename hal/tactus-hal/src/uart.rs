//! UART serial communication abstractions
//!
//! Provides the two primitives the MIDI codec consumes: "write these
//! bytes" and "give me the next received byte, if there is one".

/// MIDI 1.0 serial line rate in bits per second
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// Errors reported by UART implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Framing error (bad stop bit, often a wrong baud rate)
    Framing,
    /// Noise detected on the line
    Noise,
    /// Receive overrun, bytes were lost
    Overrun,
    /// Parity error
    Parity,
    /// Other error
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Blocks until the buffer is filled or an error occurs.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Poll for a single received byte without blocking
    ///
    /// Returns `Ok(None)` when nothing is waiting in the receive buffer.
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Read a single byte from the UART, blocking until one arrives
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// MIDI line settings: 31250 baud, 8 data bits, no parity, 1 stop bit
    pub const fn midi() -> Self {
        Self {
            baudrate: MIDI_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// MIDI framing at a non-standard rate (e.g. 38400 for some USB-serial bridges)
    pub const fn with_baudrate(baudrate: u32) -> Self {
        let mut config = Self::midi();
        config.baudrate = baudrate;
        config
    }

    /// Time on the wire for one byte in microseconds (start + data + parity + stop bits)
    pub fn byte_time_us(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
            DataBits::Nine => 9,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        let bits = 1 + data + parity + stop;
        (bits * 1_000_000) / self.baudrate.max(1)
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::midi()
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_midi() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 31_250);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_midi_byte_time() {
        // 10 bits at 31250 baud = 320 µs
        assert_eq!(UartConfig::midi().byte_time_us(), 320);
    }

    #[test]
    fn test_with_baudrate() {
        let config = UartConfig::with_baudrate(38_400);
        assert_eq!(config.baudrate, 38_400);
        assert_eq!(config.stop_bits, StopBits::One);
    }
}
