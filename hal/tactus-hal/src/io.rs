//! `embedded-io` bridge
//!
//! Lets any byte device implementing the `embedded-io` 0.6 traits
//! (HAL serial drivers, USB-CDC adapters, host-side mocks) serve as
//! the MIDI UART without a dedicated trait implementation.

use embedded_io::{ErrorKind, Read, ReadReady, Write};

use crate::uart::{UartError, UartRx, UartTx};

impl embedded_io::Error for UartError {
    fn kind(&self) -> ErrorKind {
        match self {
            UartError::Overrun => ErrorKind::OutOfMemory,
            UartError::Framing | UartError::Noise | UartError::Parity => ErrorKind::InvalidData,
            UartError::Other => ErrorKind::Other,
        }
    }
}

/// Adapter exposing an `embedded-io` device as [`UartTx`] / [`UartRx`]
pub struct IoUart<T> {
    inner: T,
}

impl<T> IoUart<T> {
    /// Wrap an `embedded-io` device
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Get access to the underlying device
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Get mutable access to the underlying device
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the adapter and return the underlying device
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for IoUart<T> {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<T: Read + ReadReady> UartRx for IoUart<T> {
    type Error = T::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.inner.read(&mut buf[filled..])?;
            if n == 0 {
                // EOF
                break;
            }
            filled += n;
        }
        Ok(filled)
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.inner.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        let n = self.inner.read(&mut byte)?;
        Ok(if n == 1 { Some(byte[0]) } else { None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::ErrorType;
    use heapless::{Deque, Vec};

    /// Mock serial device backed by fixed-size buffers
    struct MockSerial {
        rx: Deque<u8, 16>,
        tx: Vec<u8, 16>,
        fail_reads: bool,
    }

    impl MockSerial {
        fn new(incoming: &[u8]) -> Self {
            let mut rx = Deque::new();
            for &b in incoming {
                rx.push_back(b).unwrap();
            }
            Self {
                rx,
                tx: Vec::new(),
                fail_reads: false,
            }
        }
    }

    impl ErrorType for MockSerial {
        type Error = UartError;
    }

    impl Read for MockSerial {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.fail_reads {
                return Err(UartError::Framing);
            }
            let mut n = 0;
            while n < buf.len() {
                match self.rx.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }
    }

    impl ReadReady for MockSerial {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.rx.is_empty())
        }
    }

    impl Write for MockSerial {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.tx.extend_from_slice(buf).map_err(|_| UartError::Overrun)?;
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_try_read_byte_polls() {
        let mut uart = IoUart::new(MockSerial::new(&[0x90, 0x3C]));
        assert_eq!(uart.try_read_byte(), Ok(Some(0x90)));
        assert_eq!(uart.try_read_byte(), Ok(Some(0x3C)));
        // Nothing pending: returns immediately
        assert_eq!(uart.try_read_byte(), Ok(None));
    }

    #[test]
    fn test_write_blocking_forwards_all_bytes() {
        let mut uart = IoUart::new(MockSerial::new(&[]));
        uart.write_blocking(&[0x90, 0x3C, 0x64]).unwrap();
        uart.flush().unwrap();
        assert_eq!(uart.inner().tx.as_slice(), &[0x90, 0x3C, 0x64]);
    }

    #[test]
    fn test_read_blocking_stops_at_eof() {
        let mut uart = IoUart::new(MockSerial::new(&[1, 2]));
        let mut buf = [0u8; 4];
        assert_eq!(uart.read_blocking(&mut buf), Ok(2));
        assert_eq!(&buf[..2], &[1, 2]);
    }

    #[test]
    fn test_read_error_propagates() {
        let mut serial = MockSerial::new(&[0xF8]);
        serial.fail_reads = true;
        let mut uart = IoUart::new(serial);
        assert_eq!(uart.try_read_byte(), Err(UartError::Framing));
    }

    #[test]
    fn test_error_kind_mapping() {
        use embedded_io::Error;
        assert_eq!(UartError::Overrun.kind(), ErrorKind::OutOfMemory);
        assert_eq!(UartError::Parity.kind(), ErrorKind::InvalidData);
        assert_eq!(UartError::Other.kind(), ErrorKind::Other);
    }
}
