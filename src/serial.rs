//! Serial port transport for desktop using serialport crate

use std::time::Duration;

use crate::session::ScanConfig;
use crate::transport::ReaderTransport;

pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open the device named in `config` at the configured baud rate.
    ///
    /// The input buffer is not flushed here; the session does that once
    /// before its first cycle.
    pub fn open(config: &ScanConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(config.port.as_str(), config.baud_rate)
            .timeout(config.read_timeout)
            .open()?;

        Ok(Self { port })
    }
}

impl ReaderTransport for SerialTransport {
    type Error = std::io::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.port, data)
    }

    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        self.port
            .set_timeout(Duration::from_millis(u64::from(timeout_ms)))
            .map_err(|e| std::io::Error::other(e))?;
        match std::io::Read::read(&mut self.port, buf) {
            Ok(n) => Ok(n),
            // an expired timeout surfaces as TimedOut; an empty read is a
            // valid "no response" outcome, not a fault
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        self.port
            .clear(serialport::ClearBuffer::Input)
            .map_err(|e| std::io::Error::other(e))
    }
}
