/// Byte-oriented duplex channel to the reader module.
///
/// The scan session drives exactly one transport handle for its whole open
/// lifetime. Implement this for whatever carries the link (serial port, a
/// test double).
pub trait ReaderTransport {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Write a full frame to the reader
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read available bytes, blocking up to `timeout_ms`. A timeout with
    /// nothing received is `Ok(0)`, not an error.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;

    /// Discard any unread input
    fn clear_input(&mut self) -> Result<(), Self::Error>;
}
