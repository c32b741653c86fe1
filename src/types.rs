//! Shared value types for scan results

use thiserror::Error;

/// One tag detection reported by the reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRead {
    /// Read strength of the detection, raw reader units
    pub rssi: u8,
    /// Protocol Control word preceding the EPC
    pub pc: u16,
    /// Electronic Product Code, raw bytes
    pub epc: Vec<u8>,
}

impl TagRead {
    /// EPC rendered as uppercase hex
    pub fn epc_hex(&self) -> String {
        bytes_to_hex(&self.epc)
    }
}

/// Failures that end a scan session
#[derive(Debug, Error)]
pub enum ScanError {
    /// The underlying transport failed to write or read
    #[error("transport error: {0}")]
    Transport(String),
}

/// Convert bytes to uppercase hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
