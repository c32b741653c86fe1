//! Polling driver for UHF RFID reader modules speaking the 0xBB serial
//! framing protocol.
//!
//! The crate splits into a pure frame codec (build the inventory command,
//! decode and validate inbound frames) and a thin scan session that owns
//! the transport and runs one send/receive/decode cycle at a time. Pacing,
//! rendering and shutdown stay with the caller; the `uhf-scan` binary is
//! one such caller.
//!
//! # Features
//!
//! - `serial` - serial port transport for desktop using serialport crate
//! - `cli` - the `uhf-scan` polling binary
//!
//! # Example
//!
//! ```ignore
//! use uhf_scan::{CycleOutcome, ScanConfig, ScanSession, SerialTransport};
//!
//! let config = ScanConfig::default();
//! let transport = SerialTransport::open(&config)?;
//! let mut session = ScanSession::new(transport, config);
//!
//! match session.run_cycle()? {
//!     CycleOutcome::Tag(tag) => println!("Found tag: {}", tag.epc_hex()),
//!     outcome => println!("{:?}", outcome),
//! }
//! ```

mod frame;
mod session;
mod transport;
mod types;

#[cfg(feature = "serial")]
mod serial;

// Re-exports
pub use frame::{
    DecodeFailure, DecodedEvent, ERR_NO_TAG, build_inventory_command, compute_checksum,
    decode_frame, verify_checksum,
};
pub use session::{CycleOutcome, ScanConfig, ScanSession};
pub use transport::ReaderTransport;
pub use types::{ScanError, TagRead, bytes_to_hex};

#[cfg(feature = "serial")]
pub use serial::SerialTransport;
