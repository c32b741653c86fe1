//! One request/response cycle against the reader.

use std::time::Duration;

use log::debug;

use crate::frame::{self, DecodeFailure, DecodedEvent};
use crate::transport::ReaderTransport;
use crate::types::{ScanError, TagRead};

/// Upper bound on bytes consumed from the transport per cycle.
const READ_LIMIT: usize = 128;

/// Where to reach the reader and how the polling loop is paced.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Device path of the serial port, e.g. `/dev/ttyUSB0`
    pub port: String,
    /// Line speed in bits per second
    pub baud_rate: u32,
    /// How long one read may block waiting for a response
    pub read_timeout: Duration,
    /// Delay between polling cycles; consumed by the orchestration loop,
    /// not by the session itself
    pub poll_interval: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".into(),
            baud_rate: 115_200,
            read_timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Result of one polling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The reader did not answer before the read timeout
    NoResponse,
    /// A tag answered the inventory round
    Tag(TagRead),
    /// The reader reported an error code; [`crate::ERR_NO_TAG`] simply
    /// means no tag was in the field
    ReaderError { code: u8 },
    /// A structurally decodable frame matching no known shape, with the
    /// raw bytes for diagnostics
    Unclassified(Vec<u8>),
    /// A frame that failed to decode, with the raw bytes for diagnostics
    Malformed { failure: DecodeFailure, raw: Vec<u8> },
}

/// Drives the send/receive/decode cycle over one transport handle.
///
/// The session keeps no state between cycles beyond the transport itself;
/// pacing and retries belong to the caller.
pub struct ScanSession<T: ReaderTransport> {
    transport: T,
    config: ScanConfig,
    flushed: bool,
}

impl<T: ReaderTransport> ScanSession<T> {
    /// Create a session over an open transport.
    pub fn new(transport: T, config: ScanConfig) -> Self {
        Self {
            transport,
            config,
            flushed: false,
        }
    }

    /// Run one inventory cycle: send the command, read the response,
    /// decode and classify it.
    ///
    /// Only transport faults are errors; everything the decoder can say
    /// about the received bytes comes back inside the [`CycleOutcome`].
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, ScanError> {
        if !self.flushed {
            self.transport
                .clear_input()
                .map_err(|e| ScanError::Transport(format!("{:?}", e)))?;
            self.flushed = true;
        }

        let command = frame::build_inventory_command();
        debug!("Sending command: {:02X?}", command);
        self.transport
            .write(&command)
            .map_err(|e| ScanError::Transport(format!("{:?}", e)))?;

        let mut buf = [0u8; READ_LIMIT];
        let timeout_ms = self.config.read_timeout.as_millis() as u32;
        let received = self
            .transport
            .read(&mut buf, timeout_ms)
            .map_err(|e| ScanError::Transport(format!("{:?}", e)))?;

        if received == 0 {
            return Ok(CycleOutcome::NoResponse);
        }

        let raw = &buf[..received];
        debug!("Received {} bytes: {:02X?}", received, raw);

        Ok(match frame::decode_frame(raw) {
            Ok(DecodedEvent::TagDetected { rssi, pc, epc }) => {
                CycleOutcome::Tag(TagRead { rssi, pc, epc })
            }
            Ok(DecodedEvent::ErrorReported { code }) => CycleOutcome::ReaderError { code },
            Ok(DecodedEvent::Unrecognized) | Err(DecodeFailure::UnknownShape) => {
                CycleOutcome::Unclassified(raw.to_vec())
            }
            Err(failure) => CycleOutcome::Malformed {
                failure,
                raw: raw.to_vec(),
            },
        })
    }
}
