//! Frame construction and decoding for the reader's serial framing protocol.
//!
//! Every message in both directions shares one envelope: a fixed header
//! byte, a frame type, a command byte, a 16-bit big-endian payload length,
//! the payload, an additive checksum and a terminator byte.

use thiserror::Error;

/// Fixed first byte of every frame.
pub const HEADER: u8 = 0xBB;
/// Fixed last byte of every frame.
pub const TERMINATOR: u8 = 0x7E;
/// Frame type of host-to-reader commands.
pub const TYPE_COMMAND: u8 = 0x00;
/// Frame type of reader responses.
pub const TYPE_RESPONSE: u8 = 0x01;
/// Frame type of reader notifications, including tag detections.
pub const TYPE_NOTIFICATION: u8 = 0x02;
/// Single-tag inventory command code.
pub const CMD_INVENTORY: u8 = 0x22;
/// Command byte carried by reader error reports.
pub const CMD_ERROR_REPORT: u8 = 0xFF;
/// Error code reported when no tag answered the inventory round.
pub const ERR_NO_TAG: u8 = 0x15;

/// Shortest buffer that can hold the envelope: header, type, command,
/// two length bytes, checksum, terminator.
const MIN_FRAME_LEN: usize = 7;
/// Shortest buffer accepted as a tag notification.
const MIN_TAG_FRAME_LEN: usize = 11;
/// Payload bytes preceding the EPC in a tag notification: RSSI and PC.
const TAG_PREFIX_LEN: usize = 3;

/// Semantic result of decoding one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    /// A tag answered the inventory round.
    TagDetected { rssi: u8, pc: u16, epc: Vec<u8> },
    /// The reader reported an error code. [`ERR_NO_TAG`] means the field
    /// was empty, anything else is a genuine fault.
    ErrorReported { code: u8 },
    /// Structurally valid response that matches no shape this driver knows.
    Unrecognized,
}

/// Why a buffer could not be decoded into an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Fewer bytes than the smallest possible frame.
    #[error("frame too short: got {len} bytes, need at least 7")]
    TooShort { len: usize },
    /// First byte is not the frame header.
    #[error("bad frame header: expected 0xBB, got 0x{found:02X}")]
    BadHeader { found: u8 },
    /// The buffer cannot hold the payload the frame declares.
    #[error("frame shorter than its declared payload")]
    IncompletePayload,
    /// The checksum byte does not match the frame content.
    #[error("checksum mismatch: computed 0x{computed:02X}, frame carries 0x{carried:02X}")]
    BadChecksum { computed: u8, carried: u8 },
    /// The type and command bytes match no known frame shape.
    #[error("frame shape not recognized")]
    UnknownShape,
}

/// Builds a command frame around `command` and its parameter bytes.
pub(crate) fn build_command(command: u8, params: &[u8]) -> Vec<u8> {
    let [msb, lsb] = (params.len() as u16).to_be_bytes();

    let checksum = [TYPE_COMMAND, command, msb, lsb]
        .iter()
        .chain(params)
        .fold(0u8, |acc, &b| acc.wrapping_add(b));

    let mut frame = Vec::with_capacity(MIN_FRAME_LEN + params.len());
    frame.push(HEADER);
    frame.push(TYPE_COMMAND);
    frame.push(command);
    frame.push(msb);
    frame.push(lsb);
    frame.extend_from_slice(params);
    frame.push(checksum);
    frame.push(TERMINATOR);
    frame
}

/// Builds the single-tag inventory command frame.
///
/// Always the same 7 bytes: `BB 00 22 00 00 22 7E`.
pub fn build_inventory_command() -> Vec<u8> {
    build_command(CMD_INVENTORY, &[])
}

/// Sums the checksummed span of a frame.
///
/// `frame` is the prefix running from the header byte through the last
/// payload byte. The header itself is excluded; everything from the frame
/// type onward is added modulo 256. Inputs too short to hold the prefix
/// of a zero-payload frame (header, type, command, two length bytes)
/// yield 0.
pub fn compute_checksum(frame: &[u8]) -> u8 {
    if frame.len() < 5 {
        return 0;
    }
    frame[1..].iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Checks a received frame's checksum byte against its content.
///
/// The reader does not reliably fill this field in, so [`decode_frame`]
/// never calls this; callers that want the gate run it themselves on the
/// raw buffer.
pub fn verify_checksum(buffer: &[u8]) -> Result<(), DecodeFailure> {
    if buffer.len() < MIN_FRAME_LEN {
        return Err(DecodeFailure::TooShort { len: buffer.len() });
    }
    if buffer[0] != HEADER {
        return Err(DecodeFailure::BadHeader { found: buffer[0] });
    }

    let payload_len = u16::from_be_bytes([buffer[3], buffer[4]]) as usize;
    let checksum_at = 5 + payload_len;
    if buffer.len() < checksum_at + 2 {
        return Err(DecodeFailure::IncompletePayload);
    }

    let computed = compute_checksum(&buffer[..checksum_at]);
    let carried = buffer[checksum_at];
    if computed != carried {
        return Err(DecodeFailure::BadChecksum { computed, carried });
    }
    Ok(())
}

/// Decodes one raw buffer into a [`DecodedEvent`].
///
/// Truncated or garbage input maps to a typed [`DecodeFailure`], never a
/// panic. The checksum byte is not verified here, see [`verify_checksum`].
pub fn decode_frame(buffer: &[u8]) -> Result<DecodedEvent, DecodeFailure> {
    if buffer.len() < MIN_FRAME_LEN {
        return Err(DecodeFailure::TooShort { len: buffer.len() });
    }
    if buffer[0] != HEADER {
        return Err(DecodeFailure::BadHeader { found: buffer[0] });
    }

    match (buffer[1], buffer[2]) {
        (TYPE_RESPONSE, CMD_ERROR_REPORT) => {
            Ok(DecodedEvent::ErrorReported { code: buffer[5] })
        }
        (TYPE_RESPONSE, _) => Ok(DecodedEvent::Unrecognized),
        (TYPE_NOTIFICATION, CMD_INVENTORY) => decode_tag_notification(buffer),
        _ => Err(DecodeFailure::UnknownShape),
    }
}

fn decode_tag_notification(buffer: &[u8]) -> Result<DecodedEvent, DecodeFailure> {
    if buffer.len() < MIN_TAG_FRAME_LEN {
        return Err(DecodeFailure::IncompletePayload);
    }

    let payload_len = u16::from_be_bytes([buffer[3], buffer[4]]) as usize;
    // payload, checksum and terminator must all fit behind the 5-byte prefix
    if buffer.len() < 5 + payload_len + 2 {
        return Err(DecodeFailure::IncompletePayload);
    }
    // a declared payload shorter than RSSI + PC cannot hold a tag
    let epc_len = payload_len
        .checked_sub(TAG_PREFIX_LEN)
        .ok_or(DecodeFailure::IncompletePayload)?;

    let rssi = buffer[5];
    let pc = u16::from_be_bytes([buffer[6], buffer[7]]);
    let epc = buffer[8..8 + epc_len].to_vec();

    Ok(DecodedEvent::TagDetected { rssi, pc, epc })
}
