//! Codec errors and frame assembly helpers.

use crate::header::{HEADER_LEN, Header};
use crate::message::InvalidMsgType;

/// Errors produced while encoding/decoding wire messages.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("malformed header: expected {HEADER_LEN} bytes, got {actual}")]
    MalformedHeader { actual: usize },

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    #[error("payload exceeds limit: limit={limit} actual={actual}")]
    PayloadTooLarge { limit: usize, actual: usize },

    #[error("field '{field}' exceeds {limit} bytes")]
    FieldTooLong { field: &'static str, limit: usize },

    #[error("invalid UTF-8 in field '{field}'")]
    InvalidText { field: &'static str },

    #[error(transparent)]
    InvalidMsgType(#[from] InvalidMsgType),
}

/// Concatenates an encoded header and its payload into one wire frame.
///
/// The header's `payload_len` must already describe `payload`.
#[must_use]
pub fn encode_frame(header: &Header, payload: &[u8]) -> Vec<u8> {
    debug_assert_eq!(header.payload_len as usize, payload.len());
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&header.encode());
    frame.extend_from_slice(payload);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MsgType;

    #[test]
    fn frame_is_header_then_payload() {
        let header = Header::new(1, MsgType::Join, 9, 3);
        let frame = encode_frame(&header, b"abc");
        assert_eq!(frame.len(), HEADER_LEN + 3);
        assert_eq!(&frame[..HEADER_LEN], &header.encode());
        assert_eq!(&frame[HEADER_LEN..], b"abc");
    }

    #[test]
    fn short_buffer_reports_actual_length() {
        let err = Header::decode(&[0u8; 7]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedHeader { actual: 7 }));
    }
}
