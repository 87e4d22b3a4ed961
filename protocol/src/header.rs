//! Fixed 12-byte control header preceding every message on the wire.

use crate::codec::CodecError;
use crate::message::MsgType;

/// Number of bytes in the encoded header.
pub const HEADER_LEN: usize = 12;

/// Wire header: `version` (u8), `msg_type` (u8), `flags` (u8), `reserved`
/// (u8), `session_id` (u32), `payload_len` (u32), all big-endian.
///
/// `msg_type` stays a raw byte here so that reserved or unknown catalog
/// values survive decoding; mapping onto [`MsgType`] is the consumer's call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub msg_type: u8,
    pub flags: u8,
    pub reserved: u8,
    pub session_id: u32,
    pub payload_len: u32,
}

impl Header {
    /// Builds a header with `flags` and `reserved` zeroed.
    #[must_use]
    pub const fn new(version: u8, msg_type: MsgType, session_id: u32, payload_len: u32) -> Self {
        Self {
            version,
            msg_type: msg_type as u8,
            flags: 0,
            reserved: 0,
            session_id,
            payload_len,
        }
    }

    /// Encodes the header into its fixed big-endian layout.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0] = self.version;
        buf[1] = self.msg_type;
        buf[2] = self.flags;
        buf[3] = self.reserved;
        buf[4..8].copy_from_slice(&self.session_id.to_be_bytes());
        buf[8..12].copy_from_slice(&self.payload_len.to_be_bytes());
        buf
    }

    /// Decodes a header from the first 12 bytes of `buf`.
    ///
    /// Fails with [`CodecError::MalformedHeader`] when fewer than 12 bytes
    /// are available. Trailing bytes beyond the header are ignored.
    pub fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        if buf.len() < HEADER_LEN {
            return Err(CodecError::MalformedHeader { actual: buf.len() });
        }
        Ok(Self {
            version: buf[0],
            msg_type: buf[1],
            flags: buf[2],
            reserved: buf[3],
            session_id: u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
            payload_len: u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }

    /// Returns the message type if it is a known catalog value.
    pub fn msg_type(&self) -> Result<MsgType, crate::message::InvalidMsgType> {
        MsgType::try_from(self.msg_type)
    }
}
