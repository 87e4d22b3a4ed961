//! Message-type catalog and fixed-width payload shapes.
//!
//! Text fields are fixed-capacity NUL-padded buffers on the wire; decoding
//! strips trailing NUL bytes only.

use crate::codec::CodecError;

/// Width of each credential field inside an AUTH payload.
pub const AUTH_FIELD_LEN: usize = 32;
/// Total AUTH payload width (username + password).
pub const AUTH_PAYLOAD_LEN: usize = 2 * AUTH_FIELD_LEN;
/// Width of the room-name field inside a JOIN payload.
pub const ROOM_NAME_LEN: usize = 32;
/// Total JOIN payload width (room-type discriminator + room name).
pub const JOIN_PAYLOAD_LEN: usize = 1 + ROOM_NAME_LEN;
/// Maximum (and client-emitted) CHAT payload width.
pub const CHAT_PAYLOAD_LEN: usize = 256;
/// Largest payload any catalog message carries.
pub const MAX_PAYLOAD_LEN: usize = CHAT_PAYLOAD_LEN;

/// Stable wire identifiers for every message in the catalog.
///
/// `ChatAck`, `Typing`, `Leave` and `Error` are reserved: they decode like
/// any other value but the current handshake never accepts them.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MsgType {
    Init = 0x01,
    Auth = 0x02,
    AuthAck = 0x03,
    Join = 0x04,
    Chat = 0x05,
    ChatAck = 0x06,
    Typing = 0x07,
    Leave = 0x08,
    Error = 0x09,
    Close = 0x0A,
}

impl TryFrom<u8> for MsgType {
    type Error = InvalidMsgType;

    fn try_from(value: u8) -> Result<Self, InvalidMsgType> {
        match value {
            0x01 => Ok(Self::Init),
            0x02 => Ok(Self::Auth),
            0x03 => Ok(Self::AuthAck),
            0x04 => Ok(Self::Join),
            0x05 => Ok(Self::Chat),
            0x06 => Ok(Self::ChatAck),
            0x07 => Ok(Self::Typing),
            0x08 => Ok(Self::Leave),
            // `Self::Error` would be ambiguous with the associated type here.
            0x09 => Ok(MsgType::Error),
            0x0A => Ok(Self::Close),
            _ => Err(InvalidMsgType(value)),
        }
    }
}

/// Error returned when an unknown message-type byte is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMsgType(pub u8);

impl core::fmt::Display for InvalidMsgType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid message type 0x{:02X}", self.0)
    }
}

impl std::error::Error for InvalidMsgType {}

/// AUTH payload: two 32-byte NUL-padded credential fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthPayload {
    pub username: String,
    pub password: String,
}

impl AuthPayload {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Encodes to exactly 64 bytes; fields longer than 32 bytes are refused.
    pub fn encode(&self) -> Result<[u8; AUTH_PAYLOAD_LEN], CodecError> {
        let mut buf = [0u8; AUTH_PAYLOAD_LEN];
        write_padded(&mut buf[..AUTH_FIELD_LEN], &self.username, "username")?;
        write_padded(&mut buf[AUTH_FIELD_LEN..], &self.password, "password")?;
        Ok(buf)
    }

    /// Decodes from exactly 64 bytes.
    pub fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        if payload.len() != AUTH_PAYLOAD_LEN {
            return Err(CodecError::PayloadLengthMismatch {
                expected: AUTH_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        Ok(Self {
            username: read_padded(&payload[..AUTH_FIELD_LEN], "username")?,
            password: read_padded(&payload[AUTH_FIELD_LEN..], "password")?,
        })
    }
}

/// JOIN payload: 1-byte room-type discriminator + 32-byte NUL-padded name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinPayload {
    pub room_type: u8,
    pub room_name: String,
}

impl JoinPayload {
    pub fn new(room_type: u8, room_name: impl Into<String>) -> Self {
        Self {
            room_type,
            room_name: room_name.into(),
        }
    }

    pub fn encode(&self) -> Result<[u8; JOIN_PAYLOAD_LEN], CodecError> {
        let mut buf = [0u8; JOIN_PAYLOAD_LEN];
        buf[0] = self.room_type;
        write_padded(&mut buf[1..], &self.room_name, "room_name")?;
        Ok(buf)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        if payload.len() != JOIN_PAYLOAD_LEN {
            return Err(CodecError::PayloadLengthMismatch {
                expected: JOIN_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        Ok(Self {
            room_type: payload[0],
            room_name: read_padded(&payload[1..], "room_name")?,
        })
    }
}

/// CHAT payload: up to 256 bytes of NUL-padded UTF-8 text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatPayload {
    pub text: String,
}

impl ChatPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Encodes to the full 256-byte width, as the scripted client does.
    pub fn encode(&self) -> Result<[u8; CHAT_PAYLOAD_LEN], CodecError> {
        let mut buf = [0u8; CHAT_PAYLOAD_LEN];
        write_padded(&mut buf, &self.text, "text")?;
        Ok(buf)
    }

    /// Decodes from at most 256 bytes, stripping trailing NUL padding.
    pub fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        if payload.len() > CHAT_PAYLOAD_LEN {
            return Err(CodecError::PayloadTooLarge {
                limit: CHAT_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        Ok(Self {
            text: read_padded(payload, "text")?,
        })
    }
}

fn write_padded(buf: &mut [u8], value: &str, field: &'static str) -> Result<(), CodecError> {
    let bytes = value.as_bytes();
    if bytes.len() > buf.len() {
        return Err(CodecError::FieldTooLong {
            field,
            limit: buf.len(),
        });
    }
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(())
}

fn read_padded(buf: &[u8], field: &'static str) -> Result<String, CodecError> {
    let end = buf
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |idx| idx + 1);
    core::str::from_utf8(&buf[..end])
        .map(str::to_owned)
        .map_err(|_| CodecError::InvalidText { field })
}
