//! Core protocol types shared between the client and server crates.
//!
//! Every message on the wire is a fixed 12-byte big-endian header followed
//! by `payload_len` bytes of payload. Payload shapes are fixed-width
//! NUL-padded buffers defined by the message catalog.

pub mod codec;
pub mod header;
pub mod message;

pub use codec::{CodecError, encode_frame};
pub use header::{HEADER_LEN, Header};
pub use message::{
    AUTH_FIELD_LEN, AUTH_PAYLOAD_LEN, AuthPayload, CHAT_PAYLOAD_LEN, ChatPayload,
    InvalidMsgType, JOIN_PAYLOAD_LEN, JoinPayload, MAX_PAYLOAD_LEN, MsgType, ROOM_NAME_LEN,
};

/// Returns the protocol crate version string.
pub fn protocol_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
