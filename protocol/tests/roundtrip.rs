use protocol::codec::CodecError;
use protocol::header::{HEADER_LEN, Header};
use protocol::message::{
    AUTH_PAYLOAD_LEN, AuthPayload, CHAT_PAYLOAD_LEN, ChatPayload, JOIN_PAYLOAD_LEN, JoinPayload,
    MsgType,
};

fn sample_headers() -> Vec<Header> {
    vec![
        Header::new(1, MsgType::Init, 1234, 0),
        Header::new(1, MsgType::Auth, 1234, AUTH_PAYLOAD_LEN as u32),
        Header::new(1, MsgType::Join, 1234, JOIN_PAYLOAD_LEN as u32),
        Header::new(1, MsgType::Chat, 1234, CHAT_PAYLOAD_LEN as u32),
        Header::new(255, MsgType::Close, u32::MAX, u32::MAX),
        Header {
            version: 0,
            msg_type: MsgType::Error as u8,
            flags: 0x7F,
            reserved: 0x80,
            session_id: 0,
            payload_len: 1,
        },
    ]
}

#[test]
fn header_roundtrip() {
    for header in sample_headers() {
        let decoded = Header::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
    }
}

#[test]
fn flags_and_reserved_roundtrip_unchanged() {
    let mut header = Header::new(1, MsgType::Typing, 42, 0);
    header.flags = 0xA5;
    header.reserved = 0x5A;
    let decoded = Header::decode(&header.encode()).unwrap();
    assert_eq!(decoded.flags, 0xA5);
    assert_eq!(decoded.reserved, 0x5A);
}

#[test]
fn every_short_buffer_is_malformed() {
    let bytes = [0xFFu8; HEADER_LEN];
    for len in 0..HEADER_LEN {
        match Header::decode(&bytes[..len]) {
            Err(CodecError::MalformedHeader { actual }) => assert_eq!(actual, len),
            other => panic!("length {len} should be malformed, got {other:?}"),
        }
    }
}

#[test]
fn auth_payload_roundtrip() {
    let payload = AuthPayload::new("sadia", "admin");
    let bytes = payload.encode().unwrap();
    assert_eq!(bytes.len(), AUTH_PAYLOAD_LEN);
    assert_eq!(AuthPayload::decode(&bytes).unwrap(), payload);
}

#[test]
fn join_payload_roundtrip() {
    let payload = JoinPayload::new(1, "room1");
    let bytes = payload.encode().unwrap();
    assert_eq!(bytes.len(), JOIN_PAYLOAD_LEN);
    assert_eq!(bytes[0], 1);
    assert_eq!(JoinPayload::decode(&bytes).unwrap(), payload);
}

#[test]
fn chat_payload_roundtrip_at_full_width() {
    let payload = ChatPayload::new("Hello QUIC Server!");
    let bytes = payload.encode().unwrap();
    assert_eq!(bytes.len(), CHAT_PAYLOAD_LEN);
    assert_eq!(ChatPayload::decode(&bytes).unwrap(), payload);
}

#[test]
fn chat_payload_accepts_shorter_buffers() {
    let decoded = ChatPayload::decode(b"hi\0\0").unwrap();
    assert_eq!(decoded.text, "hi");
    let decoded = ChatPayload::decode(b"").unwrap();
    assert_eq!(decoded.text, "");
}

#[test]
fn chat_payload_over_256_bytes_is_refused() {
    let buf = vec![b'a'; CHAT_PAYLOAD_LEN + 1];
    assert!(matches!(
        ChatPayload::decode(&buf),
        Err(CodecError::PayloadTooLarge { limit: 256, actual: 257 })
    ));
}

#[test]
fn empty_credentials_roundtrip() {
    let payload = AuthPayload::new("", "");
    let bytes = payload.encode().unwrap();
    assert!(bytes.iter().all(|&b| b == 0));
    assert_eq!(AuthPayload::decode(&bytes).unwrap(), payload);
}
