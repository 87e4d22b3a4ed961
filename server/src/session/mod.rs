//! Per-connection session state machine.
//!
//! The handshake is strict and linear: INIT → AUTH → JOIN → CHAT → CLOSE.
//! There are no retries and no backtracking; any out-of-order or
//! unrecognized message terminates the session with no response.

use protocol::header::Header;
use protocol::message::{AuthPayload, ChatPayload, JoinPayload, MsgType};

use crate::config::Credentials;

/// FSM states, in handshake order. `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    InitWait,
    AuthWait,
    ChatReady,
    InChat,
    Closing,
    Closed,
}

/// Observable outcome of applying one message to the session.
///
/// `AuthRejected` and `ProtocolViolation` differ only in logging; neither
/// produces any bytes on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SessionInitialized { session_id: u32 },
    AuthAccepted { username: String },
    AuthRejected { username: String },
    RoomJoined { room_type: u8, room_name: String },
    ChatMessage { text: String },
    CloseAcknowledged,
    ProtocolViolation { msg_type: u8 },
}

/// Result of one transition: what happened, and the response to emit if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub event: Event,
    pub response: Option<Header>,
}

impl Transition {
    fn silent(event: Event) -> Self {
        Self {
            event,
            response: None,
        }
    }
}

/// One connection's mutable protocol state.
///
/// `session_id` is captured from the first INIT header and never changes
/// afterward; INIT is only legal in `InitWait` and no transition leads back.
#[derive(Clone, Debug)]
pub struct Session {
    state: SessionState,
    session_id: Option<u32>,
    credentials: Credentials,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            state: SessionState::InitWait,
            session_id: None,
            credentials,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> Option<u32> {
        self.session_id
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Applies one received message.
    ///
    /// The state is checked before the message type, so the same type byte
    /// can be a legal step in one state and a violation in another. Payload
    /// decode failures in an accepting arm count as violations too.
    pub fn apply(&mut self, header: &Header, payload: &[u8]) -> Transition {
        match (self.state, MsgType::try_from(header.msg_type).ok()) {
            (SessionState::InitWait, Some(MsgType::Init)) => {
                self.session_id = Some(header.session_id);
                self.state = SessionState::AuthWait;
                Transition::silent(Event::SessionInitialized {
                    session_id: header.session_id,
                })
            }
            (SessionState::AuthWait, Some(MsgType::Auth)) => match AuthPayload::decode(payload) {
                Ok(auth) => self.check_credentials(header, auth),
                Err(_) => self.violation(header.msg_type),
            },
            (SessionState::ChatReady, Some(MsgType::Join)) => {
                match JoinPayload::decode(payload) {
                    Ok(join) => {
                        self.state = SessionState::InChat;
                        Transition::silent(Event::RoomJoined {
                            room_type: join.room_type,
                            room_name: join.room_name,
                        })
                    }
                    Err(_) => self.violation(header.msg_type),
                }
            }
            (SessionState::InChat, Some(MsgType::Chat)) => match ChatPayload::decode(payload) {
                Ok(chat) => {
                    // One message per session; the handshake is not a chat loop.
                    self.state = SessionState::Closing;
                    Transition::silent(Event::ChatMessage { text: chat.text })
                }
                Err(_) => self.violation(header.msg_type),
            },
            (state, Some(MsgType::Close)) if state != SessionState::Closed => {
                self.state = SessionState::Closed;
                Transition::silent(Event::CloseAcknowledged)
            }
            _ => self.violation(header.msg_type),
        }
    }

    fn check_credentials(&mut self, header: &Header, auth: AuthPayload) -> Transition {
        if auth.username == self.credentials.username
            && auth.password == self.credentials.password
        {
            self.state = SessionState::ChatReady;
            let ack = Header::new(
                header.version,
                MsgType::AuthAck,
                self.session_id.unwrap_or(header.session_id),
                0,
            );
            Transition {
                event: Event::AuthAccepted {
                    username: auth.username,
                },
                response: Some(ack),
            }
        } else {
            self.state = SessionState::Closing;
            Transition::silent(Event::AuthRejected {
                username: auth.username,
            })
        }
    }

    fn violation(&mut self, msg_type: u8) -> Transition {
        self.state = SessionState::Closed;
        Transition::silent(Event::ProtocolViolation { msg_type })
    }
}
