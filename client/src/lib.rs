//! Scripted client session driver.
//!
//! One best-effort pass through the handshake: INIT → AUTH → wait for
//! AUTH_ACK → JOIN → CHAT → CLOSE. Anything other than an AUTH_ACK ends the
//! run immediately; there are no retries and no read timeouts.

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use protocol::encode_frame;
use protocol::header::{HEADER_LEN, Header};
use protocol::message::{AuthPayload, ChatPayload, JoinPayload, MsgType};

/// Session identifier the driver announces in INIT.
pub const SESSION_ID: u32 = 1234;
/// Protocol version stamped on every header.
pub const VERSION: u8 = 1;

/// Settings for one scripted run.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub room_name: String,
    pub message: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            username: "sadia".to_string(),
            password: "admin".to_string(),
            room_name: "room1".to_string(),
            message: "Hello QUIC Server!".to_string(),
        }
    }
}

/// How the scripted run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// AUTH_ACK received; JOIN, CHAT and CLOSE were all sent.
    Completed,
    /// The response was not an AUTH_ACK; the run stopped at the ack check.
    Rejected,
}

/// Runs the full scripted session against the configured server.
pub async fn run_session(config: &ClientConfig) -> anyhow::Result<SessionOutcome> {
    let addr = format!("{}:{}", config.host, config.port);
    log::info!("Connecting to server at {}...", addr);
    let mut stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("failed to connect to {}", addr))?;

    log::info!("Sending INIT...");
    send(&mut stream, MsgType::Init, &[])
        .await
        .context("failed to send INIT")?;

    log::info!("Sending AUTH...");
    let auth = AuthPayload::new(config.username.clone(), config.password.clone())
        .encode()
        .context("credentials exceed the 32-byte field width")?;
    send(&mut stream, MsgType::Auth, &auth)
        .await
        .context("failed to send AUTH")?;

    log::info!("Waiting for AUTH_ACK...");
    let mut ack_buf = [0u8; HEADER_LEN];
    stream
        .read_exact(&mut ack_buf)
        .await
        .context("connection ended before an acknowledgment arrived")?;
    let ack = Header::decode(&ack_buf)?;

    if ack.msg_type != MsgType::AuthAck as u8 {
        log::warn!(
            "Authentication failed or invalid response (msg_type 0x{:02X})",
            ack.msg_type
        );
        stream.shutdown().await.ok();
        return Ok(SessionOutcome::Rejected);
    }

    log::info!("Authentication successful.");

    log::info!("Sending JOIN...");
    let join = JoinPayload::new(1, config.room_name.clone())
        .encode()
        .context("room name exceeds the 32-byte field width")?;
    send(&mut stream, MsgType::Join, &join)
        .await
        .context("failed to send JOIN")?;

    log::info!("Sending CHAT...");
    let chat = ChatPayload::new(config.message.clone())
        .encode()
        .context("message exceeds the 256-byte chat width")?;
    send(&mut stream, MsgType::Chat, &chat)
        .await
        .context("failed to send CHAT")?;

    log::info!("Sending CLOSE...");
    send(&mut stream, MsgType::Close, &[])
        .await
        .context("failed to send CLOSE")?;

    stream.shutdown().await.ok();
    log::info!("Connection closed.");
    Ok(SessionOutcome::Completed)
}

async fn send(stream: &mut TcpStream, msg_type: MsgType, payload: &[u8]) -> anyhow::Result<()> {
    let header = Header::new(VERSION, msg_type, SESSION_ID, payload.len() as u32);
    stream.write_all(&encode_frame(&header, payload)).await?;
    stream.flush().await?;
    Ok(())
}
