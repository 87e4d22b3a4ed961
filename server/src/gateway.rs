//! TCP gateway: accepts connections and drives one session per task.
//!
//! Sessions share nothing, so every connection is fully independent and the
//! server scales to any number of peers without locks. Reads carry no
//! deadline; a stalled peer parks its task until the transport drops.

use std::io::ErrorKind;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use protocol::header::{HEADER_LEN, Header};
use protocol::message::MAX_PAYLOAD_LEN;

use crate::config::ServerConfig;
use crate::session::{Event, Session, SessionState};

/// Accept loop. Only a listener failure ends it; per-connection errors are
/// logged in the spawned task and never cross connections.
pub async fn run(listener: TcpListener, config: Arc<ServerConfig>) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let config = config.clone();

        tokio::spawn(async move {
            log::info!("Client connected from {}", peer);
            if let Err(err) = handle_connection(stream, &config).await {
                log::warn!("Connection {} ended with error: {}", peer, err);
            }
            log::info!("Connection closed for {}", peer);
        });
    }
}

async fn handle_connection(mut stream: TcpStream, config: &ServerConfig) -> anyhow::Result<()> {
    let mut session = Session::new(config.credentials.clone());
    let mut header_buf = [0u8; HEADER_LEN];

    while !session.is_closed() {
        if !read_exact_or_eof(&mut stream, &mut header_buf).await? {
            log::info!("Peer disconnected");
            break;
        }
        let header = Header::decode(&header_buf)?;

        // No catalog message carries more than MAX_PAYLOAD_LEN bytes, so a
        // larger declared length can only be hostile or corrupt.
        if header.payload_len as usize > MAX_PAYLOAD_LEN {
            log::warn!(
                "Declared payload of {} bytes exceeds the {}-byte catalog maximum",
                header.payload_len,
                MAX_PAYLOAD_LEN
            );
            break;
        }

        let mut payload = vec![0u8; header.payload_len as usize];
        if !payload.is_empty() && !read_exact_or_eof(&mut stream, &mut payload).await? {
            log::info!("Peer disconnected mid-payload");
            break;
        }

        let transition = session.apply(&header, &payload);
        log_event(&transition.event, session.state());

        if let Some(response) = transition.response {
            stream.write_all(&response.encode()).await?;
            stream.flush().await?;
        }
    }

    stream.shutdown().await.ok();
    Ok(())
}

/// Fills `buf` completely, or reports a clean end of stream as `Ok(false)`.
async fn read_exact_or_eof<S>(stream: &mut S, buf: &mut [u8]) -> anyhow::Result<bool>
where
    S: AsyncRead + Unpin,
{
    match stream.read_exact(buf).await {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn log_event(event: &Event, state: SessionState) {
    match event {
        Event::SessionInitialized { session_id } => {
            log::info!("INIT received, session {}", session_id);
        }
        Event::AuthAccepted { username } => {
            log::info!("Auth OK for '{}'", username);
        }
        Event::AuthRejected { username } => {
            log::warn!("Auth failed for '{}'", username);
        }
        Event::RoomJoined { room_type, room_name } => {
            log::info!("Joined room '{}' (type {})", room_name, room_type);
        }
        Event::ChatMessage { text } => {
            log::info!("Chat message: {}", text);
        }
        Event::CloseAcknowledged => {
            log::info!("Close requested by peer");
        }
        Event::ProtocolViolation { msg_type } => {
            log::warn!(
                "Protocol violation: msg_type 0x{:02X} closed the session (state now {:?})",
                msg_type,
                state
            );
        }
    }
}
