use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

use protocol::encode_frame;
use protocol::header::{HEADER_LEN, Header};
use protocol::message::{AuthPayload, ChatPayload, JoinPayload, MsgType};
use server::config::ServerConfig;
use server::gateway;

const SESSION_ID: u32 = 1234;
const VERSION: u8 = 1;
const READ_TIMEOUT: Duration = Duration::from_secs(5);

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Arc::new(ServerConfig::default());
    tokio::spawn(async move {
        let _ = gateway::run(listener, config).await;
    });
    addr
}

fn header(msg_type: MsgType, payload_len: u32) -> Header {
    Header::new(VERSION, msg_type, SESSION_ID, payload_len)
}

async fn send(stream: &mut TcpStream, msg_type: MsgType, payload: &[u8]) {
    let frame = encode_frame(&header(msg_type, payload.len() as u32), payload);
    stream.write_all(&frame).await.unwrap();
    stream.flush().await.unwrap();
}

async fn send_init_and_auth(stream: &mut TcpStream, password: &str) {
    send(stream, MsgType::Init, &[]).await;
    let auth = AuthPayload::new("sadia", password).encode().unwrap();
    send(stream, MsgType::Auth, &auth).await;
}

async fn read_header(stream: &mut TcpStream) -> Header {
    let mut buf = [0u8; HEADER_LEN];
    timeout(READ_TIMEOUT, stream.read_exact(&mut buf))
        .await
        .expect("server did not respond in time")
        .unwrap();
    Header::decode(&buf).unwrap()
}

/// Reads until EOF, asserting the server sent nothing further.
async fn expect_silent_close(stream: &mut TcpStream) {
    let mut buf = [0u8; 64];
    let n = timeout(READ_TIMEOUT, stream.read(&mut buf))
        .await
        .expect("server did not close in time")
        .unwrap();
    assert_eq!(n, 0, "server sent unexpected bytes: {:?}", &buf[..n]);
}

async fn run_happy_path(addr: SocketAddr) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    send_init_and_auth(&mut stream, "admin").await;

    let ack = read_header(&mut stream).await;
    assert_eq!(ack.msg_type, MsgType::AuthAck as u8);
    assert_eq!(ack.session_id, SESSION_ID);
    assert_eq!(ack.version, VERSION);
    assert_eq!(ack.payload_len, 0);

    let join = JoinPayload::new(1, "room1").encode().unwrap();
    send(&mut stream, MsgType::Join, &join).await;

    let chat = ChatPayload::new("Hello QUIC Server!").encode().unwrap();
    send(&mut stream, MsgType::Chat, &chat).await;

    send(&mut stream, MsgType::Close, &[]).await;

    // Exactly one AUTH_ACK: everything after it is silence, then EOF.
    expect_silent_close(&mut stream).await;
}

#[tokio::test]
async fn scenario_a_happy_path() {
    let addr = start_server().await;
    run_happy_path(addr).await;
}

#[tokio::test]
async fn scenario_b_bad_credentials_get_no_ack() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    send_init_and_auth(&mut stream, "wrong").await;

    // Session is now Closing; the next message of any type forces Closed.
    send(&mut stream, MsgType::Close, &[]).await;
    expect_silent_close(&mut stream).await;
}

#[tokio::test]
async fn scenario_c_out_of_order_join_closes_connection() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    send(&mut stream, MsgType::Init, &[]).await;
    let join = JoinPayload::new(1, "room1").encode().unwrap();
    send(&mut stream, MsgType::Join, &join).await;

    expect_silent_close(&mut stream).await;
}

#[tokio::test]
async fn scenario_d_truncated_payload_does_not_poison_the_server() {
    let addr = start_server().await;

    // Declare 64 payload bytes but deliver only 40, then drop.
    {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let lying_header = header(MsgType::Auth, 64);
        stream.write_all(&lying_header.encode()).await.unwrap();
        stream.write_all(&[0u8; 40]).await.unwrap();
        stream.flush().await.unwrap();
        stream.shutdown().await.unwrap();
    }

    // A fresh connection still completes the full handshake.
    run_happy_path(addr).await;
}

#[tokio::test]
async fn oversized_payload_length_is_rejected() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    send(&mut stream, MsgType::Init, &[]).await;
    let lying_header = Header::new(VERSION, MsgType::Chat, SESSION_ID, 1_000_000);
    stream.write_all(&lying_header.encode()).await.unwrap();
    stream.flush().await.unwrap();

    expect_silent_close(&mut stream).await;
}

#[tokio::test]
async fn concurrent_connections_are_independent() {
    let addr = start_server().await;

    // A connection parked mid-handshake must not block others.
    let parked = TcpStream::connect(addr).await.unwrap();

    for _ in 0..3 {
        run_happy_path(addr).await;
    }

    drop(parked);
}
