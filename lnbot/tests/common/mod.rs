#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use lnbot::ClientConfig;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub const KEY: &str = "key_test";

pub fn config(base_url: impl Into<String>) -> ClientConfig {
    config_with_timeout(base_url, Duration::from_secs(5))
}

pub fn config_with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientConfig {
    ClientConfig::builder()
        .api_key(KEY)
        .base_url(base_url)
        .timeout(timeout)
        .build()
        .unwrap()
}

pub fn invoice_json(number: u64, status: &str) -> Value {
    json!({
        "number": number,
        "status": status,
        "amount": 1000,
        "bolt11": format!("lnbc10u1p{number}"),
        "memo": "coffee",
        "createdAt": "2024-05-01T12:00:00Z"
    })
}

pub fn payment_json(number: u64, status: &str) -> Value {
    json!({
        "number": number,
        "status": status,
        "amount": 500,
        "maxFee": 10,
        "address": "bob@ln.bot",
        "actualFee": 1
    })
}

pub fn sse(frames: &[(&str, Value)]) -> String {
    frames
        .iter()
        .map(|(event, data)| format!("event: {event}\ndata: {data}\n\n"))
        .collect()
}

/// A server that answers one request with an endless stream of keep-alive
/// comments and reports when the client hangs up.
pub struct KeepAliveServer {
    addr: SocketAddr,
    request: oneshot::Receiver<String>,
    closed: oneshot::Receiver<()>,
}

impl KeepAliveServer {
    pub async fn start() -> Self {
        Self::start_with(String::new()).await
    }

    /// Like [`start`](Self::start), writing `prelude` right after the
    /// response head.
    pub async fn start_with(prelude: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (request_tx, request) = oneshot::channel();
        let (closed_tx, closed) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let head = read_head(&mut socket).await;
            let _ = request_tx.send(head);

            let response_head = "HTTP/1.1 200 OK\r\n\
                content-type: text/event-stream\r\n\
                cache-control: no-cache\r\n\
                connection: close\r\n\r\n";
            let opened = socket.write_all(response_head.as_bytes()).await.is_ok()
                && socket.write_all(prelude.as_bytes()).await.is_ok();
            if opened {
                loop {
                    if socket.write_all(b": keep-alive\n\n").await.is_err() {
                        break;
                    }
                    if socket.flush().await.is_err() {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(20)).await;
                }
            }
            let _ = closed_tx.send(());
        });

        Self {
            addr,
            request,
            closed,
        }
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Head of the request the client sent.
    pub async fn request_head(&mut self) -> String {
        tokio::time::timeout(Duration::from_secs(5), &mut self.request)
            .await
            .expect("no request received")
            .unwrap()
    }

    /// Waits for the client to drop the connection.
    pub async fn closed_within(self, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.closed).await.is_ok()
    }
}

/// A server that accepts one request and never answers it.
pub struct SilentServer {
    addr: SocketAddr,
    request: oneshot::Receiver<String>,
    closed: oneshot::Receiver<()>,
}

impl SilentServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (request_tx, request) = oneshot::channel();
        let (closed_tx, closed) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let head = read_head(&mut socket).await;
            let _ = request_tx.send(head);
            let mut chunk = [0_u8; 256];
            while let Ok(n) = socket.read(&mut chunk).await {
                if n == 0 {
                    break;
                }
            }
            let _ = closed_tx.send(());
        });

        Self {
            addr,
            request,
            closed,
        }
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn request_head(&mut self) -> String {
        tokio::time::timeout(Duration::from_secs(5), &mut self.request)
            .await
            .expect("no request received")
            .unwrap()
    }

    pub async fn closed_within(self, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.closed).await.is_ok()
    }
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}
