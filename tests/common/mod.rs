//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Start a mock webhook that answers every POST with `status` and forwards
/// each JSON body it receives on the returned channel.
pub async fn start_mock_webhook(status: u16) -> (SocketAddr, mpsc::UnboundedReceiver<Value>) {
    start_programmable_webhook(move || status, Duration::ZERO).await
}

/// Start a mock webhook whose status is chosen per request and which waits
/// `delay` before answering.
pub async fn start_programmable_webhook<F>(
    f: F,
    delay: Duration,
) -> (SocketAddr, mpsc::UnboundedReceiver<Value>)
where
    F: Fn() -> u16 + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let f = std::sync::Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(body) = read_request_body(&mut socket).await else {
                            return;
                        };
                        if let Ok(json) = serde_json::from_slice::<Value>(&body) {
                            let _ = tx.send(json);
                        }

                        tokio::time::sleep(delay).await;

                        let status = f();
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                            status_text
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

/// Read one HTTP/1.1 request and return its body.
async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(buf[header_end..].to_vec())
}

/// HTTP client that ignores proxy environment variables, so requests reach
/// the local mock.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Wait up to `timeout` for the next webhook body.
pub async fn next_body(rx: &mut mpsc::UnboundedReceiver<Value>, timeout: Duration) -> Option<Value> {
    tokio::time::timeout(timeout, rx.recv()).await.ok().flatten()
}

/// An nginx access line in the watcher's expected format.
#[allow(dead_code)]
pub fn access_line(pool: &str, status: &str) -> String {
    format!(
        "172.18.0.1 - - [10/Oct/2025:13:55:36 +0000] \"GET /version HTTP/1.1\" 200 57 \
         pool=\"{pool}\" release=\"{pool}-v1\" upstream_status={status} upstream_addr=172.18.0.3:3000\n"
    )
}
