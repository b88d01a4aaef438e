//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use taxii_client::messages::Message;
use taxii_client::observability::report::format_message;
use taxii_client::observability::{Direction, DisplayMode, ExchangeObserver};
use taxii_client::transport::{self, ConnectionOptions, Transport};

/// A canned HTTP service that records what it receives.
pub struct MockService {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    connections: Arc<AtomicUsize>,
}

impl MockService {
    pub fn url(&self, path: &str) -> url::Url {
        format!("http://{}{}", self.addr, path).parse().unwrap()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

/// Start a service that answers every request with `status` and `body`.
pub async fn start_mock_service(status: u16, body: &str) -> MockService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let connections = Arc::new(AtomicUsize::new(0));
    let body = body.to_string();

    let (reqs, conns) = (requests.clone(), connections.clone());
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    conns.fetch_add(1, Ordering::SeqCst);
                    let reqs = reqs.clone();
                    let body = body.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        reqs.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockService {
        addr,
        requests,
        connections,
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Observer that keeps every message it sees, formatted as XML.
#[derive(Default)]
pub struct Capture {
    seen: Mutex<Vec<(Direction, String)>>,
}

impl Capture {
    pub fn seen(&self) -> Vec<(Direction, String)> {
        self.seen.lock().unwrap().clone()
    }
}

impl ExchangeObserver for Capture {
    fn observe(&self, direction: Direction, message: &Message) {
        self.seen
            .lock()
            .unwrap()
            .push((direction, format_message(DisplayMode::Xml, message)));
    }
}

/// Transport that ignores proxy environment variables.
pub fn direct_transport() -> Transport {
    transport::build(&ConnectionOptions {
        system_proxy: false,
        ..Default::default()
    })
    .unwrap()
}
