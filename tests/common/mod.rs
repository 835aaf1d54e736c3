//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use subwatch::transport::Frame;

/// Start a mock broker that accepts subscriptions, streams the given
/// messages on each connection, and records acks. Returns the bound address
/// and a handle to the acked message ids.
#[allow(dead_code)]
pub async fn start_mock_broker(
    messages: Vec<(String, String)>,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let acks = Arc::new(Mutex::new(Vec::new()));
    let acks_handle = acks.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let messages = messages.clone();
                    let acks = acks.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);
                        let mut line = String::new();

                        // Subscribe handshake.
                        if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                            return;
                        }
                        let subscription = match serde_json::from_str(line.trim()) {
                            Ok(Frame::Subscribe { subscription, .. }) => subscription,
                            _ => return,
                        };
                        let reply =
                            serde_json::to_string(&Frame::Subscribed { subscription }).unwrap();
                        if write_half
                            .write_all(format!("{reply}\n").as_bytes())
                            .await
                            .is_err()
                        {
                            return;
                        }

                        for (id, body) in messages {
                            let frame =
                                serde_json::to_string(&Frame::Message { id, body }).unwrap();
                            if write_half
                                .write_all(format!("{frame}\n").as_bytes())
                                .await
                                .is_err()
                            {
                                return;
                            }
                        }

                        // Collect acks until the client goes away.
                        loop {
                            line.clear();
                            match reader.read_line(&mut line).await {
                                Ok(0) | Err(_) => return,
                                Ok(_) => {
                                    if let Ok(Frame::Ack { id }) =
                                        serde_json::from_str(line.trim())
                                    {
                                        acks.lock().unwrap().push(id);
                                    }
                                }
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, acks_handle)
}

/// Reserve a local address nothing listens on, so connects are refused.
#[allow(dead_code)]
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
