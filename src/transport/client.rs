//! Broker subscription client.
//!
//! # Responsibilities
//! - Resolve the configured endpoint to a dialable address
//! - Establish a subscription over TCP (subscribe handshake)
//! - Deliver messages and settle acks
//!
//! # Design Decisions
//! - `Connector`/`MessageSource` traits form the seam; the consumer pump
//!   never names the TCP types, so tests script their own sources
//! - One frame per line; a closed socket surfaces as its own error variant
//!   so the pump can tell an outage from a malformed frame

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use url::Url;

use crate::config::BrokerConfig;
use crate::transport::protocol::Frame;

/// Idle horizon after which the broker deletes an abandoned subscription.
pub const AUTO_DELETE_ON_IDLE: Duration = Duration::from_secs(5 * 60);

/// Errors from the subscription transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("endpoint is not usable: {0}")]
    InvalidEndpoint(String),

    #[error("transport IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed frame: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("subscribe handshake failed: {0}")]
    Handshake(String),

    #[error("broker reported: {0}")]
    Broker(String),

    #[error("connection closed by broker")]
    ConnectionClosed,
}

/// A message delivered on the subscription.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub body: String,
}

/// An established subscription delivering messages.
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Result<InboundMessage, TransportError>;

    async fn ack(&mut self, message: &InboundMessage) -> Result<(), TransportError>;
}

/// Factory for subscriptions; one call per (re)connect.
#[async_trait]
pub trait Connector: Send + Sync {
    type Source: MessageSource;

    async fn connect(&self, subscription: &str) -> Result<Self::Source, TransportError>;
}

/// Production connector speaking the TCP line protocol.
pub struct TcpConnector {
    config: BrokerConfig,
}

impl TcpConnector {
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    /// host:port to dial. Connection strings are URL form; namespaces are
    /// bare "host:port".
    fn address(&self) -> Result<String, TransportError> {
        let endpoint = self.config.endpoint().ok_or_else(|| {
            TransportError::InvalidEndpoint("no connection_string or namespace configured".into())
        })?;

        if endpoint.contains("://") {
            let url = Url::parse(endpoint)
                .map_err(|e| TransportError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
            let host = url.host_str().ok_or_else(|| {
                TransportError::InvalidEndpoint(format!("{endpoint}: missing host"))
            })?;
            let port = url.port().ok_or_else(|| {
                TransportError::InvalidEndpoint(format!("{endpoint}: missing port"))
            })?;
            Ok(format!("{host}:{port}"))
        } else {
            Ok(endpoint.to_string())
        }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Source = TcpSource;

    async fn connect(&self, subscription: &str) -> Result<TcpSource, TransportError> {
        let addr = self.address()?;
        let stream = TcpStream::connect(&addr).await?;
        let (read_half, write_half) = stream.into_split();

        let mut source = TcpSource {
            reader: BufReader::new(read_half),
            writer: write_half,
        };

        source
            .send(&Frame::Subscribe {
                topic: self.config.entity_path.clone(),
                subscription: subscription.to_string(),
                auto_delete_on_idle_secs: AUTO_DELETE_ON_IDLE.as_secs(),
            })
            .await?;

        match source.read_frame().await? {
            Frame::Subscribed { .. } => {
                tracing::info!(
                    address = %addr,
                    subscription,
                    topic = %self.config.entity_path,
                    "subscription established"
                );
                Ok(source)
            }
            Frame::Error { message } => Err(TransportError::Handshake(message)),
            other => Err(TransportError::Handshake(format!(
                "unexpected frame: {other:?}"
            ))),
        }
    }
}

/// One live TCP subscription.
pub struct TcpSource {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TcpSource {
    async fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        let mut line = serde_json::to_string(frame)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        Ok(())
    }

    async fn read_frame(&mut self) -> Result<Frame, TransportError> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(TransportError::ConnectionClosed);
        }
        Ok(serde_json::from_str(line.trim())?)
    }
}

#[async_trait]
impl MessageSource for TcpSource {
    async fn next_message(&mut self) -> Result<InboundMessage, TransportError> {
        loop {
            match self.read_frame().await? {
                Frame::Message { id, body } => return Ok(InboundMessage { id, body }),
                Frame::Error { message } => return Err(TransportError::Broker(message)),
                other => {
                    tracing::warn!(frame = ?other, "ignoring unexpected frame");
                }
            }
        }
    }

    async fn ack(&mut self, message: &InboundMessage) -> Result<(), TransportError> {
        self.send(&Frame::Ack {
            id: message.id.clone(),
        })
        .await
    }
}
