//! Subscription transport subsystem.
//!
//! # Data Flow
//! ```text
//! BrokerConfig
//!     → client.rs (resolve endpoint, subscribe handshake)
//!     → MessageSource (message / ack frames, protocol.rs)
//!     → consumer pump
//!
//! On failure:
//!     → retry.rs (policy delay for the current attempt)
//!     → reconnect through the Connector
//! ```
//!
//! # Design Decisions
//! - The retry policy is the contract the liveness threshold is derived
//!   from: base delays are deterministic, jitter is execution-only
//! - Transport errors carry enough shape for the pump to log and report
//!   them; none of them are handled inside this module

pub mod client;
pub mod protocol;
pub mod retry;

pub use client::{
    Connector, InboundMessage, MessageSource, TcpConnector, TcpSource, TransportError,
    AUTO_DELETE_ON_IDLE,
};
pub use protocol::Frame;
pub use retry::{ExponentialRetry, RETRY_INTERVAL_UNIT_MS};
