//! Wire frames for the broker line protocol.
//!
//! Frames travel as newline-delimited JSON. The subscribe frame carries the
//! auto-delete-on-idle horizon so the broker expires the subscription on its
//! own once this process stops renewing it by being connected.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// Client → broker: create/attach a subscription on a topic.
    Subscribe {
        topic: String,
        subscription: String,
        auto_delete_on_idle_secs: u64,
    },

    /// Broker → client: the subscription is live.
    Subscribed { subscription: String },

    /// Broker → client: a delivered message.
    Message { id: String, body: String },

    /// Client → broker: settle a delivered message.
    Ack { id: String },

    /// Broker → client: terminal error on this connection.
    Error { message: String },
}
