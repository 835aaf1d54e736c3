//! Subscription consumer pump.
//!
//! # Data Flow
//! ```text
//! Connector::connect (uuid-named subscription, auto-delete-on-idle)
//!     → next_message / ack loop
//!     → on transport error:
//!         report to liveness monitor   (every attempt, not just exhaustion)
//!         sleep the policy delay for this attempt
//!         reconnect
//! ```
//!
//! # Design Decisions
//! - Message bodies are logged and settled, never interpreted
//! - The attempt counter resets on a successful connect and when a retry
//!   cycle is exhausted; the monitor's threshold assumes exactly this shape
//! - A fresh subscription name per process: the broker expires the old one
//!   on idle after a restart

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::monitor::SubscriptionMonitor;
use crate::observability::metrics;
use crate::transport::{Connector, ExponentialRetry, MessageSource, TransportError};

/// Long-running pump binding a subscription transport to the monitor.
pub struct SubscriptionConsumer<C: Connector> {
    connector: C,
    monitor: Arc<SubscriptionMonitor>,
    retry: ExponentialRetry,
    subscription_name: String,
    processed: Arc<AtomicU64>,
}

impl<C: Connector> SubscriptionConsumer<C> {
    pub fn new(connector: C, monitor: Arc<SubscriptionMonitor>, retry: ExponentialRetry) -> Self {
        Self {
            connector,
            monitor,
            retry,
            subscription_name: Uuid::new_v4().to_string(),
            processed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The uuid subscription name this process subscribes under.
    pub fn subscription_name(&self) -> &str {
        &self.subscription_name
    }

    /// Shared counter of settled messages.
    pub fn processed_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.processed)
    }

    /// Run until shutdown is signalled.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            subscription = %self.subscription_name,
            "subscription consumer starting"
        );

        let mut attempt = 0u32;
        loop {
            let error = tokio::select! {
                _ = shutdown.recv() => break,
                error = self.pump(&mut attempt) => error,
            };

            tracing::warn!(error = %error, attempt, "subscription pump failed");
            if let Err(report_err) = self.monitor.report_failure(&error) {
                tracing::error!(error = %report_err, "failure report rejected");
            }
            metrics::record_failure_reported();

            let delay = self.retry.jittered_delay(attempt);
            attempt += 1;
            if self.retry.is_exhausted(attempt) {
                tracing::warn!("retry cycle exhausted, starting a fresh cycle");
                attempt = 0;
            }

            tokio::select! {
                _ = shutdown.recv() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!("subscription consumer stopped");
    }

    /// Connect and deliver until the transport fails.
    async fn pump(&self, attempt: &mut u32) -> TransportError {
        let mut source = match self.connector.connect(&self.subscription_name).await {
            Ok(source) => source,
            Err(e) => return e,
        };
        *attempt = 0;

        loop {
            match source.next_message().await {
                Ok(message) => {
                    tracing::debug!(id = %message.id, body = %message.body, "received message");
                    if let Err(e) = source.ack(&message).await {
                        return e;
                    }
                    self.processed.fetch_add(1, Ordering::Relaxed);
                    metrics::record_message_processed();
                }
                Err(e) => return e,
            }
        }
    }
}
