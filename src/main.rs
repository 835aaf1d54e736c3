//! subwatch: sidecar health monitor for a message-subscription worker.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                     SUBWATCH                     │
//!                  │                                                  │
//!   Broker ◀──TCP──┼─▶ transport ──messages──▶ consumer               │
//!                  │       │                      │                   │
//!                  │       └── retry policy ──┐   │ failures          │
//!                  │                          ▼   ▼                   │
//!                  │                    monitor (threshold + window)  │
//!                  │                          │                       │
//!   Orchestrator ◀─┼── 200/503 ── http ◀── is_alive()                 │
//!                  │                                                  │
//!                  │  cross-cutting: config · lifecycle · logging ·   │
//!                  │                 metrics                          │
//!                  └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use subwatch::config::load_config;
use subwatch::consumer::SubscriptionConsumer;
use subwatch::http::HealthServer;
use subwatch::lifecycle::{shutdown_on_signal, Shutdown};
use subwatch::monitor::SubscriptionMonitor;
use subwatch::observability::{logging, metrics};
use subwatch::transport::{ExponentialRetry, TcpConnector};

#[derive(Parser)]
#[command(name = "subwatch")]
#[command(about = "Sidecar health monitor for a message-subscription worker", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "subwatch.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Invalid configuration aborts startup before anything serves traffic.
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        config = %args.config.display(),
        endpoint = config.broker.endpoint().unwrap_or("-"),
        topic = %config.broker.entity_path,
        grace_period_secs = config.monitor.grace_period_secs,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let monitor = Arc::new(SubscriptionMonitor::new(&config)?);

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let consumer = SubscriptionConsumer::new(
        TcpConnector::new(config.broker.clone()),
        Arc::clone(&monitor),
        ExponentialRetry::from_config(&config.retry),
    );
    let subscription = consumer.subscription_name().to_string();
    tokio::spawn(consumer.run(shutdown.subscribe()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HealthServer::new(&config, monitor, subscription);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
