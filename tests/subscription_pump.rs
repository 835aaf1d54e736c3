//! End-to-end subscription pump against a mock broker.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use subwatch::config::{BrokerConfig, SubwatchConfig};
use subwatch::consumer::SubscriptionConsumer;
use subwatch::monitor::SubscriptionMonitor;
use subwatch::transport::{ExponentialRetry, TcpConnector};

mod common;

fn config_for(namespace: String, min_backoff_secs: u64) -> SubwatchConfig {
    let mut config = SubwatchConfig {
        broker: BrokerConfig {
            connection_string: None,
            namespace: Some(namespace),
            entity_path: "device-lifecycle".into(),
        },
        ..Default::default()
    };
    config.retry.min_backoff_secs = min_backoff_secs;
    config
}

async fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn messages_flow_and_the_verdict_stays_alive() {
    let messages = vec![
        ("m-1".to_string(), "device 1 provisioned".to_string()),
        ("m-2".to_string(), "device 2 provisioned".to_string()),
        ("m-3".to_string(), "device 2 deprovisioned".to_string()),
    ];
    let (addr, acks) = common::start_mock_broker(messages).await;

    let config = config_for(addr.to_string(), 0);
    let monitor = Arc::new(SubscriptionMonitor::new(&config).unwrap());
    let consumer = SubscriptionConsumer::new(
        TcpConnector::new(config.broker.clone()),
        Arc::clone(&monitor),
        ExponentialRetry::from_config(&config.retry),
    );
    let processed = consumer.processed_counter();

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let handle = tokio::spawn(consumer.run(shutdown_rx));

    let drained = wait_until(Duration::from_secs(5), || {
        processed.load(Ordering::Relaxed) == 3
    })
    .await;
    assert!(drained, "consumer never settled all three messages");

    // The processed counter increments client-side once each ack is written;
    // wait for the broker to actually observe all three before inspecting them.
    let recorded = wait_until(Duration::from_secs(5), || acks.lock().unwrap().len() == 3).await;
    assert!(recorded, "broker never recorded all three acks");

    let acked = acks.lock().unwrap().clone();
    assert_eq!(acked, vec!["m-1", "m-2", "m-3"]);
    assert!(monitor.is_alive());

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn unreachable_broker_flips_the_verdict() {
    let addr = common::unreachable_addr();

    // min_backoff of 20s derives a threshold of zero: the very first
    // reported failure is already more than retries explain.
    let config = config_for(addr.to_string(), 20);
    let monitor = Arc::new(SubscriptionMonitor::new(&config).unwrap());
    assert_eq!(monitor.failure_threshold(), 0);

    let consumer = SubscriptionConsumer::new(
        TcpConnector::new(config.broker.clone()),
        Arc::clone(&monitor),
        ExponentialRetry::from_config(&config.retry),
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let handle = tokio::spawn(consumer.run(shutdown_rx));

    let monitor_probe = Arc::clone(&monitor);
    let flipped = wait_until(Duration::from_secs(5), move || !monitor_probe.is_alive()).await;
    assert!(flipped, "refused connects never flipped the verdict");

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}
