//! Liveness flap scenario through the health endpoint.
//!
//! Drives the monitor with a manual clock so the grace period passes without
//! real delays; only the HTTP round-trips are real.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use subwatch::config::{BrokerConfig, SubwatchConfig};
use subwatch::http::HealthServer;
use subwatch::lifecycle::Shutdown;
use subwatch::monitor::{ManualClock, SubscriptionMonitor};

fn flap_config() -> SubwatchConfig {
    let mut config = SubwatchConfig {
        broker: BrokerConfig {
            connection_string: None,
            namespace: Some("127.0.0.1:7430".into()),
            entity_path: "device-lifecycle".into(),
        },
        ..Default::default()
    };
    // Threshold of five failures per 45s window.
    config.retry.min_backoff_secs = 0;
    config.retry.max_backoff_secs = 5;
    config.retry.max_retries = 2;
    config.monitor.grace_period_secs = 45;
    config
}

#[tokio::test]
async fn liveness_endpoint_tracks_sustained_failure_injection() {
    let config = flap_config();
    let clock = Arc::new(ManualClock::new());
    let monitor = Arc::new(SubscriptionMonitor::with_clock(&config, clock.clone()).unwrap());
    assert_eq!(monitor.failure_threshold(), 5);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HealthServer::new(&config, Arc::clone(&monitor), "probe-test".into());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let liveness_url = format!("http://{addr}/health/liveness");

    // No failures yet: healthy.
    let res = client.get(&liveness_url).send().await.unwrap();
    assert_eq!(res.status(), 200);

    // Inject one failure per second, far above five-per-45s.
    for _ in 0..5 {
        monitor.report_failure("injected receive timeout").unwrap();
        clock.advance(Duration::from_secs(1));
    }
    let res = client.get(&liveness_url).send().await.unwrap();
    assert_eq!(res.status(), 503);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "degraded");

    // Verdict holds while injection continues.
    for _ in 0..10 {
        monitor.report_failure("injected receive timeout").unwrap();
        clock.advance(Duration::from_secs(2));
        let res = client.get(&liveness_url).send().await.unwrap();
        assert_eq!(res.status(), 503);
    }

    // Injection stops; one grace period later the verdict recovers.
    clock.advance(Duration::from_secs(46));
    let res = client.get(&liveness_url).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    // Status endpoint reflects the same verdict.
    let body: serde_json::Value = client
        .get(format!("http://{addr}/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["failure_threshold"], 5);
    assert_eq!(body["alive"], true);
    assert_eq!(body["subscription"], "probe-test");

    shutdown.trigger();
}
