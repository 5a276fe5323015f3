//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, extract::connect_info::MockConnectInfo, response::Response, Router};
use ssrf_monitor::{HttpServer, LogStore, MonitorConfig, Shutdown};
use tokio::net::TcpListener;

/// Peer address seen by handlers driven through `test_router`.
#[allow(dead_code)]
pub const TEST_PEER: &str = "192.0.2.1:40000";

/// Config with a small retention, suitable for tests.
#[allow(dead_code)]
pub fn test_config(max_logs: usize) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.capture.max_logs = max_logs;
    config.display.domain = Some("oob.test".to_string());
    config
}

/// In-process router with a mocked peer address, plus the store behind it.
#[allow(dead_code)]
pub fn test_router(config: MonitorConfig) -> (Router, Arc<LogStore>) {
    let server = HttpServer::new(config);
    let peer: SocketAddr = TEST_PEER.parse().unwrap();
    let router = server.router().layer(MockConnectInfo(peer));
    (router, server.store())
}

/// Start a real server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_monitor(config: MonitorConfig) -> (SocketAddr, Arc<LogStore>, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    let store = server.store();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, store, shutdown)
}

/// HTTP client that ignores proxy environment variables.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
