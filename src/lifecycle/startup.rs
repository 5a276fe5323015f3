//! Startup orchestration.
//!
//! Order: metrics exporter, listener bind, banner, signal handling, serve.
//! Bind and serve errors are fatal. A metrics exporter that cannot start is
//! logged and the monitor runs without it.

use tokio::net::TcpListener;

use crate::config::MonitorConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Run the monitor until a shutdown signal arrives.
pub async fn run(config: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    let domain = config.display_domain();

    tracing::info!(
        address = %local_addr,
        domain = %domain,
        admin_url = %format!("http://{}{}", domain, config.admin.path),
        max_logs = config.capture.max_logs,
        "SSRF monitor running"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
