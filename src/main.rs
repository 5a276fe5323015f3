//! SSRF Monitor
//!
//! A passive HTTP recorder for out-of-band callbacks. Every request to a
//! recognized path is captured verbatim together with the response it got, and
//! the most recent captures can be inspected, exported and cleared from the
//! admin page.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──┬──▶ admin (view / export / clear) ──┐
//!                                    │                                    │ snapshot / clear
//!                                    └──▶ capture handler                 ▼
//!                                           routing ─▶ formatter ─▶ capture::LogStore
//!     Client Response ◀───────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use ssrf_monitor::config::{load_config, validate_config, ConfigError, MonitorConfig};
use ssrf_monitor::lifecycle::startup;
use ssrf_monitor::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "ssrf-monitor")]
#[command(about = "Passive HTTP recorder for out-of-band callbacks", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Maximum number of captures to keep
    #[arg(short, long)]
    limit: Option<usize>,

    /// Domain name shown in the admin page (e.g., oob.example.com)
    #[arg(short, long)]
    domain: Option<String>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

/// Layer command-line flags over the file (or default) configuration.
fn apply_overrides(config: &mut MonitorConfig, args: &Args) {
    if let Some(port) = args.port {
        config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
            Ok(mut addr) => {
                addr.set_port(port);
                addr.to_string()
            }
            Err(_) => format!("0.0.0.0:{}", port),
        };
    }
    if let Some(limit) = args.limit {
        config.capture.max_logs = limit;
    }
    if let Some(domain) = &args.domain {
        config.display.domain = Some(domain.clone());
    }
    if let Some(level) = &args.log_level {
        config.observability.log_level = level.clone();
    }
}

fn build_config(args: &Args) -> Result<MonitorConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };
    apply_overrides(&mut config, args);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = build_config(&args)?;

    logging::init_logging(&config.observability);
    tracing::info!("ssrf-monitor v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            port: None,
            limit: None,
            domain: None,
            config: None,
            log_level: None,
        }
    }

    #[test]
    fn defaults_without_flags() {
        let config = build_config(&args()).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3001");
        assert_eq!(config.capture.max_logs, 50);
        assert_eq!(config.display_domain(), "localhost:3001");
    }

    #[test]
    fn flags_override_defaults() {
        let mut a = args();
        a.port = Some(8080);
        a.limit = Some(5);
        a.domain = Some("oob.example.com".to_string());

        let config = build_config(&a).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.capture.max_logs, 5);
        assert_eq!(config.display_domain(), "oob.example.com");
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut a = args();
        a.limit = Some(0);
        assert!(matches!(build_config(&a), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn cli_parses_short_flags() {
        let a = Args::parse_from(["ssrf-monitor", "-p", "4000", "-l", "10", "-d", "x.test"]);
        assert_eq!(a.port, Some(4000));
        assert_eq!(a.limit, Some(10));
        assert_eq!(a.domain.as_deref(), Some("x.test"));
    }
}
