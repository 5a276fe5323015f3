//! Configuration validation.
//!
//! Serde handles syntax; this module checks the semantics and reports every
//! problem at once rather than stopping at the first.

use std::net::SocketAddr;

use crate::config::schema::MonitorConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let capture = &config.capture;
    if capture.max_logs == 0 {
        errors.push(ValidationError::new("capture.max_logs", "must be at least 1"));
    }

    let capture_paths = [
        ("capture.liveness_path", &capture.liveness_path),
        ("capture.log_path", &capture.log_path),
        ("capture.favicon_path", &capture.favicon_path),
    ];
    for (field, path) in capture_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(field, "must start with '/'"));
        }
    }
    for (i, (field, path)) in capture_paths.iter().enumerate() {
        if capture_paths[..i].iter().any(|(_, other)| other == path) {
            errors.push(ValidationError::new(
                *field,
                format!("'{}' is already used by another capture path", path),
            ));
        }
    }

    let admin = config.admin.path.as_str();
    if !admin.starts_with('/') || admin == "/" || admin.ends_with('/') {
        errors.push(ValidationError::new(
            "admin.path",
            "must start with '/', must not end with '/' and must not be the root",
        ));
    } else if admin.contains(|c: char| matches!(c, '{' | '}' | '*')) {
        errors.push(ValidationError::new(
            "admin.path",
            format!("'{}' must not contain route syntax ('{{', '}}' or '*')", admin),
        ));
    } else if capture_paths
        .iter()
        .any(|(_, path)| *path == admin || path.starts_with(&format!("{}/", admin)))
    {
        errors.push(ValidationError::new(
            "admin.path",
            format!("'{}' collides with a capture path", admin),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
