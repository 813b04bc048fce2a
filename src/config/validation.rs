//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (window within 1..=MAX_WINDOW_SIZE, threshold within 0..=100, timeouts > 0)
//! - Check the webhook URL and metrics address are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::WatcherConfig;

/// Largest accepted `detection.window_size`.
pub const MAX_WINDOW_SIZE: usize = 1_000_000;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("source.path must not be empty")]
    EmptySourcePath,

    #[error("source.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error("detection.window_size must be greater than zero")]
    ZeroWindowSize,

    #[error("detection.window_size must be at most {max}, got {size}")]
    WindowSizeTooLarge { size: usize, max: usize },

    #[error("detection.error_threshold_percent must be between 0 and 100, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("alerts.webhook_url '{url}' is invalid: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    #[error("alerts.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("alerts.queue_capacity must be greater than zero")]
    ZeroQueueCapacity,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.source.path.trim().is_empty() {
        errors.push(ValidationError::EmptySourcePath);
    }
    if config.source.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    match config.detection.window_size {
        0 => errors.push(ValidationError::ZeroWindowSize),
        size if size > MAX_WINDOW_SIZE => errors.push(ValidationError::WindowSizeTooLarge {
            size,
            max: MAX_WINDOW_SIZE,
        }),
        _ => {}
    }
    let threshold = config.detection.error_threshold_percent;
    if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
        errors.push(ValidationError::ThresholdOutOfRange(threshold));
    }

    if let Some(raw) = &config.alerts.webhook_url {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidWebhookUrl {
                url: raw.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidWebhookUrl {
                url: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }
    if config.alerts.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.alerts.queue_capacity == 0 {
        errors.push(ValidationError::ZeroQueueCapacity);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
