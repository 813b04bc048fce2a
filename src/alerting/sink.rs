//! Alert delivery sinks.
//!
//! # Responsibilities
//! - Define the `AlertSink` seam the dispatcher delivers through
//! - POST Slack-formatted alerts to an incoming webhook
//!
//! # Design Decisions
//! - Only HTTP 200 counts as delivered
//! - Every request carries a bounded timeout
//! - Sinks report failure; they never retry and never panic

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::alerting::format::SlackMessage;
use crate::alerting::Alert;
use crate::config::AlertConfig;

/// Why an alert was not delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// No webhook URL was configured.
    #[error("notification sink not configured")]
    NotConfigured,

    /// The sink answered with something other than 200.
    #[error("sink returned status {0}")]
    Status(StatusCode),

    /// The request did not complete within the timeout.
    #[error("sink request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or protocol failure.
    #[error("sink request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The background queue was full or closed.
    #[error("delivery queue unavailable: {0}")]
    Queue(String),
}

impl DeliveryError {
    /// Label for the delivery outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            DeliveryError::NotConfigured => "not_configured",
            DeliveryError::Status(_) => "rejected",
            DeliveryError::Timeout(_) => "timeout",
            DeliveryError::Http(_) => "error",
            DeliveryError::Queue(_) => "dropped",
        }
    }
}

/// Something that can deliver an alert.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, alert: &Alert) -> Result<(), DeliveryError>;
}

/// Slack-compatible incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: Option<Url>,
    timeout: Duration,
}

impl WebhookSink {
    pub fn new(url: Option<Url>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url, timeout))
    }

    /// Use a caller-built client. `timeout` is still applied per request.
    pub fn with_client(client: reqwest::Client, url: Option<Url>, timeout: Duration) -> Self {
        Self {
            client,
            url,
            timeout,
        }
    }

    /// Build a sink from validated alert configuration.
    pub fn from_config(config: &AlertConfig) -> Result<Self, DeliveryError> {
        // Validation has already rejected malformed URLs.
        let url = config
            .webhook_url
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok());
        Self::new(url, Duration::from_secs(config.timeout_secs))
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    async fn deliver(&self, alert: &Alert) -> Result<(), DeliveryError> {
        let message = SlackMessage::from(alert);

        let Some(url) = &self.url else {
            let body = serde_json::to_string(&message).unwrap_or_default();
            tracing::info!(kind = alert.kind(), message = %body, "Webhook not configured, alert not sent");
            return Err(DeliveryError::NotConfigured);
        };

        let response = self
            .client
            .post(url.clone())
            .timeout(self.timeout)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout(self.timeout)
                } else {
                    DeliveryError::Http(e)
                }
            })?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(DeliveryError::Status(status)),
        }
    }
}
