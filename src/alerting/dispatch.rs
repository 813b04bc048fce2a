//! Fire-and-forget alert dispatch.
//!
//! # Modes
//! - Inline: the tailing loop awaits delivery (bounded by the sink timeout)
//! - Background: alerts go into a bounded queue drained by one worker task;
//!   a full queue drops the alert rather than blocking ingestion
//!
//! In both modes a failed delivery is logged and counted, never retried and
//! never propagated.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::alerting::sink::{AlertSink, DeliveryError};
use crate::alerting::Alert;
use crate::config::{AlertConfig, DeliveryMode};
use crate::observability::metrics;

/// Hands alerts to a sink according to the configured delivery mode.
pub enum AlertDispatcher {
    Inline(Arc<dyn AlertSink>),
    Background(mpsc::Sender<Alert>),
}

impl AlertDispatcher {
    pub fn inline(sink: Arc<dyn AlertSink>) -> Self {
        AlertDispatcher::Inline(sink)
    }

    /// Spawn the delivery worker and return a dispatcher feeding it.
    ///
    /// Must be called from within a Tokio runtime. The worker exits once the
    /// dispatcher is dropped and the queue is drained.
    pub fn background(sink: Arc<dyn AlertSink>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Alert>(capacity);

        tokio::spawn(async move {
            tracing::debug!(capacity, "Alert delivery worker started");
            while let Some(alert) = rx.recv().await {
                deliver(sink.as_ref(), &alert).await;
            }
            tracing::debug!("Alert delivery worker stopped");
        });

        AlertDispatcher::Background(tx)
    }

    pub fn from_config(sink: Arc<dyn AlertSink>, config: &AlertConfig) -> Self {
        match config.delivery {
            DeliveryMode::Inline => Self::inline(sink),
            DeliveryMode::Background => Self::background(sink, config.queue_capacity),
        }
    }

    /// Dispatch one alert. Never fails and never blocks on a full queue.
    pub async fn dispatch(&self, alert: Alert) {
        match self {
            AlertDispatcher::Inline(sink) => {
                deliver(sink.as_ref(), &alert).await;
            }
            AlertDispatcher::Background(tx) => {
                if let Err(e) = tx.try_send(alert) {
                    let err = DeliveryError::Queue(e.to_string());
                    metrics::record_delivery(err.outcome());
                    tracing::warn!(error = %err, "Dropping alert");
                }
            }
        }
    }
}

/// Deliver once, logging and counting the outcome.
async fn deliver(sink: &dyn AlertSink, alert: &Alert) {
    match sink.deliver(alert).await {
        Ok(()) => {
            metrics::record_delivery("delivered");
            tracing::info!(kind = alert.kind(), "Alert delivered");
        }
        Err(DeliveryError::NotConfigured) => {
            metrics::record_delivery(DeliveryError::NotConfigured.outcome());
        }
        Err(e) => {
            metrics::record_delivery(e.outcome());
            tracing::error!(kind = alert.kind(), error = %e, "Failed to deliver alert");
        }
    }
}
