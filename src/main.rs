//! Pool watcher (v1)
//!
//! Tails an nginx access log and alerts a Slack webhook when the active
//! upstream pool flips or the upstream error rate climbs.
//!
//! # Architecture Overview
//!
//! ```text
//!   access.log ──▶ tail::LineReader ──▶ detection::Pipeline ──▶ alerting::AlertDispatcher ──▶ webhook
//!                  (complete lines)     ├─ parser::LineParser    (inline or background)
//!                                       ├─ FailoverDetector
//!                                       └─ ErrorRateDetector
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use pool_watcher::alerting::{AlertDispatcher, AlertSink, WebhookSink};
use pool_watcher::config::loader;
use pool_watcher::lifecycle::shutdown_signal;
use pool_watcher::observability::{logging, metrics};
use pool_watcher::tail::LogTailer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = loader::from_env()?;

    logging::init_logging(&config.observability);

    tracing::info!("pool-watcher v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        log_file = %config.source.path,
        window_size = config.detection.window_size,
        error_threshold_percent = config.detection.error_threshold_percent,
        delivery = ?config.alerts.delivery,
        webhook_configured = config.alerts.webhook_url.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let sink: Arc<dyn AlertSink> = Arc::new(WebhookSink::from_config(&config.alerts)?);
    let dispatcher = AlertDispatcher::from_config(sink, &config.alerts);
    let tailer = LogTailer::from_config(&config, dispatcher);

    tokio::select! {
        result = tailer.run() => {
            if let Err(e) = &result {
                tracing::error!(error = %e, "Log watcher stopped");
            }
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
