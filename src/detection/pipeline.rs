//! Per-line processing: parse, count, detect.

use chrono::{DateTime, Utc};

use crate::alerting::Alert;
use crate::config::DetectionConfig;
use crate::detection::error_rate::ErrorRateDetector;
use crate::detection::failover::FailoverDetector;
use crate::observability::metrics;
use crate::parser::{LineParser, Observation};

/// Owns the parser, both detectors and the processed-line counter.
///
/// This is the only holder of detector state, so nothing here needs a lock.
#[derive(Debug)]
pub struct Pipeline {
    parser: LineParser,
    failover: FailoverDetector,
    error_rate: ErrorRateDetector,
    lines_processed: u64,
}

impl Pipeline {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            parser: LineParser::new(),
            failover: FailoverDetector::new(),
            error_rate: ErrorRateDetector::new(config.window_size, config.error_threshold_percent),
            lines_processed: 0,
        }
    }

    /// Process one complete line, stamped with the current time.
    pub fn ingest(&mut self, line: &str) -> Vec<Alert> {
        self.ingest_at(line, Utc::now())
    }

    /// Process one complete line with an explicit timestamp.
    ///
    /// Every line is counted, parseable or not. Alerts come back in detector
    /// order: failover first, then error rate.
    pub fn ingest_at(&mut self, line: &str, timestamp: DateTime<Utc>) -> Vec<Alert> {
        self.lines_processed += 1;
        metrics::record_line();

        let Some(obs) = self.parser.parse_at(line, timestamp) else {
            tracing::trace!(line = %line, "Skipping unparseable line");
            metrics::record_skipped_line();
            return Vec::new();
        };

        self.detect(&obs)
    }

    fn detect(&mut self, obs: &Observation) -> Vec<Alert> {
        let mut alerts = Vec::with_capacity(2);

        if let Some(alert) = self.failover.observe(obs, self.lines_processed) {
            alerts.push(alert);
        }

        if let Some(alert) = self.error_rate.observe(obs, self.lines_processed) {
            alerts.push(alert);
        }
        if let Some(rate) = self.error_rate.current_rate() {
            metrics::record_error_rate(rate);
        }

        for alert in &alerts {
            metrics::record_alert(alert.kind());
        }
        alerts
    }

    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    pub fn failover(&self) -> &FailoverDetector {
        &self.failover
    }

    pub fn error_rate(&self) -> &ErrorRateDetector {
        &self.error_rate
    }
}
