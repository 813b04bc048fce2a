//! Alert values produced by the detectors.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A detector finding, constructed once and handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    /// The active pool changed between two consecutive valid observations.
    Failover {
        from_pool: String,
        to_pool: String,
        timestamp: DateTime<Utc>,
        total_requests_processed: u64,
    },
    /// The rolling error rate is above the configured threshold.
    HighErrorRate {
        /// Percentage, rounded to two decimal places.
        error_rate: f64,
        threshold: f64,
        error_count: usize,
        window_size: usize,
        timestamp: DateTime<Utc>,
        total_requests_processed: u64,
    },
}

impl Alert {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Alert::Failover { .. } => "failover",
            Alert::HighErrorRate { .. } => "high_error_rate",
        }
    }

    pub fn total_requests_processed(&self) -> u64 {
        match self {
            Alert::Failover { total_requests_processed, .. }
            | Alert::HighErrorRate { total_requests_processed, .. } => *total_requests_processed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let alert = Alert::Failover {
            from_pool: "blue".into(),
            to_pool: "green".into(),
            timestamp: Utc::now(),
            total_requests_processed: 7,
        };
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["type"], "failover");
        assert_eq!(value["from_pool"], "blue");
        assert_eq!(value["total_requests_processed"], 7);
        assert_eq!(alert.kind(), "failover");
    }
}
