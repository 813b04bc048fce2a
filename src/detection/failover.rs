//! Failover edge detection.
//!
//! # State Transitions
//! ```text
//! no baseline  → baseline(P):  first valid pool, no alert
//! baseline(P)  → baseline(P):  same pool, no alert
//! baseline(P)  → baseline(Q):  different pool, Failover{P → Q}
//! ```
//!
//! Empty and `unknown` pools are ignored entirely.

use crate::alerting::Alert;
use crate::parser::Observation;

/// Pool value nginx writes when the upstream could not be identified.
const UNKNOWN_POOL: &str = "unknown";

/// Tracks the last known active pool and reports every change.
#[derive(Debug, Default)]
pub struct FailoverDetector {
    last_pool: Option<String>,
}

impl FailoverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent valid pool, if any has been observed.
    pub fn last_pool(&self) -> Option<&str> {
        self.last_pool.as_deref()
    }

    /// Feed one observation; returns an alert when the pool changed.
    pub fn observe(&mut self, obs: &Observation, total_requests_processed: u64) -> Option<Alert> {
        let pool = obs.pool.as_str();
        if pool.is_empty() || pool == UNKNOWN_POOL {
            return None;
        }

        match self.last_pool.replace(pool.to_string()) {
            Some(previous) if previous != pool => {
                tracing::warn!(from = %previous, to = %pool, "Failover detected");
                Some(Alert::Failover {
                    from_pool: previous,
                    to_pool: pool.to_string(),
                    timestamp: obs.timestamp,
                    total_requests_processed,
                })
            }
            Some(_) => None,
            None => {
                tracing::info!(pool = %pool, "Baseline pool established");
                None
            }
        }
    }
}
