//! Rolling error-rate detection.
//!
//! # Responsibilities
//! - Classify each upstream status as error (4xx/5xx) or not
//! - Keep the last `window_size` outcomes in a bounded FIFO
//! - Alert while the rate over a full window is strictly above the threshold
//!
//! # Design Decisions
//! - Error count is maintained incrementally on push/evict
//! - No alert until the window is full, however bad the burst
//! - No debounce: every qualifying observation alerts

use std::collections::VecDeque;

use crate::alerting::Alert;
use crate::parser::Observation;

/// Upper bound on the up-front window allocation; larger windows grow on demand.
const INITIAL_CAPACITY: usize = 1024;

/// Sliding window of recent outcomes with an error-rate threshold.
#[derive(Debug)]
pub struct ErrorRateDetector {
    window: VecDeque<bool>,
    window_size: usize,
    threshold_percent: f64,
    error_count: usize,
}

impl ErrorRateDetector {
    pub fn new(window_size: usize, threshold_percent: f64) -> Self {
        Self {
            window: VecDeque::with_capacity(window_size.min(INITIAL_CAPACITY)),
            window_size,
            threshold_percent,
            error_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Error rate over the window, once it is full.
    pub fn current_rate(&self) -> Option<f64> {
        if self.window.len() < self.window_size || self.window.is_empty() {
            return None;
        }
        Some(100.0 * self.error_count as f64 / self.window.len() as f64)
    }

    /// Feed one observation; returns an alert when the threshold is exceeded.
    pub fn observe(&mut self, obs: &Observation, total_requests_processed: u64) -> Option<Alert> {
        let status = obs.status.as_deref()?;
        self.push(is_error(status));

        let rate = self.current_rate()?;
        if rate <= self.threshold_percent {
            return None;
        }

        let window_size = self.window.len();
        tracing::warn!(
            error_rate = %format!("{:.1}", rate),
            threshold = self.threshold_percent,
            errors = self.error_count,
            window = window_size,
            "High error rate"
        );

        Some(Alert::HighErrorRate {
            error_rate: round2(rate),
            threshold: self.threshold_percent,
            error_count: self.error_count,
            window_size,
            timestamp: obs.timestamp,
            total_requests_processed,
        })
    }

    fn push(&mut self, error: bool) {
        if self.window.len() == self.window_size {
            if let Some(true) = self.window.pop_front() {
                self.error_count -= 1;
            }
        }
        self.window.push_back(error);
        if error {
            self.error_count += 1;
        }
    }
}

/// Client and server errors count alike; `-` and anything else do not.
pub fn is_error(status: &str) -> bool {
    matches!(status.as_bytes().first(), Some(b'4') | Some(b'5'))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
