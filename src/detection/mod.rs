//! Detection subsystem.
//!
//! # Data Flow
//! ```text
//! line (from tail)
//!     → pipeline.rs (count line, parse via crate::parser)
//!     → failover.rs (pool edge detection)
//!     → error_rate.rs (sliding window over upstream status)
//!     → Vec<Alert> (failover first, then error rate)
//! ```
//!
//! # Design Decisions
//! - Detectors are plain owned state machines with no I/O
//! - State lives in the pipeline, not in process globals
//! - Detectors never fail; a line either yields alerts or it does not

pub mod error_rate;
pub mod failover;
pub mod pipeline;

pub use error_rate::ErrorRateDetector;
pub use failover::FailoverDetector;
pub use pipeline::Pipeline;
