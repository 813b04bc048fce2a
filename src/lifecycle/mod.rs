//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Resolve config → Init logging/metrics → Build sink + dispatcher → Run tailer
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → main stops awaiting the tailer → Exit 0
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No state is persisted; shutdown does not flush anything
//! - Queued background alerts are abandoned on shutdown

pub mod signals;

pub use signals::shutdown_signal;
