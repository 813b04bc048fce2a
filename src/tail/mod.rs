//! Log tailing subsystem.
//!
//! # Data Flow
//! ```text
//! access log (growing file)
//!     → reader.rs (complete lines only, partial tail buffered)
//!     → tailer.rs (replay existing content, then poll for appends)
//!     → detection::Pipeline → alerting::AlertDispatcher
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: one line is fully processed before the next is read
//! - Existing content is replayed first so detectors start warm
//! - Missing file at startup and any later read failure are fatal
//! - Rotation and truncation are not handled; a replaced file is not reopened

use std::path::PathBuf;

use thiserror::Error;

pub mod reader;
pub mod tailer;

pub use reader::LineReader;
pub use tailer::LogTailer;

/// Fatal errors from the tailing loop.
#[derive(Debug, Error)]
pub enum TailError {
    #[error("cannot open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading log file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
