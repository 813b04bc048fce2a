//! Access log watcher for blue/green failover and upstream error spikes.

pub mod alerting;
pub mod config;
pub mod detection;
pub mod lifecycle;
pub mod observability;
pub mod parser;
pub mod tail;

pub use alerting::{Alert, AlertDispatcher, AlertSink, WebhookSink};
pub use config::WatcherConfig;
pub use detection::Pipeline;
pub use tail::{LogTailer, TailError};
