//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file ($WATCHER_CONFIG)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → loader.rs (environment overrides: SLACK_WEBHOOK_URL, LOG_FILE, ...)
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; there is no reload
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::WatcherConfig;
pub use schema::SourceConfig;
pub use schema::DetectionConfig;
pub use schema::AlertConfig;
pub use schema::DeliveryMode;
pub use schema::ObservabilityConfig;
pub use schema::LogFormat;
