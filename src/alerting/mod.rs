//! Alerting subsystem.
//!
//! # Data Flow
//! ```text
//! Alert (from detection)
//!     → dispatch.rs (inline await, or bounded background queue)
//!     → sink.rs (AlertSink; WebhookSink posts over HTTP)
//!     → format.rs (Alert → Slack blocks JSON)
//! ```
//!
//! # Design Decisions
//! - Delivery is best effort: one attempt, bounded timeout, no retries
//! - Delivery failures never reach detector state or the read position
//! - The sink is a trait so tests and other backends can stand in

pub mod alert;
pub mod dispatch;
pub mod format;
pub mod sink;

pub use alert::Alert;
pub use dispatch::AlertDispatcher;
pub use format::SlackMessage;
pub use sink::{AlertSink, DeliveryError, WebhookSink};
