//! Slack incoming-webhook payloads.
//!
//! Every alert renders as a header, two-column sections of `mrkdwn` fields
//! and a context note with the advised next step.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::alerting::Alert;

pub const FAILOVER_TITLE: &str = "🚨 Blue/Green Failover Detected";
pub const ERROR_RATE_TITLE: &str = "⚠️ High Error Rate Detected";

const FAILOVER_NOTE: &str = "Check the health of the primary container and investigate the cause.";
const ERROR_RATE_NOTE: &str =
    "Investigate upstream service logs and consider failover if necessary.";

/// Top-level webhook body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlackMessage {
    /// Plain fallback shown in notifications.
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { fields: Vec<TextObject> },
    Context { elements: Vec<TextObject> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

impl TextObject {
    fn plain(text: &str) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.to_string(),
        }
    }

    fn mrkdwn(text: String) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text,
        }
    }

    fn field(label: &str, value: impl std::fmt::Display) -> Self {
        Self::mrkdwn(format!("*{}:* {}", label, value))
    }
}

impl SlackMessage {
    fn new(title: &str, sections: Vec<Vec<TextObject>>, note: &str) -> Self {
        let mut blocks = Vec::with_capacity(sections.len() + 2);
        blocks.push(Block::Header {
            text: TextObject::plain(title),
        });
        blocks.extend(sections.into_iter().map(|fields| Block::Section { fields }));
        blocks.push(Block::Context {
            elements: vec![TextObject::mrkdwn(note.to_string())],
        });

        Self {
            text: title.to_string(),
            blocks,
        }
    }
}

impl From<&Alert> for SlackMessage {
    fn from(alert: &Alert) -> Self {
        match alert {
            Alert::Failover {
                from_pool,
                to_pool,
                timestamp,
                total_requests_processed,
            } => SlackMessage::new(
                FAILOVER_TITLE,
                vec![
                    vec![
                        TextObject::field("From", from_pool),
                        TextObject::field("To", to_pool),
                    ],
                    vec![
                        TextObject::field("Time", format_time(timestamp)),
                        TextObject::field("Requests Processed", total_requests_processed),
                    ],
                ],
                FAILOVER_NOTE,
            ),
            Alert::HighErrorRate {
                error_rate,
                threshold,
                error_count,
                window_size,
                timestamp,
                total_requests_processed,
            } => SlackMessage::new(
                ERROR_RATE_TITLE,
                vec![
                    vec![
                        TextObject::field("Error Rate", format!("{}%", format_percent(*error_rate))),
                        TextObject::field("Threshold", format!("{:?}%", threshold)),
                    ],
                    vec![
                        TextObject::field("Errors", format!("{}/{}", error_count, window_size)),
                        TextObject::field("Time", format_time(timestamp)),
                    ],
                    vec![
                        TextObject::field("Total Requests", total_requests_processed),
                        TextObject::field("Window", format!("{} requests", window_size)),
                    ],
                ],
                ERROR_RATE_NOTE,
            ),
        }
    }
}

fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Measured rates: two decimals at most, but always at least one
/// (`25.0`, `2.5`, `33.33`). The configured threshold is shown as given.
fn format_percent(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    if s.ends_with('0') {
        s.pop();
    }
    s
}
