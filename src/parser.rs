//! Access log line parsing.
//!
//! # Responsibilities
//! - Extract the active pool from `pool="<value>"`
//! - Extract the upstream status from `upstream_status=<digits or ->`
//! - Stamp each observation with the time it was processed
//!
//! # Design Decisions
//! - Lines missing either field are not errors; `parse` returns `None`
//! - Field order within the line does not matter
//! - Patterns are compiled once per parser, not per line

use chrono::{DateTime, Utc};
use regex::Regex;

/// One parsed access log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Pool that served the request. May be empty or `unknown`.
    pub pool: String,
    /// Upstream status: ASCII digits or `-`.
    pub status: Option<String>,
    /// When the line was processed (not the log's own timestamp).
    pub timestamp: DateTime<Utc>,
}

/// Parser for nginx-style access lines carrying `pool` and `upstream_status`.
#[derive(Debug, Clone)]
pub struct LineParser {
    pool: Regex,
    status: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        // Both patterns are literals; failing to compile them is a programming error.
        Self {
            pool: Regex::new(r#"pool="([^"]*)""#).expect("pool pattern is valid"),
            status: Regex::new(r"upstream_status=(\d+|-)").expect("status pattern is valid"),
        }
    }

    /// Parse a line, stamping it with the current wall-clock time.
    pub fn parse(&self, line: &str) -> Option<Observation> {
        self.parse_at(line, Utc::now())
    }

    /// Parse a line with an explicit timestamp.
    pub fn parse_at(&self, line: &str, timestamp: DateTime<Utc>) -> Option<Observation> {
        let pool = self.pool.captures(line)?.get(1)?.as_str();
        let status = self.status.captures(line)?.get(1)?.as_str();

        Some(Observation {
            pool: pool.to_string(),
            status: Some(status.to_string()),
            timestamp,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"172.18.0.1 - - [10/Oct/2025:13:55:36 +0000] "GET /version HTTP/1.1" 200 57 pool="blue" release="blue-v1" upstream_status=200 upstream_addr=172.18.0.3:3000 request_time=0.004"#;

    #[test]
    fn test_parse_full_line() {
        let obs = LineParser::new().parse(LINE).unwrap();
        assert_eq!(obs.pool, "blue");
        assert_eq!(obs.status.as_deref(), Some("200"));
    }

    #[test]
    fn test_field_order_irrelevant() {
        let parser = LineParser::new();
        let obs = parser.parse(r#"upstream_status=502 something pool="green""#).unwrap();
        assert_eq!(obs.pool, "green");
        assert_eq!(obs.status.as_deref(), Some("502"));
    }

    #[test]
    fn test_dash_status() {
        let obs = LineParser::new().parse(r#"pool="blue" upstream_status=-"#).unwrap();
        assert_eq!(obs.status.as_deref(), Some("-"));
    }

    #[test]
    fn test_multiple_upstreams_take_first_status() {
        let obs = LineParser::new()
            .parse(r#"pool="blue" upstream_status=502, 200"#)
            .unwrap();
        assert_eq!(obs.status.as_deref(), Some("502"));
    }

    #[test]
    fn test_empty_pool_still_parses() {
        let obs = LineParser::new().parse(r#"pool="" upstream_status=200"#).unwrap();
        assert_eq!(obs.pool, "");
    }

    #[test]
    fn test_missing_fields_skip() {
        let parser = LineParser::new();
        assert!(parser.parse(r#"pool="blue" status=200"#).is_none());
        assert!(parser.parse("upstream_status=200").is_none());
        assert!(parser.parse(r#"pool=blue upstream_status=200"#).is_none());
        assert!(parser.parse(r#"pool="blue" upstream_status=abc"#).is_none());
        assert!(parser.parse("").is_none());
    }

    #[test]
    fn test_parse_at_uses_given_time() {
        let ts = DateTime::parse_from_rfc3339("2025-10-10T13:55:36Z")
            .unwrap()
            .with_timezone(&Utc);
        let obs = LineParser::new()
            .parse_at(r#"pool="blue" upstream_status=200"#, ts)
            .unwrap();
        assert_eq!(obs.timestamp, ts);
    }
}
