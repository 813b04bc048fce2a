//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::WatcherConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "WATCHER_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}' ({reason})")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WatcherConfig, ConfigError> {
    let config = read_config_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read and deserialize a TOML file without validating it.
fn read_config_file(path: &Path) -> Result<WatcherConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the startup configuration.
///
/// Starts from the file named by `WATCHER_CONFIG` (or the built-in defaults),
/// applies environment overrides, then validates the result. `lookup` is
/// `std::env::var` in production and a map in tests.
pub fn resolve_config<F>(lookup: F) -> Result<WatcherConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: WatcherConfig = match lookup(CONFIG_PATH_ENV) {
        Some(path) => read_config_file(Path::new(&path))?,
        None => WatcherConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve configuration from the process environment.
pub fn from_env() -> Result<WatcherConfig, ConfigError> {
    resolve_config(|key| std::env::var(key).ok())
}

/// Apply the supported environment overrides on top of `config`.
pub fn apply_env_overrides<F>(config: &mut WatcherConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("SLACK_WEBHOOK_URL") {
        // An empty variable means "not configured", same as unset.
        config.alerts.webhook_url = Some(url).filter(|u| !u.trim().is_empty());
    }

    if let Some(path) = lookup("LOG_FILE") {
        config.source.path = path;
    }

    if let Some(value) = lookup("ERROR_RATE_THRESHOLD") {
        config.detection.error_threshold_percent = parse_env("ERROR_RATE_THRESHOLD", value)?;
    }

    if let Some(value) = lookup("WINDOW_SIZE") {
        config.detection.window_size = parse_env("WINDOW_SIZE", value)?;
    }

    if let Some(value) = lookup("ALERT_DELIVERY") {
        config.alerts.delivery = parse_env("ALERT_DELIVERY", value)?;
    }

    Ok(())
}

fn parse_env<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DeliveryMode;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = resolve_config(env(&[])).unwrap();
        assert_eq!(config.source.path, "/var/log/nginx/access.log");
        assert!(config.alerts.webhook_url.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = resolve_config(env(&[
            ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/T/B/X"),
            ("LOG_FILE", "/tmp/access.log"),
            ("ERROR_RATE_THRESHOLD", "5.5"),
            ("WINDOW_SIZE", "50"),
            ("ALERT_DELIVERY", "background"),
        ]))
        .unwrap();

        assert_eq!(
            config.alerts.webhook_url.as_deref(),
            Some("https://hooks.slack.com/services/T/B/X")
        );
        assert_eq!(config.source.path, "/tmp/access.log");
        assert_eq!(config.detection.error_threshold_percent, 5.5);
        assert_eq!(config.detection.window_size, 50);
        assert_eq!(config.alerts.delivery, DeliveryMode::Background);
    }

    #[test]
    fn test_empty_webhook_means_unconfigured() {
        let config = resolve_config(env(&[("SLACK_WEBHOOK_URL", "  ")])).unwrap();
        assert!(config.alerts.webhook_url.is_none());
    }

    #[test]
    fn test_bad_env_value() {
        let err = resolve_config(env(&[("WINDOW_SIZE", "lots")])).unwrap_err();
        match err {
            ConfigError::Env { var, value, .. } => {
                assert_eq!(var, "WINDOW_SIZE");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let err = resolve_config(env(&[("WINDOW_SIZE", "100000000000000")])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert!(matches!(
                errors.as_slice(),
                [ValidationError::WindowSizeTooLarge { size: 100_000_000_000_000, .. }]
            )),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_env_values_are_validated() {
        let err = resolve_config(env(&[("WINDOW_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &vec![ValidationError::ZeroWindowSize]));
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\npath = \"/srv/app.log\"\npoll_interval_ms = 250\n\n[detection]\nwindow_size = 10"
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let config = resolve_config(env(&[
            (CONFIG_PATH_ENV, path.as_str()),
            ("WINDOW_SIZE", "20"),
        ]))
        .unwrap();

        assert_eq!(config.source.path, "/srv/app.log");
        assert_eq!(config.source.poll_interval_ms, 250);
        assert_eq!(config.detection.window_size, 20);
    }

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[alerts]\ntimeout_secs = 0").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_config_file_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[detection]\nwindow_size = \"many\"").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let err = resolve_config(env(&[(CONFIG_PATH_ENV, path.as_str())])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
