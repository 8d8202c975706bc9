use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::predict::DEFAULT_ENDPOINT;

pub const DEFAULT_REPORT_LABEL: &str = "PCOD-Health-Report";

/// Top-level configuration, read from the environment and an optional `.env`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub predictor: PredictorConfig,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let endpoint =
            env::var("WELLNESS_PREDICT_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        let timeout = match env::var("WELLNESS_PREDICT_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let directory = env::var("WELLNESS_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let label =
            env::var("WELLNESS_REPORT_LABEL").unwrap_or_else(|_| DEFAULT_REPORT_LABEL.to_string());

        let log_level = env::var("WELLNESS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            predictor: PredictorConfig { endpoint, timeout },
            report: ReportConfig { directory, label },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

/// Where assessments are sent. No timeout unless one is configured.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub directory: PathBuf,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WELLNESS_PREDICT_URL must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
    #[error("WELLNESS_PREDICT_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("WELLNESS_PREDICT_URL");
        env::remove_var("WELLNESS_PREDICT_TIMEOUT_SECS");
        env::remove_var("WELLNESS_REPORT_DIR");
        env::remove_var("WELLNESS_REPORT_LABEL");
        env::remove_var("WELLNESS_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.predictor.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.predictor.timeout, None);
        assert_eq!(config.report.directory, PathBuf::from("."));
        assert_eq!(config.report.label, DEFAULT_REPORT_LABEL);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WELLNESS_PREDICT_URL", "http://localhost:8000/predict");
        env::set_var("WELLNESS_PREDICT_TIMEOUT_SECS", "15");
        env::set_var("WELLNESS_REPORT_LABEL", "Weekly");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.predictor.endpoint, "http://localhost:8000/predict");
        assert_eq!(config.predictor.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.report.label, "Weekly");
    }

    #[test]
    fn rejects_bad_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WELLNESS_PREDICT_TIMEOUT_SECS", "0");
        assert_eq!(
            AppConfig::load().map(|_| ()),
            Err(ConfigError::InvalidTimeout("0".to_string()))
        );

        reset_env();
        env::set_var("WELLNESS_PREDICT_URL", "ftp://example.com");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        reset_env();
    }
}
