use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::wizard::scan::ScanSchedule;

pub const ENV_API_URL: &str = "VOTER_API_URL";
pub const ENV_SCAN_DURATION_MS: &str = "VOTER_SCAN_DURATION_MS";
pub const ENV_ADVANCE_DELAY_MS: &str = "VOTER_ADVANCE_DELAY_MS";
pub const ENV_MOCK_WALLET: &str = "VOTER_MOCK_WALLET";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// Runtime settings shared by the desktop, web and terminal front ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub scan_duration_ms: u64,
    pub advance_delay_ms: u64,
    /// Inject the in-memory wallet provider at startup
    pub mock_wallet: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            scan_duration_ms: 3000,
            advance_delay_ms: 1500,
            mock_wallet: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `VOTER_*` environment variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::default())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty { key: ENV_API_URL });
            }
            config.api_base_url = url.to_string();
        }
        if let Some(value) = lookup(ENV_SCAN_DURATION_MS) {
            config.scan_duration_ms = parse_millis(ENV_SCAN_DURATION_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_ADVANCE_DELAY_MS) {
            config.advance_delay_ms = parse_millis(ENV_ADVANCE_DELAY_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_MOCK_WALLET) {
            config.mock_wallet = matches!(value.trim(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn scan_schedule(&self) -> ScanSchedule {
        ScanSchedule {
            scan_duration: Duration::from_millis(self.scan_duration_ms),
            advance_delay: Duration::from_millis(self.advance_delay_ms),
        }
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scan_schedule().scan_duration, Duration::from_millis(3000));
        assert_eq!(config.scan_schedule().advance_delay, Duration::from_millis(1500));
    }

    #[test]
    fn env_overrides_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, " https://voters.example.org "),
            (ENV_SCAN_DURATION_MS, "500"),
            (ENV_ADVANCE_DELAY_MS, "250"),
            (ENV_MOCK_WALLET, "true"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://voters.example.org");
        assert_eq!(config.scan_duration_ms, 500);
        assert_eq!(config.advance_delay_ms, 250);
        assert!(config.mock_wallet);
    }

    #[test]
    fn malformed_delay_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_SCAN_DURATION_MS, "3s")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: ENV_SCAN_DURATION_MS,
                value: "3s".to_string()
            }
        );
    }

    #[test]
    fn empty_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_API_URL, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { key: ENV_API_URL });
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api_base_url": "http://10.0.0.5:9000"}"#).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
