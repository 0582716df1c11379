#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const API_URL_ENV: &str = "PRODREC_API_URL";

/// Appends the `/api` suffix when a configured URL forgot it.
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("/api") {
        raw.to_string()
    } else {
        format!("{}/api", raw.strip_suffix('/').unwrap_or(raw))
    }
}

/// Effective client settings after merging flags, environment and the TOML file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_ms: u64,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: None,
            json_logs: false,
        }
    }
}

impl Settings {
    /// Flag or env var wins over the file; the file wins over defaults.
    pub fn resolve(api_url: Option<&str>, timeout_ms: Option<u64>, file: Option<&TomlConfig>) -> Self {
        let api_base_url = api_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| file.and_then(TomlConfig::base_url))
            .map(normalize_base_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_base_url,
            timeout_ms: timeout_ms
                .or_else(|| file.and_then(TomlConfig::timeout_ms))
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            log_level: file.and_then(TomlConfig::log_level).map(str::to_string),
            json_logs: file.map(TomlConfig::json_logs).unwrap_or(false),
        }
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_base_url)?;
        validate_range("timeout_ms", self.timeout_ms, 1, 600_000)?;
        Ok(())
    }
}
