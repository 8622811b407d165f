mod defaults;
mod secrets;

#[cfg(test)]
mod tests;

pub use secrets::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::HwError;
use defaults::*;

/// Non-secret settings, read from an optional TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the settings were read from; `None` when defaults are in use.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Poll loop and review API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Sleep between cycles; also the width of the re-check window.
    #[serde(default = "default_retry_period")]
    pub retry_period_secs: u64,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound on a single API request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: default_retry_period(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl PollerConfig {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Telegram Bot API settings. The token and chat id are secrets and live
/// in the environment, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for a daily log file. Empty = stdout.
    #[serde(default)]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Load settings from a TOML file.
///
/// Falls back to defaults if the file does not exist. Runs before logging is
/// set up, so it reports through `Settings::source` instead of logging.
pub fn load(path: &str) -> Result<Settings, HwError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| HwError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let mut settings: Settings = toml::from_str(&content)
        .map_err(|e| HwError::Config(format!("failed to parse settings: {}", e)))?;

    if settings.poller.retry_period_secs == 0 {
        return Err(HwError::Config(
            "poller.retry_period_secs must be greater than zero".into(),
        ));
    }

    settings.source = Some(path.to_path_buf());
    Ok(settings)
}
