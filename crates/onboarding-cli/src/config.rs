//! Configuration loaded from environment variables.
//!
//! Variables use the `ONBOARD_` prefix and `__` between sections, e.g.
//! `ONBOARD_API__BASE_URL` or `ONBOARD_DEVICE__APP_VERSION`.

use account_onboarding::DeviceInfo;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

/// Front-end configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Account API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Device metadata sent with registrations
    #[serde(default)]
    pub device: DeviceConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Account API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `lang` query parameter
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Resend-code path; resend is simulated when unset
    #[serde(default)]
    pub resend_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_app_version")]
    pub app_version: String,

    #[serde(default = "default_device_model")]
    pub device_model: String,

    #[serde(default = "default_os_version")]
    pub os_version: String,

    /// Push notification token
    #[serde(default)]
    pub device_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lang: default_lang(),
            timeout: default_timeout(),
            resend_path: None,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            app_version: default_app_version(),
            device_model: default_device_model(),
            os_version: default_os_version(),
            device_token: String::new(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl From<DeviceConfig> for DeviceInfo {
    fn from(device: DeviceConfig) -> Self {
        Self {
            app_version: device.app_version,
            device_model: device.device_model,
            os_version: device.os_version,
            device_token: device.device_token,
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://admin-cp.rimashaar.com/api/v1".into()
}

fn default_lang() -> String {
    "en".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

fn default_device_model() -> String {
    std::env::consts::OS.into()
}

fn default_os_version() -> String {
    "unknown".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_builder(
            config::Config::builder().add_source(
                config::Environment::with_prefix("ONBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    // Phone codes and versions must stay strings.
                    .try_parsing(false),
            ),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_builder(config::Config::builder()).unwrap();

        assert_eq!(config.api.base_url, "https://admin-cp.rimashaar.com/api/v1");
        assert_eq!(config.api.lang, "en");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.api.resend_path, None);
        assert_eq!(config.device.device_model, std::env::consts::OS);
        assert!(config.device.device_token.is_empty());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_overrides() {
        let builder = config::Config::builder()
            .set_override("api.base_url", "http://localhost:9000/api/v1")
            .unwrap()
            .set_override("api.timeout", "5s")
            .unwrap()
            .set_override("api.resend_path", "resend-code")
            .unwrap()
            .set_override("device.app_version", "2.0.1")
            .unwrap();

        let config = Config::from_builder(builder).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(config.api.resend_path.as_deref(), Some("resend-code"));

        let device = DeviceInfo::from(config.device);
        assert_eq!(device.app_version, "2.0.1");
        assert_eq!(device.os_version, "unknown");
    }
}
