//! Configuration management
//!
//! Settings live in `<data dir>/settings.json`:
//! ```json
//! {
//!   "store": { "backend": "http", "baseUrl": "http://localhost:3001", "timeoutSecs": 30 },
//!   "auth": { "tokenTtlHours": 24 },
//!   "checkout": { "cardDeclineRate": 0.2, "cardDelayMs": 3000, "instantDelayMs": 2000,
//!                 "pixDiscountPercent": 5, "merchantName": "Big Burger" }
//! }
//! ```
//! Keys this crate does not know about are kept when saving.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::http::{API_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::domain::payment::DEFAULT_PIX_DISCOUNT_PERCENT;
use crate::domain::token::DEFAULT_TOKEN_TTL_HOURS;
use crate::services::checkout::{
    CheckoutSettings, DEFAULT_CARD_DECLINE_RATE, DEFAULT_CARD_DELAY_MS, DEFAULT_INSTANT_DELAY_MS,
    DEFAULT_MERCHANT_NAME,
};

pub const SETTINGS_FILENAME: &str = "settings.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BIGBURGER_DIR";

/// Environment variable overriding `store.backend`
pub const BACKEND_ENV: &str = "BIGBURGER_BACKEND";

/// Longest session a settings file may ask for (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Where the store lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A json-server at `store.baseUrl`
    #[default]
    Http,
    /// `db.json` in the data directory
    Local,
    /// In-process, gone when the process exits
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Http => "http",
            StoreBackend::Local => "local",
            StoreBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" | "remote" => Ok(StoreBackend::Http),
            "local" | "file" => Ok(StoreBackend::Local),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("Unknown store backend '{}' (expected http, local or memory)", other),
        }
    }
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    store: StoreSettings,
    #[serde(default)]
    auth: AuthSettings,
    #[serde(default)]
    checkout: CheckoutFileSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backend: Option<StoreBackend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_ttl_hours: Option<i64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutFileSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_decline_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instant_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pix_discount_percent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    merchant_name: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Storefront configuration (resolved view of settings)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub backend: StoreBackend,
    pub base_url: String,
    pub timeout_secs: u64,
    pub token_ttl_hours: i64,
    pub card_decline_rate: f64,
    pub card_delay_ms: u64,
    pub instant_delay_ms: u64,
    pub pix_discount_percent: u32,
    pub merchant_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            card_decline_rate: DEFAULT_CARD_DECLINE_RATE,
            card_delay_ms: DEFAULT_CARD_DELAY_MS,
            instant_delay_ms: DEFAULT_INSTANT_DELAY_MS,
            pix_discount_percent: DEFAULT_PIX_DISCOUNT_PERCENT,
            merchant_name: DEFAULT_MERCHANT_NAME.to_string(),
        }
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILENAME);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

impl Config {
    /// Settings file plus `BIGBURGER_API_URL` / `BIGBURGER_BACKEND` overrides
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Ok(backend) = std::env::var(BACKEND_ENV) {
            if !backend.trim().is_empty() {
                config.backend = backend.parse()?;
            }
        }

        Ok(config)
    }

    /// Settings file only, no environment overrides
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;
        let defaults = Self::default();

        Ok(Self {
            backend: raw.store.backend.unwrap_or(defaults.backend),
            base_url: raw.store.base_url.unwrap_or(defaults.base_url),
            timeout_secs: raw.store.timeout_secs.unwrap_or(defaults.timeout_secs),
            token_ttl_hours: raw
                .auth
                .token_ttl_hours
                .unwrap_or(defaults.token_ttl_hours)
                .clamp(1, MAX_TOKEN_TTL_HOURS),
            card_decline_rate: raw
                .checkout
                .card_decline_rate
                .unwrap_or(defaults.card_decline_rate)
                .clamp(0.0, 1.0),
            card_delay_ms: raw.checkout.card_delay_ms.unwrap_or(defaults.card_delay_ms),
            instant_delay_ms: raw.checkout.instant_delay_ms.unwrap_or(defaults.instant_delay_ms),
            pix_discount_percent: raw
                .checkout
                .pix_discount_percent
                .unwrap_or(defaults.pix_discount_percent)
                .min(100),
            merchant_name: raw.checkout.merchant_name.unwrap_or(defaults.merchant_name),
        })
    }

    /// Save config to the data directory, preserving unmanaged settings
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let mut settings = read_settings(data_dir)?;

        settings.store.backend = Some(self.backend);
        settings.store.base_url = Some(self.base_url.clone());
        settings.store.timeout_secs = Some(self.timeout_secs);
        settings.auth.token_ttl_hours = Some(self.token_ttl_hours);
        settings.checkout.card_decline_rate = Some(self.card_decline_rate);
        settings.checkout.card_delay_ms = Some(self.card_delay_ms);
        settings.checkout.instant_delay_ms = Some(self.instant_delay_ms);
        settings.checkout.pix_discount_percent = Some(self.pix_discount_percent);
        settings.checkout.merchant_name = Some(self.merchant_name.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join(SETTINGS_FILENAME), content)?;
        Ok(())
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        let hours = self.token_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS);
        chrono::Duration::try_hours(hours)
            .unwrap_or_else(|| chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            card_decline_rate: self.card_decline_rate,
            card_delay: Duration::from_millis(self.card_delay_ms),
            instant_delay: Duration::from_millis(self.instant_delay_ms),
            pix_discount_percent: self.pix_discount_percent,
            merchant_name: self.merchant_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.backend, StoreBackend::Http);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{"store": {"backend": "local"}, "checkout": {"cardDeclineRate": 3.0}}"#,
        )
        .unwrap();
        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.backend, StoreBackend::Local);
        assert_eq!(config.card_decline_rate, 1.0);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{"theme": "dark", "store": {"proxy": "none"}}"#,
        )
        .unwrap();

        let mut config = Config::load_file(dir.path()).unwrap();
        config.base_url = "http://api.example.com".to_string();
        config.save(dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(SETTINGS_FILENAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["store"]["proxy"], "none");
        assert_eq!(value["store"]["baseUrl"], "http://api.example.com");

        let reloaded = Config::load_file(dir.path()).unwrap();
        assert_eq!(reloaded.base_url, "http://api.example.com");
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("LOCAL".parse::<StoreBackend>().unwrap(), StoreBackend::Local);
        assert_eq!("mem".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("ftp".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_checkout_settings_conversion() {
        let config = Config {
            card_delay_ms: 0,
            instant_delay_ms: 10,
            ..Config::default()
        };
        let settings = config.checkout_settings();
        assert_eq!(settings.card_delay, Duration::ZERO);
        assert_eq!(settings.instant_delay, Duration::from_millis(10));
        assert_eq!(settings.pix_discount_percent, 5);
    }

    #[test]
    fn test_token_ttl_out_of_range_is_clamped() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{"store": {"backend": "memory"}, "auth": {"tokenTtlHours": 9000000000000000}}"#,
        )
        .unwrap();
        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.token_ttl_hours, MAX_TOKEN_TTL_HOURS);
        assert_eq!(config.token_ttl(), chrono::Duration::hours(MAX_TOKEN_TTL_HOURS));

        std::fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{"auth": {"tokenTtlHours": -5}}"#,
        )
        .unwrap();
        assert_eq!(Config::load_file(dir.path()).unwrap().token_ttl_hours, 1);

        // built in code, bypassing load_file
        let config = Config {
            token_ttl_hours: i64::MAX,
            ..Config::default()
        };
        assert_eq!(config.token_ttl(), chrono::Duration::hours(MAX_TOKEN_TTL_HOURS));
    }
}
