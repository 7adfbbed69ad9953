//! Runtime configuration for the ticker
//!
//! Defaults come from `constants`. The API credential and a few overrides are
//! read from the environment, with a `.env` file in the working directory
//! loaded first when present.

use crate::{
    constants::{
        API_KEY_ENV, API_URL, API_URL_ENV, CURRENCY_ENV, REFRESH_INTERVAL_SECS, REFRESH_SECS_ENV,
    },
    error::ConfigError,
    types::Currency,
};
use std::time::Duration;

/// Ticker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TickerConfig {
    /// API credential; `None` surfaces as a missing-credential error on fetch
    pub api_key: Option<String>,
    /// Quote endpoint
    pub base_url: String,
    /// Period of the recurring refresh timer
    pub refresh_interval: Duration,
    /// Currency selected at startup
    pub initial_currency: Currency,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: API_URL.to_string(),
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            initial_currency: Currency::default(),
        }
    }
}

impl TickerConfig {
    /// Loads `.env` (if any) and reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env file");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self {
            api_key: get(API_KEY_ENV),
            ..Self::default()
        };

        if let Some(url) = get(API_URL_ENV) {
            config.base_url = url;
        }

        if let Some(raw) = get(REFRESH_SECS_ENV) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::invalid(REFRESH_SECS_ENV, raw.as_str()))?;
            config.refresh_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = get(CURRENCY_ENV) {
            config.initial_currency = raw.parse()?;
        }

        Ok(config)
    }

    /// Credential to send, empty when none is configured
    pub fn credential(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
