//! Constants for the Bitcoin ticker
//!
//! Defaults live here. `TickerConfig::from_env` can override the endpoint,
//! the refresh interval and the initial currency at startup.

use crate::types::Currency;

/// How often the controller re-fetches the quote (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// HTTP request timeout when fetching a quote (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// APIVerve Bitcoin price endpoint
pub const API_URL: &str = "https://api.apiverve.com/v1/bitcoin";

/// Header carrying the API credential
pub const API_KEY_HEADER: &str = "x-api-key";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "APIVERVE_API_KEY";

/// Environment variable overriding the endpoint URL
pub const API_URL_ENV: &str = "BTC_TICKER_API_URL";

/// Environment variable overriding the refresh interval (seconds)
pub const REFRESH_SECS_ENV: &str = "BTC_TICKER_REFRESH_SECS";

/// Environment variable selecting the initial currency
pub const CURRENCY_ENV: &str = "BTC_TICKER_CURRENCY";

/// Value of the response `status` field on success
pub const STATUS_OK: &str = "ok";

/// Shown when the API reports a failure without a message
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to fetch data";

/// Shown for network and parse failures
pub const TRANSPORT_ERROR_MESSAGE: &str = "Failed to fetch Bitcoin price";

/// Currency selected when nothing else is configured
pub const DEFAULT_CURRENCY: Currency = Currency::USD;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "btc-ticker/0.1.0";
