//! Types for the Bitcoin ticker

use crate::{constants::DEFAULT_CURRENCY, error::ConfigError, format};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported quote currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Japanese Yen
    JPY,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
    /// Swiss Franc
    CHF,
    /// Chinese Yuan
    CNY,
}

impl Currency {
    /// Get the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::CHF => "CHF",
            Currency::CNY => "CNY",
        }
    }

    /// Get the symbol used when rendering amounts in an en-US locale
    ///
    /// Currencies without a dedicated symbol in that locale render with
    /// their code followed by a no-break space.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::CHF => "CHF\u{a0}",
            Currency::CNY => "CN¥",
        }
    }

    /// Get all supported currencies, in selector order
    pub fn all() -> &'static [Currency] {
        &[
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::JPY,
            Currency::CAD,
            Currency::AUD,
            Currency::CHF,
            Currency::CNY,
        ]
    }
}

impl Default for Currency {
    fn default() -> Self {
        DEFAULT_CURRENCY
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ConfigError::UnsupportedCurrency(code.to_string()))
    }
}

/// One snapshot of price and market statistics for a single currency
///
/// Values are taken verbatim from the provider. `low_24h <= price <= high_24h`
/// is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Spot price in the selected currency
    pub price: f64,

    /// 24h price change percentage
    #[serde(rename = "change24h")]
    pub change_24h: f64,

    /// Market capitalisation
    #[serde(rename = "marketCap")]
    pub market_cap: f64,

    /// 24h traded volume
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,

    /// 24h high
    #[serde(rename = "high24h")]
    pub high_24h: f64,

    /// 24h low
    #[serde(rename = "low24h")]
    pub low_24h: f64,
}

/// What the view should currently render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Ready,
    /// The last fetch failed
    Failed,
}

/// Mutable session state owned by the refresh controller
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub currency: Currency,
    pub phase: Phase,
    /// Last successful quote, kept across failed refreshes
    pub last_quote: Option<Quote>,
    /// Currency `last_quote` was fetched in
    pub quoted_in: Option<Currency>,
    /// Most recent error message, cleared on the next success
    pub last_error: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Initial state: loading, nothing fetched yet
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            phase: Phase::Loading,
            last_quote: None,
            quoted_in: None,
            last_error: None,
            last_updated_at: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// Display strings for a quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteView {
    pub price: String,
    pub change: String,
    /// True when the 24h change is zero or positive
    pub change_positive: bool,
    pub market_cap: String,
    pub volume_24h: String,
    pub high_24h: String,
    pub low_24h: String,
}

impl QuoteView {
    /// Formats a quote for the given currency
    pub fn new(quote: &Quote, currency: Currency) -> Self {
        Self {
            price: format::format_currency(quote.price, currency),
            change: format::format_change(quote.change_24h),
            change_positive: quote.change_24h >= 0.0,
            market_cap: format::format_compact(quote.market_cap),
            volume_24h: format::format_compact(quote.volume_24h),
            high_24h: format::format_currency(quote.high_24h, currency),
            low_24h: format::format_currency(quote.low_24h, currency),
        }
    }
}

/// View-facing output of the refresh controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub phase: Phase,
    pub currency: Currency,
    pub quote: Option<QuoteView>,
    pub error: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
    /// Local wall-clock rendering of `last_updated_at`
    pub last_updated_label: Option<String>,
}

impl From<&SessionState> for ViewModel {
    fn from(state: &SessionState) -> Self {
        // Render in the currency the quote was fetched for, which differs
        // from the selection while a currency switch is loading.
        let quote_currency = state.quoted_in.unwrap_or(state.currency);
        let quote = state
            .last_quote
            .as_ref()
            .map(|q| QuoteView::new(q, quote_currency));

        Self {
            phase: state.phase,
            currency: state.currency,
            quote,
            error: state.last_error.clone(),
            last_updated_at: state.last_updated_at,
            last_updated_label: state.last_updated_at.map(format::format_time),
        }
    }
}
