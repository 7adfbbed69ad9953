//! # Bitcoin Ticker
//!
//! Polls the APIVerve Bitcoin endpoint for a quote in a selectable currency
//! and keeps a render-ready view model up to date with periodic auto-refresh.
//!
//! ## Usage
//!
//! ```no_run
//! use btc_ticker::{Currency, RefreshController, TickerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads APIVERVE_API_KEY (and optional overrides) from the environment / .env
//! let config = TickerConfig::from_env()?;
//! let controller = RefreshController::from_config(&config)?;
//!
//! // Immediate fetch, then one refresh every 60 seconds
//! let handle = controller.start(Currency::USD).await;
//!
//! let view = controller.view();
//! if let Some(quote) = &view.quote {
//!     println!("BTC: {} {}", quote.price, quote.change);
//! } else if let Some(error) = &view.error {
//!     eprintln!("{}", error);
//! }
//!
//! // Switching currency fetches right away and restarts the 60s window
//! controller.set_currency(Currency::EUR).await;
//!
//! handle.cancel();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! View (renders ViewModel, forwards intents)
//!     ↓ start / set_currency / refresh / stop
//! RefreshController (timer, session state, request ids)
//!     ↓
//! QuoteProvider (QuoteClient → APIVerve over HTTP)
//!     ↓
//! format (currency strings, T/B/M abbreviations)
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures never escape the controller. They move the session into
//! [`Phase::Failed`] with a user-facing message while keeping the last good
//! quote visible:
//!
//! ```no_run
//! use btc_ticker::{Phase, RefreshController};
//!
//! # fn render(controller: &RefreshController) {
//! let view = controller.view();
//! match view.phase {
//!     Phase::Loading => println!("Loading..."),
//!     Phase::Ready => println!("Updated at {:?}", view.last_updated_label),
//!     Phase::Failed => eprintln!("{}", view.error.unwrap_or_default()),
//! }
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod format;
pub mod provider;
pub mod providers;
pub mod types;

// Re-export commonly used types
pub use config::TickerConfig;
pub use controller::{CancelHandle, RefreshController};
pub use error::{ConfigError, FetchError};
pub use provider::QuoteProvider;
pub use providers::QuoteClient;
pub use types::{Currency, Phase, Quote, QuoteView, SessionState, ViewModel};
