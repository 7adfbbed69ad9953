//! Provider abstraction for fetching Bitcoin quotes from external APIs

use crate::{
    error::FetchError,
    types::{Currency, Quote},
};
use async_trait::async_trait;

/// Trait for quote providers
///
/// The refresh controller only talks to this trait, so any HTTP API that can
/// price Bitcoin in the supported currencies can sit behind it.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the current Bitcoin quote in the given currency
    ///
    /// # Arguments
    /// * `currency` - Currency the quote should be denominated in
    /// * `credential` - API key sent with the request
    ///
    /// # Returns
    /// The quote, or an error if the credential is missing or the fetch fails
    async fn fetch_quote(&self, currency: Currency, credential: &str)
        -> Result<Quote, FetchError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}
