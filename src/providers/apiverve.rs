//! APIVerve Bitcoin quote provider implementation

use crate::{
    constants::{
        API_KEY_HEADER, API_URL, DEFAULT_ERROR_MESSAGE, REQUEST_TIMEOUT_SECS, STATUS_OK,
        USER_AGENT,
    },
    error::FetchError,
    provider::QuoteProvider,
    types::{Currency, Quote},
};
use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::Deserialize;
use std::time::Duration;

/// APIVerve response envelope
///
/// `data` is kept raw so a missing or malformed payload surfaces as a parse
/// error only when the status says the call succeeded.
#[derive(Debug, Deserialize)]
struct ApiVerveResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the APIVerve Bitcoin endpoint
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    /// Creates a client for the public APIVerve endpoint
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(API_URL)
    }

    /// Creates a client for a custom endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Endpoint this client sends requests to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the GET request for a currency without sending it
    pub fn build_request(
        &self,
        currency: Currency,
        credential: &str,
    ) -> Result<Request, FetchError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("currency", currency.code())])
            .header(API_KEY_HEADER, credential)
            .build()?;

        Ok(request)
    }

    /// Parses a response body into a quote
    pub fn parse_response(body: &str) -> Result<Quote, FetchError> {
        let envelope: ApiVerveResponse = serde_json::from_str(body)?;

        if envelope.status.as_deref() != Some(STATUS_OK) {
            let message = envelope
                .error
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            return Err(FetchError::ApiError(message));
        }

        let data = envelope
            .data
            .ok_or_else(|| FetchError::transport("Response is missing the data payload"))?;

        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl QuoteProvider for QuoteClient {
    async fn fetch_quote(
        &self,
        currency: Currency,
        credential: &str,
    ) -> Result<Quote, FetchError> {
        if credential.trim().is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let request = self.build_request(currency, credential)?;
        tracing::debug!(url = %request.url(), "Fetching Bitcoin quote");

        let response = self.client.execute(request).await?;
        let http_status = response.status();
        let body = response.text().await?;

        // The body carries the API's own status even on non-2xx responses
        let quote = Self::parse_response(&body).inspect_err(|e| {
            tracing::debug!(
                http_status = http_status.as_u16(),
                error = %e,
                "Quote response rejected"
            );
        })?;

        tracing::debug!(
            currency = currency.code(),
            price = quote.price,
            "Successfully fetched quote"
        );

        Ok(quote)
    }

    fn provider_name(&self) -> &'static str {
        "apiverve"
    }
}
