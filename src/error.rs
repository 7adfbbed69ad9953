//! Error types for the Bitcoin ticker

use crate::constants::{API_KEY_ENV, TRANSPORT_ERROR_MESSAGE};
use thiserror::Error;

/// Errors that can occur when fetching a quote
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// No API credential was configured
    #[error("Missing API credential")]
    MissingCredential,

    /// Network failure, or a body that could not be parsed into a quote
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The API answered with a non-ok status
    #[error("API error: {0}")]
    ApiError(String),
}

impl FetchError {
    /// Creates a TransportError
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Creates an ApiError
    pub fn api(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            FetchError::MissingCredential => {
                format!("Add your API key to .env file ({}=your-key)", API_KEY_ENV)
            }
            FetchError::TransportError(_) => TRANSPORT_ERROR_MESSAGE.to_string(),
            FetchError::ApiError(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::TransportError(format!("Invalid response body: {}", err))
    }
}

/// Errors raised while reading configuration overrides
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Currency code outside the supported set
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// An override could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    /// Creates an InvalidValue error
    pub fn invalid(key: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            FetchError::MissingCredential.user_message(),
            "Add your API key to .env file (APIVERVE_API_KEY=your-key)"
        );
        assert_eq!(
            FetchError::transport("connection reset").user_message(),
            "Failed to fetch Bitcoin price"
        );
        assert_eq!(FetchError::api("rate limited").user_message(), "rate limited");
    }

    #[test]
    fn test_json_error_becomes_transport_error() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::TransportError(_)));
    }
}
