//! Error types for the Fingrid open data client.

use thiserror::Error;

use crate::config::API_KEY_ENV;

/// Result type alias using the crate error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// A required request parameter was not supplied
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// No API key from the call nor from the environment
    #[error("no API key given and {var} is not set", var = API_KEY_ENV)]
    MissingCredential,

    /// The response body is not declared as JSON
    #[error("unexpected content type in response: {0}")]
    UnexpectedContentType(String),

    /// The API answered with something else than 200
    #[error("API request failed with status {0}")]
    ApiError(u16),

    /// Catalog has no dataset with that name
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    /// Transport failure, timeouts included
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse timestamp '{text}': {source}")]
    InvalidTimestamp {
        text: String,
        source: chrono::ParseError,
    },

    #[error("invalid observation value: {0}")]
    InvalidValue(String),

    #[error("failed to build data frame: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Environment variables could not be deserialized
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_timestamp(text: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::InvalidTimestamp {
            text: text.into(),
            source,
        }
    }

    /// Whether the failure happened before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingParameter(_) | Self::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = Error::MissingParameter("dataset id");
        assert_eq!(err.to_string(), "missing required parameter: dataset id");
        assert!(err.is_precondition());
    }

    #[test]
    fn test_missing_credential_names_env_var() {
        let err = Error::MissingCredential;
        assert!(err.to_string().contains("FINGRID_API_KEY"));
    }

    #[test]
    fn test_response_errors_carry_details() {
        assert_eq!(
            Error::ApiError(404).to_string(),
            "API request failed with status 404"
        );
        assert_eq!(
            Error::UnexpectedContentType("text/html".to_string()).to_string(),
            "unexpected content type in response: text/html"
        );
        assert!(!Error::ApiError(500).is_precondition());
    }

    #[test]
    fn test_invalid_timestamp() {
        let source = chrono::DateTime::parse_from_rfc3339("yesterday").unwrap_err();
        let err = Error::invalid_timestamp("yesterday", source);
        assert!(err.to_string().starts_with("failed to parse timestamp 'yesterday'"));
    }
}
