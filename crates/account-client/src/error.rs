//! Account API client errors.

use thiserror::Error;

/// Every failure the account API client can report.
///
/// Display strings are what end users see, so they stay short and
/// free of transport jargon where possible.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid URL")]
    InvalidEndpoint,

    #[error("No data received")]
    NoResponseBody,

    #[error("Decoding error: {0}")]
    DecodeFailure(String),

    #[error("Network error: {0}")]
    TransportFailure(String),

    #[error("{0}")]
    ServerRejected(String),

    #[error("Unknown error occurred")]
    Unknown,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::InvalidEndpoint
        } else if e.is_decode() {
            ApiError::DecodeFailure(e.to_string())
        } else if e.is_timeout()
            || e.is_connect()
            || e.is_request()
            || e.is_body()
            || e.is_redirect()
        {
            ApiError::TransportFailure(e.to_string())
        } else {
            ApiError::Unknown
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::DecodeFailure(e.to_string())
    }
}
