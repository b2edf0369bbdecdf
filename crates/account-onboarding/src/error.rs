//! Flow errors.

use account_client::ApiError;
use thiserror::Error;

/// Why a flow attempt did not succeed.
///
/// Each variant carries the single message a UI should show.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Input failed a field check; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The server answered and refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The call itself failed (transport, decoding, configuration).
    #[error("{0}")]
    Api(String),

    #[error("A request is already in progress")]
    Busy,
}

impl FlowError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ApiError> for FlowError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::ServerRejected(message) => FlowError::Rejected(message),
            other => FlowError::Api(other.to_string()),
        }
    }
}

/// Result type alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;
