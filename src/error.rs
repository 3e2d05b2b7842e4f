//! Error taxonomy shared by the API layer and the session store.

use thiserror::Error;

/// Message shown to users when a request failed for reasons they cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing token (no status) or a 401/403 from the backend
    #[error("Unauthorized: {message}")]
    Unauthorized { status: Option<u16>, message: String },

    /// Any other non-2xx response, carrying the server's message when it sent one
    #[error("Request failed ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response whose body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Input rejected before any request was issued
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub(crate) fn missing_token() -> Self {
        ApiError::Unauthorized {
            status: None,
            message: "No authentication token".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// HTTP status associated with the error, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } => *status,
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text suitable for an inline error or toast.
    ///
    /// Business errors are surfaced verbatim; transport and decoding failures
    /// collapse to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Validation(message) => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Storage(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
