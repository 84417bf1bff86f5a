//! Error types for the fetch helper.
//!
//! # Design
//! Every failure collapses into a single caller-facing message: `Display`
//! prints exactly that message and nothing else, so the non-throwing call
//! surface can store it as a plain string. The variants only record where the
//! message came from.

use thiserror::Error;

/// Fallback message for a failed response whose body has no usable `message`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Fallback message for a transport failure that carries no text.
pub const FETCH_FAILED: &str = "An error occurred while fetching data";

/// Errors produced by a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request could not complete.
    #[error("{0}")]
    Network(String),

    /// The response body was not valid JSON, or not the requested shape.
    #[error("{0}")]
    Parse(String),

    /// The request body could not be encoded as JSON.
    #[error("{0}")]
    Serialize(String),
}

impl FetchError {
    /// Status code of an HTTP-level failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, FetchError::Http { .. })
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        if err.0.is_empty() {
            FetchError::Network(FETCH_FAILED.to_string())
        } else {
            FetchError::Network(err.0)
        }
    }
}

/// Failure reported by a `Transport` when no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}
