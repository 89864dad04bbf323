//! Client-side error taxonomy for API calls.

use thiserror::Error;

use crate::envelope::{try_envelope_message, Envelope};

/// Everything that can go wrong between issuing a request and holding its data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response was received. Carries the transport's own message.
    #[error("network error: {0}")]
    Transport(String),
    /// The fixed request timeout elapsed before a response arrived.
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    /// The server answered `success: false`, or failed without an envelope.
    #[error("{}", .0.message)]
    Rejected(Envelope),
    /// A non-2xx response whose body is not an envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The envelope's `data` did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short message suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(envelope) => envelope.message.clone(),
            ApiError::Http { status, body } => {
                try_envelope_message(body).unwrap_or_else(|| format!("HTTP {status}"))
            }
            other => other.to_string(),
        }
    }

    /// Application-level error code, when the server supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(envelope) if !envelope.code.is_empty() => Some(&envelope.code),
            _ => None,
        }
    }
}
