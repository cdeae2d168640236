//! Error type shared by the transport and repository layers.

use thiserror::Error;

/// Failure of a single backend call.
///
/// Every variant renders to the user-facing message a screen displays
/// verbatim; status codes ride along where the backend produced one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status. `message` is the decoded
    /// error-envelope message, or the generic fallback when the body had none.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The request never produced a response (connect, timeout, TLS).
    #[error("{0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The user-facing message (same text as `Display`).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Generic message for non-2xx responses without a decodable envelope.
    pub fn fallback_message(status: u16) -> String {
        format!("Request failed with status {}", status)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
