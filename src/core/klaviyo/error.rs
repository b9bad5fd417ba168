//! Klaviyo client error types.

use thiserror::Error;

/// Result type for Klaviyo API operations.
pub type KlaviyoResult<T> = Result<T, KlaviyoError>;

/// Errors returned by the Klaviyo API client.
///
/// Callers distinguish an upstream rejection ([`KlaviyoError::Api`]) from an
/// unreachable upstream ([`KlaviyoError::NoResponse`]); every other variant is
/// a local failure that happened before or while building the request.
#[derive(Debug, Error)]
pub enum KlaviyoError {
    /// No API key is configured.
    #[error(
        "Klaviyo API key is not set. Please set the KLAVIYO_API_KEY environment variable."
    )]
    MissingApiKey,

    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid Klaviyo API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The upstream answered with a non-2xx status.
    #[error("Klaviyo API Error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The request was sent but no response came back.
    #[error("Klaviyo API Request Error: No response received")]
    NoResponse,

    /// A request or query payload could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Any other HTTP client failure, propagated unchanged.
    #[error(transparent)]
    Http(reqwest::Error),
}

impl KlaviyoError {
    /// Create an upstream rejection error.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create an encoding error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// The upstream HTTP status, when the upstream answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for KlaviyoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for KlaviyoError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Self::Encode(err.to_string())
    }
}
