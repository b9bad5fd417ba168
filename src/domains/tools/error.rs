//! Tool-specific error types.

use thiserror::Error;

use crate::core::klaviyo::KlaviyoError;

/// Errors that can occur during tool operations.
///
/// Every variant is rendered into an error envelope by
/// [`invoke`](super::invoke); none of them escapes as a protocol fault.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments failed to decode or failed a cross-field check.
    #[error("{0}")]
    InvalidArguments(String),

    /// The Klaviyo client failed (missing key, upstream rejection, no response).
    #[error(transparent)]
    Api(#[from] KlaviyoError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = ToolError::from(KlaviyoError::NoResponse);
        assert_eq!(
            err.to_string(),
            "Klaviyo API Request Error: No response received"
        );

        let err = ToolError::from(KlaviyoError::api(400, "{\"errors\":[]}"));
        assert_eq!(err.to_string(), "Klaviyo API Error: 400 - {\"errors\":[]}");
    }

    #[test]
    fn test_invalid_arguments_is_bare_message() {
        let err = ToolError::invalid_arguments("missing field `list_id`");
        assert_eq!(err.to_string(), "missing field `list_id`");
    }
}
