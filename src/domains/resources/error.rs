//! Resource-specific error types.

use thiserror::Error;

/// Errors from reading a resource.
///
/// Documentation pages are static, so the only failure is a URI no
/// registered template resolves.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No template covers the requested URI.
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl ResourceError {
    /// Create a "not found" error for `uri`.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }
}
