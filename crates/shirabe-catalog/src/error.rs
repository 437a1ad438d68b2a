use thiserror::Error;

/// Errors from a metadata catalog call.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    /// `true` when the failure was a request timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
