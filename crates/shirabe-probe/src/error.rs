use thiserror::Error;

/// Errors from locating, fetching or inspecting a video sample.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// The handle could not be turned into a download URL.
    #[error("cannot locate file {handle}: {reason}")]
    Locate { handle: String, reason: String },

    #[error("empty sample")]
    EmptySample,

    #[error("unsupported container")]
    UnsupportedContainer,
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
