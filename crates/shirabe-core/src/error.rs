use thiserror::Error;

/// Errors that can occur during Shirabe core operations.
#[derive(Debug, Error)]
pub enum ShirabeError {
    /// The input string is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for Shirabe core operations.
pub type Result<T> = std::result::Result<T, ShirabeError>;
