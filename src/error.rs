//! Error types for the tilia library.

use thiserror::Error;

/// Errors produced by tilia.
///
/// The search core itself treats negative outcomes (unknown document,
/// unknown term) as plain values, so errors only arise from
/// configuration-time validation.
#[derive(Error, Debug)]
pub enum TiliaError {
    /// Invalid analysis configuration, e.g. a malformed cleanup pattern.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// An invalid argument was provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TiliaError {
    /// Create an analysis error.
    pub fn analysis(msg: impl Into<String>) -> Self {
        TiliaError::Analysis(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TiliaError::InvalidArgument(msg.into())
    }
}

/// Result type used throughout tilia.
pub type Result<T> = std::result::Result<T, TiliaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TiliaError::analysis("bad pattern");
        assert_eq!(err.to_string(), "analysis error: bad pattern");

        let err = TiliaError::invalid_argument("n must be positive");
        assert_eq!(err.to_string(), "invalid argument: n must be positive");
    }
}
