//! Shared error types for the scoring and verification core

use thiserror::Error;

/// Main error type for candidate-scoring operations
#[derive(Debug, Error)]
pub enum Error {
    /// Oracle content could not be read as structured data.
    ///
    /// This is the only hard failure of the scoring path: a corrupted payload
    /// must never be turned into a defaulted score.
    #[error("Unparseable oracle output during {stage}: {reason}")]
    OracleUnparseable {
        stage: &'static str,
        reason: String,
        /// Leading characters of the offending content, for diagnostics
        excerpt: String,
    },

    /// The oracle call itself failed (transport, timeout, cancellation)
    #[error("Oracle call failed: {0}")]
    Oracle(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

const EXCERPT_LEN: usize = 120;

impl Error {
    /// Create an unparseable-output error, keeping a short excerpt of the content
    pub fn unparseable(stage: &'static str, reason: impl Into<String>, content: &str) -> Self {
        Self::OracleUnparseable {
            stage,
            reason: reason.into(),
            excerpt: content.chars().take(EXCERPT_LEN).collect(),
        }
    }

    /// Create an oracle transport error
    pub fn oracle(message: impl Into<String>) -> Self {
        Self::Oracle(message.into())
    }

    /// Whether the error came from a corrupted oracle payload
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::OracleUnparseable { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_truncates_excerpt() {
        let content = "x".repeat(500);
        let err = Error::unparseable("response scoring", "not json", &content);
        match err {
            Error::OracleUnparseable { excerpt, stage, .. } => {
                assert_eq!(excerpt.len(), EXCERPT_LEN);
                assert_eq!(stage, "response scoring");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::oracle("connection reset");
        assert_eq!(err.to_string(), "Oracle call failed: connection reset");
        assert!(!err.is_unparseable());
    }
}
