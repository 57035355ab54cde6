use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur during text analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Input shorter than the configured minimum
    #[error("Text too short: {length} characters (minimum {min})")]
    TextTooShort { length: usize, min: usize },

    /// Input longer than the configured maximum
    #[error("Text too long: {length} characters (maximum {max})")]
    TextTooLong { length: usize, max: usize },

    /// Invalid analyzer configuration
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Serialization failure while deriving a cache key
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Create a too-short input error
    pub const fn too_short(length: usize, min: usize) -> Self {
        Self::TextTooShort { length, min }
    }

    /// Create a too-long input error
    pub const fn too_long(length: usize, max: usize) -> Self {
        Self::TextTooLong { length, max }
    }

    /// Create an invalid options error
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }

    /// Stable machine-readable error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TextTooShort { .. } => "text_too_short",
            Self::TextTooLong { .. } => "text_too_long",
            Self::InvalidOptions(_) => "invalid_options",
            Self::Serialization(_) => "serialization",
        }
    }
}
