use thiserror::Error;

/// Result type for lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors raised while assembling a knowledge base
#[derive(Error, Debug)]
pub enum LexiconError {
    /// Two entries share the same normalized word
    #[error("Duplicate lexicon word: {0}")]
    DuplicateWord(String),

    /// Two pattern definitions share the same id
    #[error("Duplicate pattern id: {0}")]
    DuplicatePattern(String),

    /// Two driver definitions share the same id
    #[error("Duplicate driver id: {0}")]
    DuplicateDriver(String),

    /// A marker weight must be a positive, finite number
    #[error("Invalid weight {weight} for word '{word}'")]
    InvalidWeight { word: String, weight: f64 },

    /// Emotional valence must lie in [-1, 1]
    #[error("Invalid valence {valence} for word '{word}'")]
    InvalidValence { word: String, valence: f64 },

    /// An entry declared `context_required` without any context rules
    #[error("Word '{0}' requires context but declares no context rules")]
    MissingContextRules(String),
}

impl LexiconError {
    /// Create an invalid-weight error
    pub fn invalid_weight(word: impl Into<String>, weight: f64) -> Self {
        Self::InvalidWeight {
            word: word.into(),
            weight,
        }
    }

    /// Create an invalid-valence error
    pub fn invalid_valence(word: impl Into<String>, valence: f64) -> Self {
        Self::InvalidValence {
            word: word.into(),
            valence,
        }
    }
}
