use serde::{Deserialize, Serialize};

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// Tokens of context inspected on each side of a marker
    pub context_window: usize,

    /// Number of equal-length temporal segments the document is split into
    pub temporal_segments: usize,

    /// Minimum adjusted weight a detection must exceed to become a hit
    pub min_confidence: f64,

    /// Reuse cached results for repeated text/options pairs
    pub use_cache: bool,

    /// Maximum cached results before FIFO eviction
    pub cache_capacity: usize,

    /// Minimum accepted input length in characters (after trimming)
    pub min_text_chars: usize,

    /// Maximum accepted input length in characters (after trimming)
    pub max_text_chars: usize,

    /// Annotate tokens with sentence index and in-sentence position
    pub annotate_sentences: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            context_window: 5,
            temporal_segments: 3,
            min_confidence: 0.3,
            use_cache: true,
            cache_capacity: 100,
            min_text_chars: 10,
            max_text_chars: 10_000,
            annotate_sentences: true,
        }
    }
}

impl AnalyzerOptions {
    /// Create options with caching disabled (deterministic replay, benchmarks)
    pub fn uncached() -> Self {
        Self {
            use_cache: false,
            ..Default::default()
        }
    }

    /// Create options tuned for long-form journals (wider context, finer
    /// temporal binning)
    pub fn long_form() -> Self {
        Self {
            context_window: 8,
            temporal_segments: 5,
            max_text_chars: 50_000,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.context_window == 0 {
            return Err("context_window must be > 0".to_string());
        }

        if self.temporal_segments == 0 {
            return Err("temporal_segments must be > 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence ({}) must lie in [0, 1]",
                self.min_confidence
            ));
        }

        if self.cache_capacity == 0 {
            return Err("cache_capacity must be > 0".to_string());
        }

        if self.min_text_chars == 0 {
            return Err("min_text_chars must be > 0".to_string());
        }

        if self.min_text_chars > self.max_text_chars {
            return Err(format!(
                "min_text_chars ({}) cannot exceed max_text_chars ({})",
                self.min_text_chars, self.max_text_chars
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        let options = AnalyzerOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.context_window, 5);
        assert_eq!(options.temporal_segments, 3);
        assert_eq!(options.min_confidence, 0.3);
    }

    #[test]
    fn test_preset_options_valid() {
        assert!(AnalyzerOptions::uncached().validate().is_ok());
        assert!(AnalyzerOptions::long_form().validate().is_ok());
        assert!(!AnalyzerOptions::uncached().use_cache);
    }

    #[test]
    fn test_options_validation() {
        let mut options = AnalyzerOptions::default();

        options.context_window = 0;
        assert!(options.validate().is_err());

        options.context_window = 5;
        options.min_confidence = 1.5;
        assert!(options.validate().is_err());

        options.min_confidence = 0.3;
        options.min_text_chars = 500;
        options.max_text_chars = 100;
        assert!(options.validate().is_err());

        options.min_text_chars = 10;
        options.max_text_chars = 10_000;
        assert!(options.validate().is_ok());
    }
}
