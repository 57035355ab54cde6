//! Analysis entry point.
//!
//! [`Analyzer`] owns the knowledge base, the resolved options, the cue
//! vocabularies and the result cache, and runs the full pipeline:
//! tokenize, scan markers, aggregate patterns, infer drivers, profile
//! temporal shifts, detect conflicts, calibrate confidence.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::debug;
use mindsift_lexicon::KnowledgeBase;

use crate::aggregate;
use crate::cache::{self, CacheStats, ResultCache};
use crate::config::AnalyzerOptions;
use crate::confidence;
use crate::conflict;
use crate::driver;
use crate::error::{AnalyzerError, Result};
use crate::marker;
use crate::modifier::ModifierCues;
use crate::negation::NegationCues;
use crate::temporal;
use crate::token;
use crate::types::{AnalysisResult, Metadata};

/// Psychological marker analyzer.
///
/// Construction validates the options once; [`Analyzer::analyze`] can then
/// be called any number of times, from multiple threads behind a shared
/// reference.
#[derive(Debug)]
pub struct Analyzer {
    knowledge: Arc<KnowledgeBase>,
    options: AnalyzerOptions,
    negation_cues: NegationCues,
    modifier_cues: ModifierCues,
    cache: Mutex<ResultCache>,
}

impl Analyzer {
    /// Create an analyzer over an explicit knowledge base.
    pub fn new(knowledge: Arc<KnowledgeBase>, options: AnalyzerOptions) -> Result<Self> {
        options.validate().map_err(AnalyzerError::invalid_options)?;
        let cache = Mutex::new(ResultCache::new(options.cache_capacity));
        Ok(Self {
            knowledge,
            options,
            negation_cues: NegationCues::default(),
            modifier_cues: ModifierCues::default(),
            cache,
        })
    }

    /// Create an analyzer over the bundled knowledge tables.
    pub fn with_default_knowledge(options: AnalyzerOptions) -> Result<Self> {
        Self::new(KnowledgeBase::shared(), options)
    }

    /// Replace the cue vocabularies.
    #[must_use]
    pub fn with_cues(mut self, negation: NegationCues, modifier: ModifierCues) -> Self {
        self.negation_cues = negation;
        self.modifier_cues = modifier;
        self
    }

    #[must_use]
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Analyze one text.
    ///
    /// Validates length bounds, consults the cache when enabled, and runs
    /// the pipeline on a miss. A cached result is returned exactly as it
    /// was stored, including its original duration.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        self.validate_input(text)?;
        let key = cache::cache_key(text, &self.options)?;

        if self.options.use_cache {
            let mut cache = self.cache.lock().expect("cache mutex poisoned");
            if let Some(result) = cache.get(&key) {
                debug!("cache hit for {}", &key[..12]);
                return Ok(result);
            }
        }

        let result = self.run_pipeline(text, key.clone());

        if self.options.use_cache {
            self.cache
                .lock()
                .expect("cache mutex poisoned")
                .insert(key, result.clone());
        }
        Ok(result)
    }

    /// Analyze a batch sequentially.
    ///
    /// Failures are isolated per item; one invalid text never aborts the
    /// rest of the batch.
    pub fn analyze_batch(&self, texts: &[String]) -> Vec<Result<AnalysisResult>> {
        let results: Vec<Result<AnalysisResult>> =
            texts.iter().map(|text| self.analyze(text)).collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        debug!("batch of {} analyzed, {} failed", results.len(), failed);
        results
    }

    /// Current cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().expect("cache mutex poisoned").stats()
    }

    fn validate_input(&self, text: &str) -> Result<()> {
        let length = text.trim().chars().count();
        if length < self.options.min_text_chars {
            return Err(AnalyzerError::too_short(length, self.options.min_text_chars));
        }
        if length > self.options.max_text_chars {
            return Err(AnalyzerError::too_long(length, self.options.max_text_chars));
        }
        Ok(())
    }

    fn run_pipeline(&self, text: &str, cache_key: String) -> AnalysisResult {
        let started = Instant::now();

        let tokens = token::tokenize(text, self.options.annotate_sentences);
        let hits = marker::scan_markers(
            &tokens,
            &self.knowledge,
            &self.options,
            &self.negation_cues,
            &self.modifier_cues,
        );
        let patterns = aggregate::aggregate(&hits, tokens.len(), &self.knowledge);
        let drivers = driver::infer_drivers(&patterns, &self.knowledge);
        let temporal = temporal::analyze_shifts(&hits);
        let conflicts = conflict::detect_conflicts(&hits, &patterns, &drivers, &temporal, &self.knowledge);
        let coherence = conflict::coherence(&conflicts);
        let confidence = confidence::composite(&patterns, &drivers, &conflicts, coherence);

        let word_count = tokens.iter().filter(|t| !t.punctuation).count();
        let marker_count = hits.len();
        let average_confidence =
            confidence::mean(patterns.values().map(|p| p.confidence)).unwrap_or(0.0);
        let density = if word_count == 0 {
            0.0
        } else {
            marker_count as f64 / word_count as f64
        };

        debug!(
            "analyzed {} words into {} hits, {} patterns, {} conflicts",
            word_count,
            marker_count,
            patterns.len(),
            conflicts.len()
        );

        AnalysisResult {
            hits,
            patterns,
            drivers,
            conflicts,
            temporal,
            coherence,
            confidence,
            metadata: Metadata {
                word_count,
                marker_count,
                density,
                average_confidence,
                duration_ms: started.elapsed().as_millis() as u64,
                cache_key,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyzer(options: AnalyzerOptions) -> Analyzer {
        Analyzer::with_default_knowledge(options).unwrap()
    }

    #[test]
    fn test_rejects_short_and_long_input() {
        let analyzer = analyzer(AnalyzerOptions::default());

        let short = analyzer.analyze("tiny").unwrap_err();
        assert_eq!(short.kind(), "text_too_short");

        let long = "word ".repeat(4000);
        let err = analyzer.analyze(&long).unwrap_err();
        assert_eq!(err.kind(), "text_too_long");
    }

    #[test]
    fn test_trims_before_length_check() {
        let analyzer = analyzer(AnalyzerOptions::default());
        let err = analyzer.analyze("   abc    \n").unwrap_err();
        match err {
            AnalyzerError::TextTooShort { length, .. } => assert_eq!(length, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_options_rejected_at_construction() {
        let options = AnalyzerOptions {
            context_window: 0,
            ..AnalyzerOptions::default()
        };
        let err = Analyzer::with_default_knowledge(options).unwrap_err();
        assert_eq!(err.kind(), "invalid_options");
    }

    #[test]
    fn test_cache_returns_stored_result() {
        let analyzer = analyzer(AnalyzerOptions::default());
        let text = "i always mess this up and i never learn from it";

        let first = analyzer.analyze(text).unwrap();
        let second = analyzer.analyze(text).unwrap();

        // the cached clone is identical, duration included
        assert_eq!(first, second);

        let stats = analyzer.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_uncached_runs_are_deterministic() {
        let analyzer = analyzer(AnalyzerOptions::uncached());
        let text = "i always mess this up and i never learn from it";

        let first = analyzer.analyze(text).unwrap();
        let second = analyzer.analyze(text).unwrap();

        assert_eq!(first.hits, second.hits);
        assert_eq!(first.patterns, second.patterns);
        assert_eq!(first.drivers, second.drivers);
        assert_eq!(first.conflicts, second.conflicts);
        assert_eq!(first.coherence, second.coherence);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(analyzer.cache_stats().entries, 0);
    }

    #[test]
    fn test_degenerate_text_yields_empty_result() {
        let analyzer = analyzer(AnalyzerOptions::default());
        let result = analyzer.analyze("the quick brown fox jumps over the lazy dog").unwrap();

        assert!(result.hits.is_empty());
        assert!(result.patterns.is_empty());
        assert!(result.drivers.is_empty());
        assert!(result.conflicts.is_empty());
        assert_eq!(result.coherence, 0.9);
        assert_eq!(result.metadata.marker_count, 0);
        assert_eq!(result.metadata.word_count, 9);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let analyzer = analyzer(AnalyzerOptions::default());
        let texts = vec![
            "i always mess this up and i never learn".to_string(),
            "nope".to_string(),
            "maybe things could possibly get better around here".to_string(),
        ];

        let results = analyzer.analyze_batch(&texts);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_metadata_density_and_key() {
        let analyzer = analyzer(AnalyzerOptions::default());
        let result = analyzer
            .analyze("i always fail at this, i should know better")
            .unwrap();

        assert_eq!(result.metadata.cache_key.len(), 64);
        assert!(result.metadata.marker_count >= 2);
        let expected = result.metadata.marker_count as f64 / result.metadata.word_count as f64;
        assert!((result.metadata.density - expected).abs() < 1e-9);
    }
}
