//! Result caching.
//!
//! Repeated analyses of the same text with the same options are served from
//! an in-memory FIFO cache. Keys hash the normalized text together with the
//! options that affect the outcome, so changing the context window or the
//! confidence floor never serves a stale result.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::AnalyzerOptions;
use crate::error::Result;
use crate::types::AnalysisResult;

/// Cache usage counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

/// Bounded FIFO cache of analysis results.
///
/// Eviction follows insertion order; a read does not refresh an entry's age.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<String, AnalysisResult>,
    order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a result, counting the access as a hit or miss.
    pub fn get(&mut self, key: &str) -> Option<AnalysisResult> {
        match self.entries.get(key) {
            Some(result) => {
                self.hits += 1;
                Some(result.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a result, evicting the oldest entries once full.
    pub fn insert(&mut self, key: String, result: AnalysisResult) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, result);
            return;
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, result);
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
            capacity: self.capacity,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Options that change the analysis outcome and therefore the key
#[derive(Serialize)]
struct KeyOptions {
    context_window: usize,
    temporal_segments: usize,
    min_confidence: f64,
}

/// Deterministic cache key: SHA-256 over the trimmed, lowercased text and
/// the serialized outcome-affecting options.
pub fn cache_key(text: &str, options: &AnalyzerOptions) -> Result<String> {
    let salt = serde_json::to_vec(&KeyOptions {
        context_window: options.context_window,
        temporal_segments: options.temporal_segments,
        min_confidence: options.min_confidence,
    })?;
    let mut hasher = Sha256::new();
    hasher.update(text.trim().to_lowercase().as_bytes());
    hasher.update(&salt);
    Ok(format!("{:x}", hasher.finalize()))
}
