//! # Mindsift Analyzer
//!
//! Deterministic psychological-marker analysis over free text. No models,
//! no network calls: a fixed lexicon, explicit scoring rules and outputs
//! that are reproducible for the same input and options.
//!
//! The pipeline runs in fixed stages:
//!
//! ```text
//! text -> tokenize -> scan markers -> aggregate patterns -> infer drivers
//!                       |                                        |
//!                  negation and                            conflicts and
//!                modifier context                         temporal shifts
//! ```
//!
//! Each retained marker carries its context: negation state, intensity
//! modifiers, temporal segment and the rule that admitted it. Aggregation
//! folds markers into pattern scores, drivers explain which underlying need
//! the patterns feed, and conflict detection surfaces tensions between all
//! of the above.
//!
//! ## Example
//!
//! ```
//! use mindsift_analyzer::{Analyzer, AnalyzerOptions};
//!
//! # fn main() -> mindsift_analyzer::Result<()> {
//! let analyzer = Analyzer::with_default_knowledge(AnalyzerOptions::default())?;
//! let result = analyzer.analyze("i always mess things up and nothing ever works")?;
//!
//! assert!(result.patterns.contains_key("absolutist"));
//! assert!(result.metadata.marker_count >= 2);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod analyzer;
mod cache;
mod config;
mod confidence;
mod conflict;
mod context;
mod driver;
mod error;
mod marker;
mod modifier;
mod negation;
mod temporal;
mod token;
mod types;

pub use analyzer::Analyzer;
pub use cache::CacheStats;
pub use config::AnalyzerOptions;
pub use confidence::{CONFIDENCE_CEIL, CONFIDENCE_FLOOR};
pub use error::{AnalyzerError, Result};
pub use modifier::{ModifierCues, Modifiers};
pub use negation::{Negation, NegationCues, NegationKind};
pub use token::{tokenize, Token};
pub use types::{
    AnalysisResult, ArcShape, Cluster, Conflict, ConflictItem, ConflictKind, DriverContribution,
    DriverScore, Hit, Metadata, PatternScore, PatternShift, Segment, SegmentCounts,
    SegmentWeights, ShiftDirection, TemporalShift,
};
