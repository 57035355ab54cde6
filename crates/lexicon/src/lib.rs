//! # Mindsift Lexicon
//!
//! Static knowledge tables for cognitive-marker analysis: the marker
//! lexicon, pattern definitions, driver definitions, and the pattern
//! relationship table.
//!
//! Everything in this crate is immutable after construction. The tables are
//! loaded once and passed into the analysis pipeline as a dependency; the
//! bundled tables are available through [`KnowledgeBase::builtin`] (fresh
//! copy) or [`KnowledgeBase::shared`] (cheap process-wide handle).

mod builtin;
mod driver;
mod entry;
mod error;
mod knowledge;
mod pattern;

pub use driver::DriverDefinition;
pub use entry::{ContextRule, Intensity, LexiconEntry};
pub use error::{LexiconError, Result};
pub use knowledge::KnowledgeBase;
pub use pattern::{
    PatternDefinition, PatternRelation, DEFAULT_SEVERITY_THRESHOLD, DEFAULT_WEIGHT_MULTIPLIER,
};
