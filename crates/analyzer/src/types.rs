use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::modifier::Modifiers;
use crate::negation::Negation;

/// Temporal segment of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Early,
    Middle,
    Late,
}

impl Segment {
    /// Bucket a token position into a labeled segment.
    ///
    /// With `segments` buckets over `token_count` positions, the first bucket
    /// is early, the last is late and everything between is middle.
    #[must_use]
    pub fn of(position: usize, token_count: usize, segments: usize) -> Self {
        if token_count == 0 || segments <= 1 {
            return Self::Early;
        }
        let bucket = (position * segments / token_count).min(segments - 1);
        if bucket == 0 {
            Self::Early
        } else if bucket == segments - 1 {
            Self::Late
        } else {
            Self::Middle
        }
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Middle => "middle",
            Self::Late => "late",
        }
    }
}

/// Hit counts per segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCounts {
    pub early: usize,
    pub middle: usize,
    pub late: usize,
}

impl SegmentCounts {
    pub fn bump(&mut self, segment: Segment) {
        match segment {
            Segment::Early => self.early += 1,
            Segment::Middle => self.middle += 1,
            Segment::Late => self.late += 1,
        }
    }

    /// Total hits across segments
    #[must_use]
    pub const fn total(&self) -> usize {
        self.early + self.middle + self.late
    }
}

/// Accumulated weight per segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentWeights {
    pub early: f64,
    pub middle: f64,
    pub late: f64,
}

impl SegmentWeights {
    pub fn add(&mut self, segment: Segment, weight: f64) {
        match segment {
            Segment::Early => self.early += weight,
            Segment::Middle => self.middle += weight,
            Segment::Late => self.late += weight,
        }
    }

    /// Weight of one segment
    #[must_use]
    pub const fn get(&self, segment: Segment) -> f64 {
        match segment {
            Segment::Early => self.early,
            Segment::Middle => self.middle,
            Segment::Late => self.late,
        }
    }
}

/// One detected marker occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Normalized marker word
    pub word: String,

    /// Surface form as written
    pub original: String,

    /// Token position in the document
    pub position: usize,

    /// Byte offset into the original text
    pub offset: usize,

    /// Pattern category the marker counts toward
    pub category: String,

    /// Subcategory, from the entry or a matched context rule
    pub subcategory: Option<String>,

    /// Lexicon weight before adjustment
    pub base_weight: f64,

    /// Adjusted weight after negation, modifiers and flooring
    pub weight: f64,

    /// Resolved negation state
    pub negation: Negation,

    /// Resolved modifier state
    pub modifier: Modifiers,

    /// Context-rule needle that matched, for context-gated entries
    pub context: Option<String>,

    /// Temporal segment the hit falls into
    pub segment: Segment,

    /// Emotional valence of the marker
    pub valence: f64,

    /// Sentence index, when sentence annotation is enabled
    pub sentence: Option<usize>,
}

/// A run of nearby hits (positional gap of at most 5, two or more members)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of the first member
    pub start: usize,

    /// Position of the last member
    pub end: usize,

    /// All member positions, ascending
    pub positions: Vec<usize>,
}

impl Cluster {
    /// Number of hits in the cluster
    #[must_use]
    pub fn size(&self) -> usize {
        self.positions.len()
    }
}

/// Aggregate statistics for one pattern category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternScore {
    /// Category id
    pub category: String,

    /// Display name from the pattern definition
    pub name: String,

    /// Driver the category feeds, when defined
    pub driver: Option<String>,

    /// Sum of adjusted hit weights
    pub score: f64,

    /// Number of hits
    pub count: usize,

    /// Negation-discounted score (negated hits at half weight)
    pub weighted_score: f64,

    /// Hit positions, ascending
    pub positions: Vec<usize>,

    /// Hits per subcategory
    pub subcategories: BTreeMap<String, usize>,

    /// Valence of each hit, in hit order
    pub valences: Vec<f64>,

    /// Hits per temporal segment
    pub segments: SegmentCounts,

    /// Clusters containing at least one hit of this category
    pub clusters: Vec<Cluster>,

    /// Raw evidence blend in [0, 1], before calibration
    pub evidence: f64,

    /// Calibrated confidence in [0.05, 0.95]
    pub confidence: f64,

    /// Weighted score reached the category's severity threshold
    pub severe: bool,
}

impl PatternScore {
    /// Mean emotional valence across hits (0 when empty)
    #[must_use]
    pub fn mean_valence(&self) -> f64 {
        if self.valences.is_empty() {
            return 0.0;
        }
        self.valences.iter().sum::<f64>() / self.valences.len() as f64
    }
}

/// One pattern's contribution to a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverContribution {
    /// Contributing category id
    pub category: String,

    /// Weighted score times the category's multiplier
    pub contribution: f64,

    /// The category's confidence
    pub confidence: f64,
}

/// Aggregate score for one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverScore {
    /// Driver id
    pub driver: String,

    /// Display name from the driver definition
    pub name: String,

    /// Sum of contributing raw pattern scores
    pub score: f64,

    /// Sum of contributions
    pub weighted_score: f64,

    /// Weighted score mapped onto [0, 10]
    pub normalized: f64,

    /// Calibrated confidence in [0.05, 0.95]
    pub confidence: f64,

    /// Normalized score reached the primary threshold
    pub primary: bool,

    /// Blend of contribution magnitude and average hit strength, in [0, 1]
    pub intensity: f64,

    /// Contributing patterns, strongest first
    pub contributors: Vec<DriverContribution>,

    /// Interpretation text from the driver definition
    pub insight: String,
}

/// One of the two hits in a lexical contradiction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictItem {
    pub word: String,
    pub position: usize,
    pub category: String,
    pub weight: f64,
}

/// Variant-specific conflict payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two hits whose lexicon entries contradict each other
    LexicalContradiction {
        first: ConflictItem,
        second: ConflictItem,
        distance: usize,
    },

    /// A strong marker asserted under negation
    SelfNegation {
        word: String,
        position: usize,
        weight: f64,
    },

    /// A marker amplified and diminished at once
    ModifierConflict {
        word: String,
        position: usize,
        weight: f64,
        intensifiers: Vec<String>,
        diminishers: Vec<String>,
    },

    /// Two opposing drivers both scoring high
    DriverConflict {
        first: String,
        second: String,
        first_score: f64,
        second_score: f64,
    },

    /// Two present patterns in declared tension
    PatternConflict {
        first: String,
        second: String,
        first_confidence: f64,
        second_confidence: f64,
        /// The patterns reinforce each other while their drivers oppose
        reinforcing: bool,
    },

    /// One pattern resolves while another on the same driver escalates
    TemporalConflict {
        driver: String,
        resolving: String,
        escalating: String,
    },
}

impl ConflictKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LexicalContradiction { .. } => "lexical_contradiction",
            Self::SelfNegation { .. } => "self_negation",
            Self::ModifierConflict { .. } => "modifier_conflict",
            Self::DriverConflict { .. } => "driver_conflict",
            Self::PatternConflict { .. } => "pattern_conflict",
            Self::TemporalConflict { .. } => "temporal_conflict",
        }
    }
}

/// One detected tension, scored and interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(flatten)]
    pub kind: ConflictKind,

    /// Severity, practically within [0, 10]
    pub severity: f64,

    /// Calibrated confidence in [0.05, 0.95]
    pub confidence: f64,

    /// Human-readable reading of the tension
    pub interpretation: String,
}

/// Direction of a detected temporal shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Pattern absent earlier, present now
    Emerging,
    /// Pattern weight increasing
    Escalating,
    /// Pattern weight decreasing
    Diminishing,
}

impl ShiftDirection {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emerging => "emerging",
            Self::Escalating => "escalating",
            Self::Diminishing => "diminishing",
        }
    }
}

/// Weight change of one pattern between adjacent segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternShift {
    pub category: String,
    pub from: Segment,
    pub to: Segment,
    pub previous: f64,
    pub current: f64,
    pub change: f64,
    pub percent_change: f64,
    pub direction: ShiftDirection,
}

/// Shape of a pattern's weight across the three labeled segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcShape {
    Plateau,
    Escalating,
    Resolving,
    PeakingMiddle,
    DipRecovery,
    Fluctuating,
}

impl ArcShape {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plateau => "plateau",
            Self::Escalating => "escalating",
            Self::Resolving => "resolving",
            Self::PeakingMiddle => "peaking_middle",
            Self::DipRecovery => "dip_recovery",
            Self::Fluctuating => "fluctuating",
        }
    }
}

/// Temporal analysis over the document's segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalShift {
    /// Per-category weight in each segment
    pub profiles: BTreeMap<String, SegmentWeights>,

    /// Significant weight changes between adjacent segments
    pub shifts: Vec<PatternShift>,

    /// Narrative arc per category
    pub arcs: BTreeMap<String, ArcShape>,
}

/// Bookkeeping attached to every analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Non-punctuation tokens in the input
    pub word_count: usize,

    /// Number of hits
    pub marker_count: usize,

    /// Markers per word
    pub density: f64,

    /// Mean pattern confidence (0 when no patterns)
    pub average_confidence: f64,

    /// Pipeline wall time in milliseconds
    pub duration_ms: u64,

    /// Deterministic key for the result cache
    pub cache_key: String,
}

/// Complete outcome of one analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every retained marker detection, in document order
    pub hits: Vec<Hit>,

    /// Per-category aggregates
    pub patterns: BTreeMap<String, PatternScore>,

    /// Per-driver aggregates
    pub drivers: BTreeMap<String, DriverScore>,

    /// Detected tensions, most severe first
    pub conflicts: Vec<Conflict>,

    /// Segment profiles, shifts and arcs
    pub temporal: TemporalShift,

    /// Internal consistency in [0.1, 1.0]
    pub coherence: f64,

    /// Overall composite confidence
    pub confidence: f64,

    pub metadata: Metadata,
}

impl AnalysisResult {
    /// Patterns ordered by weighted score, strongest first
    #[must_use]
    pub fn top_patterns(&self, limit: usize) -> Vec<&PatternScore> {
        let mut scores: Vec<&PatternScore> = self.patterns.values().collect();
        scores.sort_by(|a, b| {
            b.weighted_score
                .partial_cmp(&a.weighted_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        scores.truncate(limit);
        scores
    }

    /// Drivers ordered by weighted score, strongest first
    #[must_use]
    pub fn top_drivers(&self, limit: usize) -> Vec<&DriverScore> {
        let mut scores: Vec<&DriverScore> = self.drivers.values().collect();
        scores.sort_by(|a, b| {
            b.weighted_score
                .partial_cmp(&a.weighted_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.driver.cmp(&b.driver))
        });
        scores.truncate(limit);
        scores
    }

    /// Drivers whose normalized score crossed the primary threshold
    #[must_use]
    pub fn primary_drivers(&self) -> Vec<&DriverScore> {
        let mut scores: Vec<&DriverScore> = self
            .drivers
            .values()
            .filter(|score| score.primary)
            .collect();
        scores.sort_by(|a, b| {
            b.normalized
                .partial_cmp(&a.normalized)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.driver.cmp(&b.driver))
        });
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn segment_bucketing_thirds() {
        assert_eq!(Segment::of(0, 9, 3), Segment::Early);
        assert_eq!(Segment::of(2, 9, 3), Segment::Early);
        assert_eq!(Segment::of(3, 9, 3), Segment::Middle);
        assert_eq!(Segment::of(5, 9, 3), Segment::Middle);
        assert_eq!(Segment::of(6, 9, 3), Segment::Late);
        assert_eq!(Segment::of(8, 9, 3), Segment::Late);
    }

    #[test]
    fn segment_bucketing_generalizes() {
        // five buckets: only the first is early, only the last is late
        assert_eq!(Segment::of(0, 10, 5), Segment::Early);
        assert_eq!(Segment::of(3, 10, 5), Segment::Middle);
        assert_eq!(Segment::of(7, 10, 5), Segment::Middle);
        assert_eq!(Segment::of(9, 10, 5), Segment::Late);

        // degenerate single segment
        assert_eq!(Segment::of(4, 10, 1), Segment::Early);
    }

    #[test]
    fn conflict_serialization_is_tagged() {
        let conflict = Conflict {
            kind: ConflictKind::DriverConflict {
                first: "control".to_string(),
                second: "acceptance".to_string(),
                first_score: 6.0,
                second_score: 4.0,
            },
            severity: 0.5,
            confidence: 0.6,
            interpretation: "test".to_string(),
        };

        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(json["type"], "driver_conflict");
        assert_eq!(json["first"], "control");
        assert_eq!(json["severity"], 0.5);

        let back: Conflict = serde_json::from_value(json).unwrap();
        assert_eq!(back, conflict);
    }

    #[test]
    fn segment_weights_accumulate() {
        let mut weights = SegmentWeights::default();
        weights.add(Segment::Early, 1.5);
        weights.add(Segment::Early, 0.5);
        weights.add(Segment::Late, 2.0);
        assert_eq!(weights.get(Segment::Early), 2.0);
        assert_eq!(weights.get(Segment::Middle), 0.0);
        assert_eq!(weights.get(Segment::Late), 2.0);
    }
}
