use serde::{Deserialize, Serialize};

/// Default weighted-score threshold above which a pattern is flagged severe
pub const DEFAULT_SEVERITY_THRESHOLD: f64 = 2.0;

/// Default multiplier applied to a pattern's evidence and contributions
pub const DEFAULT_WEIGHT_MULTIPLIER: f64 = 1.0;

/// Declared relationship between two pattern categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRelation {
    /// The categories pull in opposite directions
    Conflicts,
    /// The categories amplify each other
    Reinforces,
}

/// Definition of one detectable pattern category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Stable identifier, matches `LexiconEntry::category`
    pub id: String,

    /// Display name
    pub name: String,

    /// Driver this pattern feeds
    pub driver: String,

    /// Weighted score at or above which the pattern is marked severe
    pub severity_threshold: f64,

    /// Multiplier applied to evidence scores and driver contributions
    pub weight_multiplier: f64,

    /// Category ids this pattern conflicts with
    #[serde(default)]
    pub conflicts_with: Vec<String>,

    /// Category ids this pattern reinforces
    #[serde(default)]
    pub reinforces: Vec<String>,
}

impl PatternDefinition {
    /// Create a definition with default threshold and multiplier
    pub fn new(id: impl Into<String>, name: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            driver: driver.into(),
            severity_threshold: DEFAULT_SEVERITY_THRESHOLD,
            weight_multiplier: DEFAULT_WEIGHT_MULTIPLIER,
            conflicts_with: Vec::new(),
            reinforces: Vec::new(),
        }
    }

    /// Builder: set the severity threshold
    #[must_use]
    pub const fn severity_threshold(mut self, threshold: f64) -> Self {
        self.severity_threshold = threshold;
        self
    }

    /// Builder: set the weight multiplier
    #[must_use]
    pub const fn weight_multiplier(mut self, multiplier: f64) -> Self {
        self.weight_multiplier = multiplier;
        self
    }

    /// Builder: declare conflicting categories
    #[must_use]
    pub fn conflicts_with(mut self, ids: &[&str]) -> Self {
        self.conflicts_with = ids.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Builder: declare reinforced categories
    #[must_use]
    pub fn reinforces(mut self, ids: &[&str]) -> Self {
        self.reinforces = ids.iter().map(|s| (*s).to_string()).collect();
        self
    }
}
