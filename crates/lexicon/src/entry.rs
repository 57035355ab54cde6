use serde::{Deserialize, Serialize};

/// Intensity band a marker carries in the lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Mild phrasing, low diagnostic signal on its own
    Low,
    /// Everyday strength
    Moderate,
    /// Strongly loaded wording
    High,
    /// Extreme wording (rare, highly loaded)
    Extreme,
}

impl Intensity {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

/// Weight override applied when a required-context substring matches.
///
/// Rules are consulted in declaration order; the first needle found in the
/// surrounding window text wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRule {
    /// Substring searched for in the preceding-window or full-window text
    pub needle: String,

    /// Weight that replaces the entry's base weight on a match
    pub weight: f64,

    /// Subcategory that replaces the entry's own subcategory on a match
    pub subcategory: Option<String>,
}

impl ContextRule {
    /// Create a context rule without a subcategory override
    pub fn new(needle: impl Into<String>, weight: f64) -> Self {
        Self {
            needle: needle.into(),
            weight,
            subcategory: None,
        }
    }

    /// Builder: set the subcategory override
    #[must_use]
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }
}

/// One marker entry in the lexicon, keyed by its normalized word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Normalized (lower-case) word this entry matches
    pub word: String,

    /// Pattern category the marker counts toward
    pub category: String,

    /// Optional finer-grained bucket inside the category
    pub subcategory: Option<String>,

    /// Base weight before negation/modifier adjustment (positive)
    pub weight: f64,

    /// Intensity band of the wording
    pub intensity: Intensity,

    /// Words that contradict this marker when both appear as hits
    #[serde(default)]
    pub contradicts: Vec<String>,

    /// Words that reinforce this marker (consumed by relationship analytics,
    /// not by the core pipeline)
    #[serde(default)]
    pub reinforces: Vec<String>,

    /// Emotional valence in [-1, 1]
    pub valence: f64,

    /// When set, the entry only matches if one of `contexts` matches
    #[serde(default)]
    pub context_required: bool,

    /// Context rules, consulted in declaration order
    #[serde(default)]
    pub contexts: Vec<ContextRule>,
}

impl LexiconEntry {
    /// Create a context-free entry
    pub fn new(
        word: impl Into<String>,
        category: impl Into<String>,
        weight: f64,
        intensity: Intensity,
        valence: f64,
    ) -> Self {
        Self {
            word: word.into(),
            category: category.into(),
            subcategory: None,
            weight,
            intensity,
            contradicts: Vec::new(),
            reinforces: Vec::new(),
            valence,
            context_required: false,
            contexts: Vec::new(),
        }
    }

    /// Builder: set the subcategory
    #[must_use]
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Builder: declare contradicting words
    #[must_use]
    pub fn contradicts(mut self, words: &[&str]) -> Self {
        self.contradicts = words.iter().map(|w| (*w).to_string()).collect();
        self
    }

    /// Builder: declare reinforcing words
    #[must_use]
    pub fn reinforces(mut self, words: &[&str]) -> Self {
        self.reinforces = words.iter().map(|w| (*w).to_string()).collect();
        self
    }

    /// Builder: add a context rule and mark the entry context-required
    #[must_use]
    pub fn with_context(mut self, rule: ContextRule) -> Self {
        self.context_required = true;
        self.contexts.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_context_required() {
        let entry = LexiconEntry::new("perfect", "perfectionism", 1.5, Intensity::High, -0.2)
            .with_context(ContextRule::new("be perfect", 2.0).subcategory("self_standard"));

        assert!(entry.context_required);
        assert_eq!(entry.contexts.len(), 1);
        assert_eq!(entry.contexts[0].needle, "be perfect");
        assert_eq!(entry.contexts[0].subcategory.as_deref(), Some("self_standard"));
    }

    #[test]
    fn context_free_by_default() {
        let entry = LexiconEntry::new("always", "absolutist", 1.5, Intensity::High, -0.2);
        assert!(!entry.context_required);
        assert!(entry.contexts.is_empty());
        assert!(entry.subcategory.is_none());
    }

    #[test]
    fn intensity_labels() {
        assert_eq!(Intensity::Low.as_str(), "low");
        assert_eq!(Intensity::Extreme.as_str(), "extreme");
    }
}
