use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Tokens scanned backwards from a marker for intensity modifiers
pub const MODIFIER_SCAN_WINDOW: usize = 3;

/// Lower bound of the combined multiplier
pub const MULTIPLIER_FLOOR: f64 = 0.1;

/// Upper bound of the combined multiplier
pub const MULTIPLIER_CEIL: f64 = 3.0;

/// Amplifier tier, ordered by the bonus it adds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmplifierTier {
    /// "utterly", "extremely"
    Extreme,
    /// "really", "desperately"
    Emotional,
    /// "very", "quite"
    Moderate,
}

impl AmplifierTier {
    const fn bonus(self) -> f64 {
        match self {
            Self::Extreme => 0.5,
            Self::Emotional => 0.4,
            Self::Moderate => 0.3,
        }
    }
}

/// Diminisher tier, ordered by the penalty it subtracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiminisherTier {
    /// "supposedly", "apparently"
    Uncertainty,
    /// "somewhat", "relatively"
    Qualification,
    /// "slightly", "barely"
    Minimization,
}

impl DiminisherTier {
    const fn penalty(self) -> f64 {
        match self {
            Self::Uncertainty => 0.4,
            Self::Qualification => 0.3,
            Self::Minimization => 0.2,
        }
    }
}

/// Modifier cue vocabulary, one list per tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierCues {
    pub extreme: Vec<String>,
    pub emotional: Vec<String>,
    pub moderate: Vec<String>,
    pub uncertainty: Vec<String>,
    pub qualification: Vec<String>,
    pub minimization: Vec<String>,
}

impl Default for ModifierCues {
    fn default() -> Self {
        Self {
            extreme: to_owned(&[
                "extremely",
                "incredibly",
                "utterly",
                "absolutely",
                "completely",
                "totally",
                "exceptionally",
            ]),
            emotional: to_owned(&["really", "deeply", "desperately", "terribly", "genuinely"]),
            moderate: to_owned(&[
                "very",
                "quite",
                "pretty",
                "highly",
                "particularly",
                "especially",
                "rather",
                "fairly",
            ]),
            uncertainty: to_owned(&["supposedly", "seemingly", "apparently", "allegedly"]),
            qualification: to_owned(&["somewhat", "relatively", "moderately", "mostly", "partly"]),
            minimization: to_owned(&["slightly", "barely", "hardly", "scarcely", "little", "bit"]),
        }
    }
}

impl ModifierCues {
    /// Classify a normalized word as an amplifier
    #[must_use]
    pub fn amplifier(&self, word: &str) -> Option<AmplifierTier> {
        if self.extreme.iter().any(|w| w == word) {
            Some(AmplifierTier::Extreme)
        } else if self.emotional.iter().any(|w| w == word) {
            Some(AmplifierTier::Emotional)
        } else if self.moderate.iter().any(|w| w == word) {
            Some(AmplifierTier::Moderate)
        } else {
            None
        }
    }

    /// Classify a normalized word as a diminisher
    #[must_use]
    pub fn diminisher(&self, word: &str) -> Option<DiminisherTier> {
        if self.uncertainty.iter().any(|w| w == word) {
            Some(DiminisherTier::Uncertainty)
        } else if self.qualification.iter().any(|w| w == word) {
            Some(DiminisherTier::Qualification)
        } else if self.minimization.iter().any(|w| w == word) {
            Some(DiminisherTier::Minimization)
        } else {
            None
        }
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Combined modifier state for one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Final multiplier, clamped to [0.1, 3.0]
    pub multiplier: f64,

    /// Amplifier words found in the scan window
    pub intensifiers: Vec<String>,

    /// Diminisher words found in the scan window
    pub diminishers: Vec<String>,

    /// Both amplifiers and diminishers were present
    pub conflicted: bool,
}

impl Modifiers {
    /// State for a marker with no modifiers in range
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            multiplier: 1.0,
            intensifiers: Vec::new(),
            diminishers: Vec::new(),
            conflicted: false,
        }
    }
}

/// Resolve intensity modifiers for the token at `index`.
///
/// Amplifier bonuses and diminisher penalties are tiered, decay with
/// distance (never below half effect) and accumulate additively from 1.0.
/// Mixed amplifier/diminisher runs are dampened and flagged as conflicted.
#[must_use]
pub fn analyze(tokens: &[Token], index: usize, cues: &ModifierCues) -> Modifiers {
    let start = index.saturating_sub(MODIFIER_SCAN_WINDOW);
    let mut multiplier = 1.0;
    let mut intensifiers = Vec::new();
    let mut diminishers = Vec::new();

    for i in start..index {
        let word = &tokens[i].word;
        let distance = index - i;
        let scale = (1.0 - 0.2 * distance as f64).max(0.5);

        if let Some(tier) = cues.amplifier(word) {
            multiplier += tier.bonus() * scale;
            intensifiers.push(word.clone());
        } else if let Some(tier) = cues.diminisher(word) {
            multiplier -= tier.penalty() * scale;
            diminishers.push(word.clone());
        }
    }

    let conflicted = !intensifiers.is_empty() && !diminishers.is_empty();
    if conflicted {
        let overlap = intensifiers.len().min(diminishers.len());
        multiplier *= 1.0 - 0.2 * overlap as f64;
    }

    Modifiers {
        multiplier: multiplier.clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEIL),
        intensifiers,
        diminishers,
        conflicted,
    }
}
