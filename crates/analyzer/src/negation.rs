use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Tokens scanned backwards from a marker for negation cues
pub const NEGATION_SCAN_WINDOW: usize = 5;

/// Nearer window used by the double-negative recount
const DOUBLE_NEGATIVE_WINDOW: usize = 3;

/// Negation cue classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegationKind {
    /// No cue found
    None,
    /// Direct negation ("not", "never", contracted forms)
    Hard,
    /// Weakening negation ("hardly", "rarely")
    Soft,
    /// Hypothetical negation ("might", "maybe")
    Conditional,
    /// Two hard cues cancelled each other
    DoubleNegative,
}

impl NegationKind {
    /// Tier strength before distance decay
    #[must_use]
    pub const fn strength(self) -> f64 {
        match self {
            Self::Hard => 1.0,
            Self::Soft => 0.6,
            Self::Conditional => 0.3,
            Self::None | Self::DoubleNegative => 0.0,
        }
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hard => "hard",
            Self::Soft => "soft",
            Self::Conditional => "conditional",
            Self::DoubleNegative => "double_negative",
        }
    }
}

/// Resolved negation state for one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Negation {
    /// Whether the marker is effectively negated
    pub negated: bool,

    /// Cue classification (or `DoubleNegative` when cancelled)
    pub kind: NegationKind,

    /// Distance-decayed strength in [0, 1]
    pub strength: f64,

    /// The cue word that won the scan
    pub cue: Option<String>,

    /// Token-index gap between cue and marker
    pub distance: Option<usize>,
}

impl Negation {
    /// State for a marker with no cue in range
    #[must_use]
    pub const fn none() -> Self {
        Self {
            negated: false,
            kind: NegationKind::None,
            strength: 0.0,
            cue: None,
            distance: None,
        }
    }
}

/// Negation cue vocabulary, one list per strength tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegationCues {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
    pub conditional: Vec<String>,
}

impl Default for NegationCues {
    fn default() -> Self {
        Self {
            hard: to_owned(&[
                "not", "no", "never", "none", "nobody", "nothing", "neither", "nowhere",
                "cannot", "can't", "won't", "wouldn't", "shouldn't", "couldn't", "doesn't",
                "didn't", "don't", "isn't", "aren't", "wasn't", "weren't", "hasn't", "haven't",
                "hadn't",
            ]),
            soft: to_owned(&["hardly", "barely", "scarcely", "rarely", "seldom"]),
            conditional: to_owned(&["might", "maybe", "perhaps", "possibly", "unlikely"]),
        }
    }
}

impl NegationCues {
    /// Classify a normalized word into its cue tier
    #[must_use]
    pub fn classify(&self, word: &str) -> Option<NegationKind> {
        if self.is_hard(word) {
            Some(NegationKind::Hard)
        } else if self.soft.iter().any(|w| w == word) {
            Some(NegationKind::Soft)
        } else if self.conditional.iter().any(|w| w == word) {
            Some(NegationKind::Conditional)
        } else {
            None
        }
    }

    /// Whether a word is a hard negation cue
    #[must_use]
    pub fn is_hard(&self, word: &str) -> bool {
        self.hard.iter().any(|w| w == word)
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Resolve the negation state of the token at `index`.
///
/// Scans up to [`NEGATION_SCAN_WINDOW`] preceding tokens; each cue's
/// effectiveness is its tier strength decayed by distance, and the strongest
/// match wins (ties keep the earlier candidate). A winning hard cue triggers
/// the double-negative recount over the nearer window, target included: an
/// even count of hard cues there cancels the negation outright.
#[must_use]
pub fn detect(tokens: &[Token], index: usize, cues: &NegationCues) -> Negation {
    let start = index.saturating_sub(NEGATION_SCAN_WINDOW);
    let mut best: Option<(NegationKind, f64, usize)> = None;

    for i in start..index {
        if let Some(kind) = cues.classify(&tokens[i].word) {
            let distance = index - i;
            let effectiveness = kind.strength() * (1.0 - distance as f64 / 6.0);
            if best.map_or(true, |(_, e, _)| effectiveness > e) {
                best = Some((kind, effectiveness, i));
            }
        }
    }

    let Some((kind, strength, cue_index)) = best else {
        return Negation::none();
    };
    let cue = tokens[cue_index].word.clone();
    let distance = index - cue_index;

    if kind == NegationKind::Hard {
        let from = index.saturating_sub(DOUBLE_NEGATIVE_WINDOW);
        let hard_count = tokens[from..=index]
            .iter()
            .filter(|t| cues.is_hard(&t.word))
            .count();
        if hard_count >= 2 && hard_count % 2 == 0 {
            return Negation {
                negated: false,
                kind: NegationKind::DoubleNegative,
                strength: 0.0,
                cue: Some(cue),
                distance: Some(distance),
            };
        }
    }

    Negation {
        negated: true,
        kind,
        strength,
        cue: Some(cue),
        distance: Some(distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;
    use pretty_assertions::assert_eq;

    fn detect_at(text: &str, word: &str) -> Negation {
        let tokens = tokenize(text, false);
        let index = tokens
            .iter()
            .position(|t| t.word == word)
            .unwrap_or_else(|| panic!("token {word} not found"));
        detect(&tokens, index, &NegationCues::default())
    }

    #[test]
    fn no_cue_in_range() {
        let negation = detect_at("i feel like a failure", "failure");
        assert_eq!(negation, Negation::none());
    }

    #[test]
    fn hard_cue_decays_with_distance() {
        // "not" one token before the marker
        let near = detect_at("i am not a failure", "failure");
        assert!(near.negated);
        assert_eq!(near.kind, NegationKind::Hard);
        assert!((near.strength - (1.0 - 2.0 / 6.0)).abs() < 1e-9);
        assert_eq!(near.distance, Some(2));

        let far = detect_at("not that i feel worthless", "worthless");
        assert!(far.negated);
        assert!(far.strength < near.strength);
    }

    #[test]
    fn effectiveness_tie_keeps_earlier_cue() {
        // hard at distance 3 and soft at distance 1 both score 0.5
        let negation = detect_at("not so hardly failure", "failure");
        assert_eq!(negation.cue.as_deref(), Some("not"));
        assert_eq!(negation.kind, NegationKind::Hard);
    }

    #[test]
    fn soft_and_conditional_tiers() {
        let soft = detect_at("i hardly feel stupid", "stupid");
        assert_eq!(soft.kind, NegationKind::Soft);
        assert!((soft.strength - 0.6 * (1.0 - 2.0 / 6.0)).abs() < 1e-9);

        let conditional = detect_at("maybe i am stupid", "stupid");
        assert_eq!(conditional.kind, NegationKind::Conditional);
    }

    #[test]
    fn stronger_later_cue_wins_ties_keep_first() {
        // conditional at distance 4 (eff 0.1) vs hard at distance 1 (eff 0.833)
        let negation = detect_at("maybe he is not wrong", "wrong");
        assert_eq!(negation.kind, NegationKind::Hard);
        assert_eq!(negation.cue.as_deref(), Some("not"));
    }

    #[test]
    fn test_double_negative_cancels() {
        let negation = detect_at("i am not never going to fail", "never");
        assert!(!negation.negated);
        assert_eq!(negation.kind, NegationKind::DoubleNegative);
        assert_eq!(negation.strength, 0.0);
    }

    #[test]
    fn test_single_hard_negation_sticks() {
        let negation = detect_at("i am not going to be perfect", "perfect");
        assert!(negation.negated);
        assert_eq!(negation.kind, NegationKind::Hard);
    }

    #[test]
    fn triple_hard_negation_stays_negated() {
        // three hard cues inside the recount window: odd count does not cancel
        let tokens = tokenize("no not never failure", false);
        let negation = detect(&tokens, 3, &NegationCues::default());
        assert!(negation.negated);
        assert_eq!(negation.kind, NegationKind::Hard);
    }

    #[test]
    fn recount_window_is_tighter_than_scan_window() {
        // second hard cue sits 5 tokens back: inside the scan window but
        // outside the 3-token recount, so no cancellation
        let tokens = tokenize("we never were going to not fail", false);
        let index = tokens.iter().position(|t| t.word == "fail").unwrap();
        let negation = detect(&tokens, index, &NegationCues::default());
        assert!(negation.negated);
        assert_eq!(negation.cue.as_deref(), Some("not"));
    }
}
