//! Bundled knowledge tables.
//!
//! The marker vocabulary is split into ten pattern categories feeding six
//! drivers. Entries for very common words are context-gated so they only
//! fire inside a loaded phrase.

use crate::driver::DriverDefinition;
use crate::entry::{ContextRule, Intensity, LexiconEntry};
use crate::pattern::PatternDefinition;

pub(crate) fn entries() -> Vec<LexiconEntry> {
    use Intensity::{Extreme, High, Low, Moderate};

    vec![
        // Absolutist language
        LexiconEntry::new("always", "absolutist", 1.5, High, -0.2)
            .subcategory("temporal")
            .contradicts(&["never", "sometimes"]),
        LexiconEntry::new("never", "absolutist", 1.5, High, -0.4)
            .subcategory("temporal")
            .contradicts(&["always", "sometimes"]),
        LexiconEntry::new("forever", "absolutist", 1.2, Moderate, -0.2).subcategory("temporal"),
        LexiconEntry::new("constantly", "absolutist", 1.3, Moderate, -0.3).subcategory("temporal"),
        LexiconEntry::new("every", "absolutist", 1.0, Low, -0.1)
            .subcategory("temporal")
            .with_context(ContextRule::new("every time", 1.3))
            .with_context(ContextRule::new("every single", 1.4)),
        LexiconEntry::new("everything", "absolutist", 1.3, Moderate, -0.3)
            .subcategory("scope")
            .contradicts(&["nothing"]),
        LexiconEntry::new("nothing", "absolutist", 1.4, High, -0.6)
            .subcategory("scope")
            .contradicts(&["everything"]),
        LexiconEntry::new("everyone", "absolutist", 1.2, Moderate, -0.2)
            .subcategory("scope")
            .contradicts(&["nobody"]),
        LexiconEntry::new("nobody", "absolutist", 1.3, High, -0.5)
            .subcategory("scope")
            .contradicts(&["everyone"]),
        LexiconEntry::new("completely", "absolutist", 1.2, Moderate, -0.1).subcategory("degree"),
        LexiconEntry::new("totally", "absolutist", 1.1, Moderate, -0.1).subcategory("degree"),
        LexiconEntry::new("absolutely", "absolutist", 1.2, Moderate, 0.0).subcategory("degree"),
        LexiconEntry::new("entirely", "absolutist", 1.1, Moderate, -0.1).subcategory("degree"),
        // Imperative self-talk
        LexiconEntry::new("should", "imperative", 1.4, High, -0.3),
        LexiconEntry::new("must", "imperative", 1.5, High, -0.3),
        LexiconEntry::new("ought", "imperative", 1.3, Moderate, -0.2),
        LexiconEntry::new("supposed", "imperative", 1.2, High, -0.3)
            .subcategory("obligation")
            .with_context(ContextRule::new("supposed to", 1.4)),
        LexiconEntry::new("need", "imperative", 1.0, Moderate, -0.2)
            .subcategory("obligation")
            .with_context(ContextRule::new("i need to", 1.3))
            .with_context(ContextRule::new("need to be", 1.2)),
        LexiconEntry::new("have", "imperative", 1.0, Moderate, -0.3)
            .subcategory("obligation")
            .with_context(ContextRule::new("have to", 1.4)),
        // Self-criticism
        LexiconEntry::new("failure", "self_critic", 1.8, Extreme, -0.8)
            .contradicts(&["perfect", "flawless"]),
        LexiconEntry::new("worthless", "self_critic", 2.0, Extreme, -0.9),
        LexiconEntry::new("useless", "self_critic", 1.8, Extreme, -0.8),
        LexiconEntry::new("stupid", "self_critic", 1.6, High, -0.7),
        LexiconEntry::new("idiot", "self_critic", 1.7, High, -0.8),
        LexiconEntry::new("loser", "self_critic", 1.8, Extreme, -0.8),
        LexiconEntry::new("pathetic", "self_critic", 1.7, High, -0.8),
        LexiconEntry::new("weak", "self_critic", 1.3, Moderate, -0.5),
        LexiconEntry::new("inadequate", "self_critic", 1.6, High, -0.6),
        LexiconEntry::new("disappointment", "self_critic", 1.5, High, -0.6),
        LexiconEntry::new("broken", "self_critic", 1.4, High, -0.6)
            .subcategory("self_image")
            .with_context(ContextRule::new("i'm broken", 1.8))
            .with_context(ContextRule::new("i am broken", 1.8))
            .with_context(ContextRule::new("feel broken", 1.6)),
        LexiconEntry::new("fault", "self_critic", 1.2, Moderate, -0.5)
            .subcategory("self_blame")
            .with_context(ContextRule::new("my fault", 1.5)),
        // Catastrophizing
        LexiconEntry::new("disaster", "catastrophizing", 1.7, High, -0.7),
        LexiconEntry::new("terrible", "catastrophizing", 1.5, High, -0.6),
        LexiconEntry::new("awful", "catastrophizing", 1.5, High, -0.6),
        LexiconEntry::new("horrible", "catastrophizing", 1.5, High, -0.6),
        LexiconEntry::new("nightmare", "catastrophizing", 1.6, High, -0.7),
        LexiconEntry::new("catastrophe", "catastrophizing", 1.8, Extreme, -0.8),
        LexiconEntry::new("ruined", "catastrophizing", 1.6, High, -0.7),
        LexiconEntry::new("doomed", "catastrophizing", 1.7, Extreme, -0.8),
        LexiconEntry::new("unbearable", "catastrophizing", 1.6, High, -0.7),
        LexiconEntry::new("devastating", "catastrophizing", 1.7, High, -0.7),
        LexiconEntry::new("worst", "catastrophizing", 1.5, High, -0.6),
        LexiconEntry::new("falling", "catastrophizing", 1.2, Moderate, -0.5)
            .with_context(ContextRule::new("falling apart", 1.6)),
        // Helplessness
        LexiconEntry::new("can't", "helplessness", 1.3, Moderate, -0.5).subcategory("capability"),
        LexiconEntry::new("cannot", "helplessness", 1.3, Moderate, -0.5).subcategory("capability"),
        LexiconEntry::new("unable", "helplessness", 1.3, Moderate, -0.5).subcategory("capability"),
        LexiconEntry::new("impossible", "helplessness", 1.5, High, -0.6)
            .subcategory("capability"),
        LexiconEntry::new("stuck", "helplessness", 1.4, High, -0.5).subcategory("entrapment"),
        LexiconEntry::new("trapped", "helplessness", 1.6, High, -0.7).subcategory("entrapment"),
        LexiconEntry::new("powerless", "helplessness", 1.7, High, -0.7).subcategory("agency"),
        LexiconEntry::new("helpless", "helplessness", 1.7, High, -0.7).subcategory("agency"),
        LexiconEntry::new("overwhelmed", "helplessness", 1.5, High, -0.6),
        LexiconEntry::new("hopeless", "helplessness", 1.8, Extreme, -0.8)
            .contradicts(&["hope", "hopeful"]),
        LexiconEntry::new("control", "helplessness", 1.2, High, -0.6)
            .subcategory("agency")
            .with_context(ContextRule::new("out of control", 1.5))
            .with_context(ContextRule::new("lost control", 1.4))
            .with_context(ContextRule::new("losing control", 1.4)),
        // Resignation
        LexiconEntry::new("whatever", "resignation", 1.3, Moderate, -0.4),
        LexiconEntry::new("pointless", "resignation", 1.6, High, -0.7),
        LexiconEntry::new("meaningless", "resignation", 1.6, High, -0.7),
        LexiconEntry::new("quit", "resignation", 1.2, Moderate, -0.4),
        LexiconEntry::new("anymore", "resignation", 1.3, Moderate, -0.5),
        LexiconEntry::new("give", "resignation", 1.0, Moderate, -0.5)
            .with_context(ContextRule::new("give up", 1.5))
            .with_context(ContextRule::new("giving up", 1.5))
            .with_context(ContextRule::new("gave up", 1.4)),
        LexiconEntry::new("bother", "resignation", 1.1, Moderate, -0.5)
            .with_context(ContextRule::new("why bother", 1.6)),
        // Defiance
        LexiconEntry::new("refuse", "defiance", 1.5, High, -0.4),
        LexiconEntry::new("right", "defiance", 1.0, Moderate, -0.2)
            .subcategory("certainty")
            .with_context(ContextRule::new("always right", 1.6))
            .with_context(ContextRule::new("i'm right", 1.4))
            .with_context(ContextRule::new("be right", 1.3)),
        LexiconEntry::new("deserve", "defiance", 1.0, Moderate, 0.0)
            .with_context(ContextRule::new("deserve better", 1.4))
            .with_context(ContextRule::new("i deserve", 1.2)),
        LexiconEntry::new("way", "defiance", 1.0, Moderate, -0.2)
            .subcategory("autonomy_claim")
            .with_context(ContextRule::new("my way", 1.3)),
        // Hedging
        LexiconEntry::new("sometimes", "hedging", 1.0, Low, 0.0)
            .subcategory("frequency")
            .contradicts(&["always", "never"]),
        LexiconEntry::new("maybe", "hedging", 1.0, Low, 0.0).subcategory("uncertainty"),
        LexiconEntry::new("perhaps", "hedging", 1.0, Low, 0.0).subcategory("uncertainty"),
        LexiconEntry::new("possibly", "hedging", 0.9, Low, 0.0).subcategory("uncertainty"),
        LexiconEntry::new("probably", "hedging", 0.9, Low, 0.0).subcategory("uncertainty"),
        LexiconEntry::new("somewhat", "hedging", 0.8, Low, 0.0).subcategory("qualifier"),
        LexiconEntry::new("guess", "hedging", 1.0, Low, -0.1)
            .with_context(ContextRule::new("i guess", 1.2)),
        LexiconEntry::new("suppose", "hedging", 1.0, Low, -0.1)
            .with_context(ContextRule::new("i suppose", 1.1)),
        LexiconEntry::new("kind", "hedging", 0.8, Low, 0.0)
            .subcategory("qualifier")
            .with_context(ContextRule::new("kind of", 0.9)),
        LexiconEntry::new("sort", "hedging", 0.8, Low, 0.0)
            .subcategory("qualifier")
            .with_context(ContextRule::new("sort of", 0.9)),
        // Wishful thinking
        LexiconEntry::new("wish", "wishful", 1.3, Moderate, -0.3),
        LexiconEntry::new("hope", "wishful", 1.0, Low, 0.3),
        LexiconEntry::new("hopeful", "wishful", 1.0, Low, 0.5),
        LexiconEntry::new("dream", "wishful", 1.0, Low, 0.2),
        LexiconEntry::new("someday", "wishful", 1.2, Moderate, -0.1),
        LexiconEntry::new("escape", "wishful", 1.2, Moderate, -0.4),
        LexiconEntry::new("if", "wishful", 1.0, Moderate, -0.4)
            .with_context(ContextRule::new("if only", 1.4)),
        // Perfectionism
        LexiconEntry::new("perfect", "perfectionism", 1.5, High, -0.2)
            .contradicts(&["failure", "worthless"])
            .with_context(ContextRule::new("be perfect", 2.0).subcategory("self_standard"))
            .with_context(ContextRule::new("being perfect", 1.8))
            .with_context(ContextRule::new("always perfect", 1.9)),
        LexiconEntry::new("perfectly", "perfectionism", 1.3, Moderate, -0.1),
        LexiconEntry::new("flawless", "perfectionism", 1.6, High, -0.2),
        LexiconEntry::new("mistake", "perfectionism", 1.3, Moderate, -0.5),
        LexiconEntry::new("mistakes", "perfectionism", 1.3, Moderate, -0.5),
        LexiconEntry::new("standards", "perfectionism", 1.0, Moderate, -0.1)
            .with_context(ContextRule::new("high standards", 1.3))
            .with_context(ContextRule::new("my standards", 1.2)),
        LexiconEntry::new("enough", "perfectionism", 1.0, Moderate, -0.3)
            .subcategory("adequacy")
            .with_context(ContextRule::new("good enough", 1.5)),
    ]
}

pub(crate) fn patterns() -> Vec<PatternDefinition> {
    vec![
        PatternDefinition::new("absolutist", "Absolutist Thinking", "control")
            .severity_threshold(2.5),
        PatternDefinition::new("imperative", "Imperative Self-Talk", "control")
            .severity_threshold(2.5),
        PatternDefinition::new("self_critic", "Self-Criticism", "validation")
            .weight_multiplier(1.3),
        PatternDefinition::new("catastrophizing", "Catastrophizing", "safety")
            .weight_multiplier(1.2)
            .reinforces(&["helplessness"]),
        PatternDefinition::new("helplessness", "Learned Helplessness", "control")
            .weight_multiplier(1.2)
            .reinforces(&["resignation"]),
        PatternDefinition::new("resignation", "Resignation", "acceptance")
            .severity_threshold(1.8)
            .conflicts_with(&["catastrophizing"]),
        PatternDefinition::new("defiance", "Defiance", "autonomy")
            .severity_threshold(1.8)
            .weight_multiplier(0.9)
            .conflicts_with(&["helplessness"]),
        PatternDefinition::new("hedging", "Hedging", "safety")
            .severity_threshold(3.0)
            .weight_multiplier(0.7)
            .conflicts_with(&["absolutist"]),
        PatternDefinition::new("wishful", "Wishful Thinking", "growth")
            .severity_threshold(2.5)
            .weight_multiplier(0.8)
            .reinforces(&["hedging"]),
        PatternDefinition::new("perfectionism", "Perfectionism", "validation")
            .weight_multiplier(1.1)
            .reinforces(&["self_critic"]),
    ]
}

pub(crate) fn drivers() -> Vec<DriverDefinition> {
    vec![
        DriverDefinition::new(
            "control",
            "Need for Control",
            "Distress concentrates around outcomes that cannot be forced.",
            "Planning and follow-through within one's actual reach.",
            "Rigid rules and absolutist demands on self and others.",
            "Practice tolerating uncertainty in low-stakes situations.",
        )
        .conflicts_with(&["acceptance"]),
        DriverDefinition::new(
            "acceptance",
            "Letting Go",
            "Energy is being withdrawn from goals that feel unreachable.",
            "Genuine acceptance of what cannot be changed.",
            "Premature surrender and disengagement.",
            "Separate what is truly fixed from what is merely hard.",
        )
        .conflicts_with(&["control"]),
        DriverDefinition::new(
            "validation",
            "Need for Validation",
            "Self-worth is outsourced to external judgment.",
            "Taking feedback seriously without being defined by it.",
            "Harsh self-attack whenever standards slip.",
            "Build an internal benchmark that survives criticism.",
        )
        .conflicts_with(&["autonomy"]),
        DriverDefinition::new(
            "autonomy",
            "Need for Autonomy",
            "Identity is defended by pushing back on outside demands.",
            "Clear boundaries held without hostility.",
            "Reflexive opposition even at personal cost.",
            "Distinguish chosen boundaries from automatic refusal.",
        )
        .conflicts_with(&["validation"]),
        DriverDefinition::new(
            "safety",
            "Need for Safety",
            "Attention locks onto worst-case outcomes.",
            "Sensible caution and realistic contingency planning.",
            "Catastrophic forecasting and chronic hedging.",
            "Test predictions against what actually happens.",
        )
        .conflicts_with(&["growth"]),
        DriverDefinition::new(
            "growth",
            "Need for Growth",
            "Longing for change is voiced without a path toward it.",
            "Concrete steps toward a desired future.",
            "Wishful escape that substitutes for action.",
            "Convert one wish into a small testable step.",
        )
        .conflicts_with(&["safety"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_has_a_known_driver() {
        let driver_ids: Vec<String> = drivers().into_iter().map(|d| d.id).collect();
        for pattern in patterns() {
            assert!(
                driver_ids.contains(&pattern.driver),
                "pattern {} names unknown driver {}",
                pattern.id,
                pattern.driver
            );
        }
    }

    #[test]
    fn every_entry_has_a_known_category() {
        let pattern_ids: Vec<String> = patterns().into_iter().map(|p| p.id).collect();
        for entry in entries() {
            assert!(
                pattern_ids.contains(&entry.category),
                "entry {} names unknown category {}",
                entry.word,
                entry.category
            );
        }
    }

    #[test]
    fn contradiction_targets_exist_in_lexicon() {
        let table = entries();
        let words: Vec<&str> = table.iter().map(|e| e.word.as_str()).collect();
        for entry in &table {
            for target in &entry.contradicts {
                assert!(
                    words.contains(&target.as_str()),
                    "entry {} contradicts unknown word {}",
                    entry.word,
                    target
                );
            }
        }
    }

    #[test]
    fn driver_conflicts_are_mutual() {
        let table = drivers();
        for driver in &table {
            for other_id in &driver.conflicts_with {
                let other = table
                    .iter()
                    .find(|d| &d.id == other_id)
                    .unwrap_or_else(|| panic!("unknown driver {other_id}"));
                assert!(other.conflicts_with.contains(&driver.id));
            }
        }
    }
}
