use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::builtin;
use crate::driver::DriverDefinition;
use crate::entry::LexiconEntry;
use crate::error::{LexiconError, Result};
use crate::pattern::{PatternDefinition, PatternRelation};

static SHARED: Lazy<Arc<KnowledgeBase>> = Lazy::new(|| Arc::new(KnowledgeBase::builtin()));

/// Immutable bundle of marker entries, pattern definitions, driver
/// definitions and the derived pattern relationship table.
///
/// Construction validates the tables once; afterwards the base is read-only
/// and safe to share across threads.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: BTreeMap<String, LexiconEntry>,
    patterns: BTreeMap<String, PatternDefinition>,
    drivers: BTreeMap<String, DriverDefinition>,
    relations: BTreeMap<(String, String), PatternRelation>,
}

impl KnowledgeBase {
    /// Assemble a knowledge base from its parts, validating as it goes.
    ///
    /// Rejects duplicate words/ids, non-positive or non-finite weights,
    /// valences outside [-1, 1] and context-required entries without rules.
    /// A pattern referencing an unknown driver is tolerated here; the
    /// pipeline skips such patterns during driver inference.
    pub fn new(
        entries: Vec<LexiconEntry>,
        patterns: Vec<PatternDefinition>,
        drivers: Vec<DriverDefinition>,
    ) -> Result<Self> {
        let mut entry_map = BTreeMap::new();
        for entry in entries {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(LexiconError::invalid_weight(&entry.word, entry.weight));
            }
            if !entry.valence.is_finite() || !(-1.0..=1.0).contains(&entry.valence) {
                return Err(LexiconError::invalid_valence(&entry.word, entry.valence));
            }
            if entry.context_required && entry.contexts.is_empty() {
                return Err(LexiconError::MissingContextRules(entry.word));
            }
            for rule in &entry.contexts {
                if !rule.weight.is_finite() || rule.weight <= 0.0 {
                    return Err(LexiconError::invalid_weight(&entry.word, rule.weight));
                }
            }
            let word = entry.word.clone();
            if entry_map.insert(word.clone(), entry).is_some() {
                return Err(LexiconError::DuplicateWord(word));
            }
        }

        let mut pattern_map = BTreeMap::new();
        for pattern in patterns {
            let id = pattern.id.clone();
            if pattern_map.insert(id.clone(), pattern).is_some() {
                return Err(LexiconError::DuplicatePattern(id));
            }
        }

        let mut driver_map = BTreeMap::new();
        for driver in drivers {
            let id = driver.id.clone();
            if driver_map.insert(id.clone(), driver).is_some() {
                return Err(LexiconError::DuplicateDriver(id));
            }
        }

        let relations = build_relations(&pattern_map);

        Ok(Self {
            entries: entry_map,
            patterns: pattern_map,
            drivers: driver_map,
            relations,
        })
    }

    /// Fresh copy of the bundled tables
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin::entries(), builtin::patterns(), builtin::drivers())
            .expect("bundled knowledge tables are valid")
    }

    /// Process-wide handle to the bundled tables
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Look up the entry for a normalized word
    #[must_use]
    pub fn entry(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    /// Look up a pattern definition by category id
    #[must_use]
    pub fn pattern(&self, id: &str) -> Option<&PatternDefinition> {
        self.patterns.get(id)
    }

    /// Look up a driver definition by id
    #[must_use]
    pub fn driver(&self, id: &str) -> Option<&DriverDefinition> {
        self.drivers.get(id)
    }

    /// Declared relationship between two categories, if any.
    ///
    /// The table is symmetric; argument order does not matter.
    #[must_use]
    pub fn relation(&self, a: &str, b: &str) -> Option<PatternRelation> {
        let key = relation_key(a, b);
        self.relations.get(&key).copied()
    }

    /// Iterate entries in word order
    pub fn entries(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.entries.values()
    }

    /// Iterate pattern definitions in id order
    pub fn patterns(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.patterns.values()
    }

    /// Iterate driver definitions in id order
    pub fn drivers(&self) -> impl Iterator<Item = &DriverDefinition> {
        self.drivers.values()
    }

    /// Number of marker entries
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of pattern definitions
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

fn relation_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Flatten per-pattern relation lists into one symmetric table.
///
/// Conflicts win over Reinforces when both are declared for a pair.
fn build_relations(
    patterns: &BTreeMap<String, PatternDefinition>,
) -> BTreeMap<(String, String), PatternRelation> {
    let mut relations = BTreeMap::new();
    for pattern in patterns.values() {
        for other in &pattern.conflicts_with {
            relations.insert(relation_key(&pattern.id, other), PatternRelation::Conflicts);
        }
    }
    for pattern in patterns.values() {
        for other in &pattern.reinforces {
            relations
                .entry(relation_key(&pattern.id, other))
                .or_insert(PatternRelation::Reinforces);
        }
    }
    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Intensity;
    use pretty_assertions::assert_eq;

    fn entry(word: &str, weight: f64, valence: f64) -> LexiconEntry {
        LexiconEntry::new(word, "absolutist", weight, Intensity::Moderate, valence)
    }

    #[test]
    fn builtin_tables_validate() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.entry_count() > 50);
        assert!(kb.pattern_count() >= 10);
        assert!(kb.entry("always").is_some());
        assert!(kb.entry("Always").is_none());
    }

    #[test]
    fn shared_handle_points_at_builtin() {
        let shared = KnowledgeBase::shared();
        assert_eq!(shared.entry_count(), KnowledgeBase::builtin().entry_count());
    }

    #[test]
    fn rejects_duplicate_word() {
        let err = KnowledgeBase::new(
            vec![entry("always", 1.5, -0.2), entry("always", 1.0, 0.0)],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, LexiconError::DuplicateWord(w) if w == "always"));
    }

    #[test]
    fn rejects_bad_weight_and_valence() {
        let err = KnowledgeBase::new(vec![entry("x", 0.0, 0.0)], vec![], vec![]).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidWeight { .. }));

        let err = KnowledgeBase::new(vec![entry("x", 1.0, 1.5)], vec![], vec![]).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidValence { .. }));
    }

    #[test]
    fn rejects_context_required_without_rules() {
        let mut bare = entry("perfect", 1.0, 0.0);
        bare.context_required = true;
        let err = KnowledgeBase::new(vec![bare], vec![], vec![]).unwrap_err();
        assert!(matches!(err, LexiconError::MissingContextRules(w) if w == "perfect"));
    }

    #[test]
    fn relation_table_is_symmetric() {
        let patterns = vec![
            PatternDefinition::new("a", "A", "d1").conflicts_with(&["b"]),
            PatternDefinition::new("b", "B", "d2").reinforces(&["c"]),
            PatternDefinition::new("c", "C", "d1"),
        ];
        let kb = KnowledgeBase::new(vec![], patterns, vec![]).unwrap();

        assert_eq!(kb.relation("a", "b"), Some(PatternRelation::Conflicts));
        assert_eq!(kb.relation("b", "a"), Some(PatternRelation::Conflicts));
        assert_eq!(kb.relation("b", "c"), Some(PatternRelation::Reinforces));
        assert_eq!(kb.relation("a", "c"), None);
    }

    #[test]
    fn conflict_wins_over_reinforce() {
        let patterns = vec![
            PatternDefinition::new("a", "A", "d1").reinforces(&["b"]),
            PatternDefinition::new("b", "B", "d2").conflicts_with(&["a"]),
        ];
        let kb = KnowledgeBase::new(vec![], patterns, vec![]).unwrap();
        assert_eq!(kb.relation("a", "b"), Some(PatternRelation::Conflicts));
    }
}
