use log::trace;
use mindsift_lexicon::{KnowledgeBase, LexiconEntry};

use crate::config::AnalyzerOptions;
use crate::context::{self, ContextWindow};
use crate::modifier::{self, ModifierCues};
use crate::negation::{self, NegationCues};
use crate::token::Token;
use crate::types::{Hit, Segment};

/// Weight floor applied after negation and modifier adjustment
const WEIGHT_FLOOR: f64 = 0.1;

/// Scan the token stream for lexicon markers and emit adjusted hits.
///
/// Context-gated entries only match when one of their needles appears in the
/// preceding or full window text; the matching rule overrides weight and
/// subcategory. Detections at or below the minimum threshold are dropped.
pub fn scan_markers(
    tokens: &[Token],
    knowledge: &KnowledgeBase,
    options: &AnalyzerOptions,
    negation_cues: &NegationCues,
    modifier_cues: &ModifierCues,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if token.punctuation {
            continue;
        }
        let Some(entry) = knowledge.entry(&token.word) else {
            continue;
        };

        let window = context::extract(tokens, index, options.context_window);
        let Some((weight, subcategory, matched)) = resolve_context(entry, &window) else {
            trace!("context gate rejected '{}' at {}", token.word, index);
            continue;
        };

        let negation = negation::detect(tokens, index, negation_cues);
        let modifier = modifier::analyze(tokens, index, modifier_cues);

        let negation_scale = if negation.negated {
            1.0 - negation.strength
        } else {
            1.0
        };
        let adjusted = (weight * negation_scale * modifier.multiplier).max(WEIGHT_FLOOR);

        if adjusted <= options.min_confidence {
            trace!(
                "dropped sub-threshold '{}' at {} (weight {:.3})",
                token.word,
                index,
                adjusted
            );
            continue;
        }

        hits.push(Hit {
            word: token.word.clone(),
            original: token.original.clone(),
            position: token.position,
            offset: token.offset,
            category: entry.category.clone(),
            subcategory,
            base_weight: entry.weight,
            weight: adjusted,
            negation,
            modifier,
            context: matched,
            segment: Segment::of(token.position, tokens.len(), options.temporal_segments),
            valence: entry.valence,
            sentence: token.sentence,
        });
    }

    hits
}

/// Resolve the effective weight and subcategory for an entry.
///
/// Returns `None` when a context-required entry has no matching rule.
fn resolve_context(
    entry: &LexiconEntry,
    window: &ContextWindow<'_>,
) -> Option<(f64, Option<String>, Option<String>)> {
    if !entry.context_required {
        return Some((entry.weight, entry.subcategory.clone(), None));
    }

    let preceding = window.preceding_text();
    let full = window.window_text();
    for rule in &entry.contexts {
        if preceding.contains(&rule.needle) || full.contains(&rule.needle) {
            let subcategory = rule
                .subcategory
                .clone()
                .or_else(|| entry.subcategory.clone());
            return Some((rule.weight, subcategory, Some(rule.needle.clone())));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;
    use mindsift_lexicon::KnowledgeBase;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Vec<Hit> {
        let knowledge = KnowledgeBase::builtin();
        let options = AnalyzerOptions::default();
        let tokens = tokenize(text, true);
        scan_markers(
            &tokens,
            &knowledge,
            &options,
            &NegationCues::default(),
            &ModifierCues::default(),
        )
    }

    fn hit<'a>(hits: &'a [Hit], word: &str) -> &'a Hit {
        hits.iter()
            .find(|h| h.word == word)
            .unwrap_or_else(|| panic!("no hit for {word}"))
    }

    #[test]
    fn plain_marker_keeps_base_weight() {
        let hits = scan("i feel like a failure today");
        let failure = hit(&hits, "failure");
        assert_eq!(failure.category, "self_critic");
        assert_eq!(failure.base_weight, failure.weight);
        assert!(!failure.negation.negated);
    }

    #[test]
    fn context_gate_blocks_and_admits() {
        // bare "perfect" never fires; "be perfect" does, with the override
        let blocked = scan("the weather was perfect yesterday morning");
        assert!(blocked.iter().all(|h| h.word != "perfect"));

        let admitted = scan("i should always be perfect for them");
        let perfect = hit(&admitted, "perfect");
        assert_eq!(perfect.weight, 2.0);
        assert_eq!(perfect.context.as_deref(), Some("be perfect"));
        assert_eq!(perfect.subcategory.as_deref(), Some("self_standard"));
    }

    #[test]
    fn negation_reduces_weight() {
        let hits = scan("i am not a failure whatsoever");
        let failure = hit(&hits, "failure");
        assert!(failure.negation.negated);
        // 1.8 * (1 - 1.0*(1 - 2/6))
        assert!((failure.weight - 1.8 * (1.0 - (1.0 - 2.0 / 6.0))).abs() < 1e-9);
    }

    #[test]
    fn test_sub_threshold_detection_dropped() {
        // "not" directly before the marker: 1.5 * (1 - 5/6) = 0.25 < 0.3
        let hits = scan("this is not impossible for me");
        assert!(hits.iter().all(|h| h.word != "impossible"));
    }

    #[test]
    fn amplifier_raises_weight() {
        let hits = scan("i am utterly worthless at this");
        let worthless = hit(&hits, "worthless");
        assert!((worthless.weight - 2.0 * 1.4).abs() < 1e-9);
        assert_eq!(worthless.modifier.intensifiers, vec!["utterly".to_string()]);
    }

    #[test]
    fn punctuation_tokens_never_match() {
        let hits = scan("always. never. always.");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| !h.word.contains('.')));
    }

    #[test]
    fn hits_carry_segments_in_document_order() {
        let hits = scan("i always fail and i never win but sometimes i still hope somehow");
        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert_eq!(hit(&hits, "always").segment, Segment::Early);
        assert_eq!(hit(&hits, "hope").segment, Segment::Late);
    }
}
