//! Pattern aggregation.
//!
//! Folds individual marker hits into per-category [`PatternScore`]s: raw and
//! negation-discounted totals, positional clusters, an evidence blend and a
//! calibrated confidence.

use std::collections::BTreeMap;

use log::warn;
use mindsift_lexicon::{KnowledgeBase, DEFAULT_SEVERITY_THRESHOLD, DEFAULT_WEIGHT_MULTIPLIER};

use crate::confidence;
use crate::types::{Cluster, Hit, PatternScore, SegmentCounts};

/// Maximum positional gap between neighbouring hits of one cluster
const CLUSTER_GAP: usize = 5;

/// Minimum members for a cluster to count
const CLUSTER_MIN_SIZE: usize = 2;

/// Hit count at which the count factor saturates
const COUNT_SATURATION: f64 = 5.0;

/// Cluster count at which the cluster factor saturates
const CLUSTER_SATURATION: f64 = 3.0;

#[derive(Default)]
struct Accumulator {
    score: f64,
    count: usize,
    weighted: f64,
    negated: usize,
    positions: Vec<usize>,
    subcategories: BTreeMap<String, usize>,
    valences: Vec<f64>,
    segments: SegmentCounts,
}

/// Roll hits up into per-category pattern scores.
///
/// Categories without a pattern definition are scored with defaults and
/// logged rather than dropped.
pub fn aggregate(
    hits: &[Hit],
    token_count: usize,
    knowledge: &KnowledgeBase,
) -> BTreeMap<String, PatternScore> {
    let mut accumulators: BTreeMap<String, Accumulator> = BTreeMap::new();
    for hit in hits {
        let acc = accumulators.entry(hit.category.clone()).or_default();
        acc.score += hit.weight;
        acc.count += 1;
        if hit.negation.negated {
            acc.weighted += hit.weight * 0.5;
            acc.negated += 1;
        } else {
            acc.weighted += hit.weight;
        }
        acc.positions.push(hit.position);
        if let Some(subcategory) = &hit.subcategory {
            *acc.subcategories.entry(subcategory.clone()).or_insert(0) += 1;
        }
        acc.valences.push(hit.valence);
        acc.segments.bump(hit.segment);
    }

    let clusters = find_clusters(hits);

    accumulators
        .into_iter()
        .map(|(category, acc)| {
            let score = score_category(category, acc, &clusters, token_count, knowledge);
            (score.category.clone(), score)
        })
        .collect()
}

fn score_category(
    category: String,
    acc: Accumulator,
    clusters: &[Cluster],
    token_count: usize,
    knowledge: &KnowledgeBase,
) -> PatternScore {
    let (name, driver, threshold, multiplier) = match knowledge.pattern(&category) {
        Some(definition) => (
            definition.name.clone(),
            Some(definition.driver.clone()),
            definition.severity_threshold,
            definition.weight_multiplier,
        ),
        None => {
            warn!("no pattern definition for category '{category}', scoring with defaults");
            (
                category.clone(),
                None,
                DEFAULT_SEVERITY_THRESHOLD,
                DEFAULT_WEIGHT_MULTIPLIER,
            )
        }
    };

    let own_clusters: Vec<Cluster> = clusters
        .iter()
        .filter(|cluster| {
            cluster
                .positions
                .iter()
                .any(|position| acc.positions.contains(position))
        })
        .cloned()
        .collect();

    let count = acc.count as f64;
    let count_factor = (count / COUNT_SATURATION).min(1.0);
    let weight_factor = acc.weighted / (count * COUNT_SATURATION);
    let distribution = distribution_factor(&acc.positions, token_count);
    let cluster_factor = (own_clusters.len() as f64 / CLUSTER_SATURATION).min(1.0);
    let negation_factor = 1.0 - 0.5 * (acc.negated as f64 / count);

    let blend = 0.25 * count_factor
        + 0.25 * weight_factor
        + 0.2 * distribution
        + 0.2 * cluster_factor
        + 0.1 * negation_factor;
    let evidence = (blend * multiplier).clamp(0.0, 1.0);
    let severe = acc.weighted >= threshold;

    PatternScore {
        category,
        name,
        driver,
        score: acc.score,
        count: acc.count,
        weighted_score: acc.weighted,
        positions: acc.positions,
        subcategories: acc.subcategories,
        valences: acc.valences,
        segments: acc.segments,
        clusters: own_clusters,
        evidence,
        confidence: confidence::pattern_confidence(evidence),
        severe,
    }
}

/// Cluster hit positions across all categories.
///
/// A run of hits where each neighbour is at most [`CLUSTER_GAP`] tokens from
/// the previous one forms a cluster; singletons are discarded.
fn find_clusters(hits: &[Hit]) -> Vec<Cluster> {
    let mut positions: Vec<usize> = hits.iter().map(|hit| hit.position).collect();
    positions.sort_unstable();

    let mut clusters = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for position in positions {
        match current.last() {
            Some(&last) if position - last <= CLUSTER_GAP => current.push(position),
            Some(_) => {
                if current.len() >= CLUSTER_MIN_SIZE {
                    clusters.push(into_cluster(current));
                }
                current = vec![position];
            }
            None => current.push(position),
        }
    }
    if current.len() >= CLUSTER_MIN_SIZE {
        clusters.push(into_cluster(current));
    }
    clusters
}

fn into_cluster(positions: Vec<usize>) -> Cluster {
    Cluster {
        start: positions[0],
        end: positions[positions.len() - 1],
        positions,
    }
}

/// How evenly the hits spread across the document.
///
/// Compares the actual gaps between consecutive hits with the ideal gap for
/// that many hits. Even spacing scores near 1, one dense clump or a single
/// huge gap scores near 0. Fewer than two hits is neutral.
fn distribution_factor(positions: &[usize], token_count: usize) -> f64 {
    if positions.len() < 2 || token_count == 0 {
        return 0.5;
    }
    let ideal = token_count as f64 / positions.len() as f64;
    let mean_square = positions
        .windows(2)
        .map(|pair| {
            let gap = (pair[1] - pair[0]) as f64;
            (gap - ideal).powi(2)
        })
        .sum::<f64>()
        / (positions.len() - 1) as f64;
    (1.0 - mean_square.sqrt() / ideal).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerOptions;
    use crate::marker;
    use crate::modifier::ModifierCues;
    use crate::negation::NegationCues;
    use crate::token;
    use mindsift_lexicon::{Intensity, LexiconEntry};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn run(text: &str) -> (Vec<Hit>, usize) {
        let knowledge = KnowledgeBase::shared();
        let options = AnalyzerOptions::default();
        let tokens = token::tokenize(text, true);
        let hits = marker::scan_markers(
            &tokens,
            &knowledge,
            &options,
            &NegationCues::default(),
            &ModifierCues::default(),
        );
        (hits, tokens.len())
    }

    #[test]
    fn test_aggregation_groups_by_category() {
        let (hits, token_count) = run("i always fail and i never win");
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());

        let absolutist = &patterns["absolutist"];
        assert_eq!(absolutist.count, 2);
        assert_eq!(absolutist.positions, vec![1, 5]);
        assert_eq!(absolutist.driver, Some("control".to_string()));
        assert!((absolutist.score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_negated_hits_count_half_toward_weighted_score() {
        let (hits, token_count) = run("i am not a failure today, honestly");
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());

        let critic = &patterns["self_critic"];
        assert_eq!(critic.count, 1);
        assert!(critic.weighted_score < critic.score);
        assert!((critic.weighted_score - critic.score * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_clusters_span_categories_but_attach_per_category() {
        // "always" and "worthless" sit 2 apart, forming one shared cluster
        let (hits, token_count) = run("i always feel worthless when things slip");
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());

        let absolutist = &patterns["absolutist"];
        let critic = &patterns["self_critic"];
        assert_eq!(absolutist.clusters.len(), 1);
        assert_eq!(critic.clusters.len(), 1);
        assert_eq!(absolutist.clusters[0].positions, vec![1, 3]);
    }

    #[test]
    fn test_distant_hits_do_not_cluster() {
        let (hits, token_count) =
            run("always the same story here and yet somehow it was never that");
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());

        // positions 0 and 10, gap of 10 exceeds the cluster gap
        let absolutist = &patterns["absolutist"];
        assert_eq!(absolutist.positions, vec![0, 10]);
        assert!(absolutist.clusters.is_empty());
    }

    #[test]
    fn test_severe_flag_tracks_weighted_score() {
        let (hits, token_count) = run("i am worthless and useless and pathetic");
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());

        let critic = &patterns["self_critic"];
        assert!(critic.weighted_score >= 2.0);
        assert!(critic.severe);

        let (hits, token_count) = run("i am slightly useless at chess somehow");
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());
        assert!(!patterns["self_critic"].severe);
    }

    #[test]
    fn test_unknown_category_scores_with_defaults() {
        let knowledge = Arc::new(
            KnowledgeBase::new(
                vec![LexiconEntry::new("glorp", "made_up", 1.5, Intensity::High, -0.5)],
                Vec::new(),
                Vec::new(),
            )
            .unwrap(),
        );
        let options = AnalyzerOptions::default();
        let tokens = token::tokenize("glorp glorp glorp all the way down", true);
        let hits = marker::scan_markers(
            &tokens,
            &knowledge,
            &options,
            &NegationCues::default(),
            &ModifierCues::default(),
        );
        let patterns = aggregate(&hits, tokens.len(), &knowledge);

        let made_up = &patterns["made_up"];
        assert_eq!(made_up.name, "made_up");
        assert_eq!(made_up.driver, None);
        assert_eq!(made_up.count, 3);
    }

    #[test]
    fn test_distribution_factor_rewards_even_spread() {
        let even = distribution_factor(&[0, 10, 20, 30], 40);
        let clumped = distribution_factor(&[0, 1, 2, 30], 40);
        assert!(even > clumped);
        assert_eq!(distribution_factor(&[7], 40), 0.5);
    }

    #[test]
    fn test_confidence_and_evidence_bounded() {
        let (hits, token_count) = run(
            "i always fail, i never win, everything is ruined and nothing works, \
             i am worthless and it is hopeless",
        );
        let patterns = aggregate(&hits, token_count, &KnowledgeBase::shared());
        assert!(!patterns.is_empty());
        for score in patterns.values() {
            assert!((0.0..=1.0).contains(&score.evidence));
            assert!((0.05..=0.95).contains(&score.confidence));
        }
    }
}
