//! Driver inference.
//!
//! Maps scored pattern categories onto the underlying drivers their
//! definitions name, producing per-driver totals, a normalized 0-10 score,
//! an intensity blend and ranked contributors.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::warn;
use mindsift_lexicon::KnowledgeBase;

use crate::confidence;
use crate::types::{DriverContribution, DriverScore, PatternScore};

/// Normalized score at which a driver counts as primary
pub const PRIMARY_THRESHOLD: f64 = 5.0;

/// Weighted score that maps to the top of the normalized scale
const NORMALIZATION_SPAN: f64 = 50.0;

/// Mean hit weight at which intensity saturates
const INTENSITY_WEIGHT_CEIL: f64 = 3.0;

struct Accumulator {
    name: String,
    insight: String,
    raw: f64,
    weighted: f64,
    hit_count: usize,
    best_confidence: f64,
    contributors: Vec<DriverContribution>,
}

/// Fold pattern scores into driver scores.
///
/// Categories whose definition names an unknown driver are skipped with a
/// warning; categories without a driver were already logged during
/// aggregation.
pub fn infer_drivers(
    patterns: &BTreeMap<String, PatternScore>,
    knowledge: &KnowledgeBase,
) -> BTreeMap<String, DriverScore> {
    let mut accumulators: BTreeMap<String, Accumulator> = BTreeMap::new();

    for pattern in patterns.values() {
        let Some(driver_id) = &pattern.driver else {
            continue;
        };
        let Some(definition) = knowledge.driver(driver_id) else {
            warn!(
                "pattern '{}' names unknown driver '{}', skipping contribution",
                pattern.category, driver_id
            );
            continue;
        };
        let multiplier = knowledge
            .pattern(&pattern.category)
            .map_or(1.0, |def| def.weight_multiplier);
        let contribution = pattern.weighted_score * multiplier;

        let acc = accumulators
            .entry(driver_id.clone())
            .or_insert_with(|| Accumulator {
                name: definition.name.clone(),
                insight: definition.insight.clone(),
                raw: 0.0,
                weighted: 0.0,
                hit_count: 0,
                best_confidence: 0.0,
                contributors: Vec::new(),
            });
        acc.raw += pattern.score;
        acc.weighted += contribution;
        acc.hit_count += pattern.count;
        acc.best_confidence = acc.best_confidence.max(pattern.confidence);
        acc.contributors.push(DriverContribution {
            category: pattern.category.clone(),
            contribution,
            confidence: pattern.confidence,
        });
    }

    accumulators
        .into_iter()
        .map(|(driver_id, mut acc)| {
            acc.contributors.sort_by(|a, b| {
                b.contribution
                    .partial_cmp(&a.contribution)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.category.cmp(&b.category))
            });

            let normalized = (acc.weighted / NORMALIZATION_SPAN * 10.0).min(10.0);
            let mean_hit_weight = if acc.hit_count == 0 {
                0.0
            } else {
                acc.raw / acc.hit_count as f64
            };
            let intensity = 0.6 * (normalized / 10.0)
                + 0.4 * (mean_hit_weight / INTENSITY_WEIGHT_CEIL).min(1.0);

            let score = DriverScore {
                driver: driver_id.clone(),
                name: acc.name,
                score: acc.raw,
                weighted_score: acc.weighted,
                normalized,
                confidence: confidence::driver_confidence(acc.best_confidence),
                primary: normalized >= PRIMARY_THRESHOLD,
                intensity,
                contributors: acc.contributors,
                insight: acc.insight,
            };
            (driver_id, score)
        })
        .collect()
}
