//! Conflict detection.
//!
//! Six independent scans over the analysis layers, each producing
//! [`Conflict`]s with a severity and an interpretation: lexical
//! contradictions between hits, strongly-asserted markers under negation,
//! markers amplified and hedged at once, opposing drivers both scoring high,
//! patterns in declared tension, and arcs that resolve while a sibling on
//! the same driver escalates.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;
use mindsift_lexicon::{KnowledgeBase, PatternRelation};

use crate::confidence;
use crate::types::{
    ArcShape, Conflict, ConflictItem, ConflictKind, DriverScore, Hit, PatternScore, TemporalShift,
};

/// Token distance over which a lexical contradiction decays to nothing
const LEXICAL_RANGE: f64 = 20.0;

/// Distance factor a lexical pair must exceed to be reported
const LEXICAL_CUTOFF: f64 = 0.3;

/// Adjusted weight above which a negated hit contradicts itself
const SELF_NEGATION_THRESHOLD: f64 = 1.5;

/// Normalized score both drivers need for a driver conflict
const DRIVER_SCORE_GATE: f64 = 3.0;

/// Confidence both patterns need for a pattern conflict
const PATTERN_CONFIDENCE_GATE: f64 = 0.5;

/// Fixed severity of a temporal arc conflict
const TEMPORAL_SEVERITY: f64 = 0.6;

/// Coherence reported when no conflicts were found
const BASELINE_COHERENCE: f64 = 0.9;

/// Run all conflict scans and rank the results by severity.
pub fn detect_conflicts(
    hits: &[Hit],
    patterns: &BTreeMap<String, PatternScore>,
    drivers: &BTreeMap<String, DriverScore>,
    temporal: &TemporalShift,
    knowledge: &KnowledgeBase,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    lexical_contradictions(hits, knowledge, &mut conflicts);
    self_negations(hits, &mut conflicts);
    modifier_conflicts(hits, &mut conflicts);
    driver_conflicts(drivers, knowledge, &mut conflicts);
    pattern_conflicts(patterns, knowledge, &mut conflicts);
    temporal_conflicts(temporal, knowledge, &mut conflicts);

    conflicts.sort_by(|a, b| {
        b.severity
            .partial_cmp(&a.severity)
            .unwrap_or(Ordering::Equal)
    });
    debug!("detected {} conflicts", conflicts.len());
    conflicts
}

/// Narrative coherence from the detected conflicts.
///
/// A text with no conflicts is coherent but never perfectly so; average
/// conflict severity erodes the score down to a floor of 0.1.
#[must_use]
pub fn coherence(conflicts: &[Conflict]) -> f64 {
    if conflicts.is_empty() {
        return BASELINE_COHERENCE;
    }
    let total: f64 = conflicts.iter().map(|c| c.severity).sum();
    (1.0 - total / (2.0 * conflicts.len() as f64)).max(0.1)
}

fn push(out: &mut Vec<Conflict>, kind: ConflictKind, severity: f64, interpretation: String) {
    let confidence = confidence::conflict_confidence(&kind, severity);
    out.push(Conflict {
        kind,
        severity,
        confidence,
        interpretation,
    });
}

/// Ordered pairs of hits whose lexicon entries contradict each other,
/// weighted down as the pair drifts apart in the text.
fn lexical_contradictions(hits: &[Hit], knowledge: &KnowledgeBase, out: &mut Vec<Conflict>) {
    for (i, first) in hits.iter().enumerate() {
        let Some(entry) = knowledge.entry(&first.word) else {
            continue;
        };
        if entry.contradicts.is_empty() {
            continue;
        }
        for second in &hits[i + 1..] {
            if !entry.contradicts.contains(&second.word) {
                continue;
            }
            let distance = second.position - first.position;
            let distance_factor = (1.0 - distance as f64 / LEXICAL_RANGE).max(0.0);
            if distance_factor <= LEXICAL_CUTOFF {
                continue;
            }
            let severity = (first.weight + second.weight) * distance_factor * 0.5;
            let interpretation = format!(
                "\"{}\" and \"{}\" pull in opposite directions within {} tokens",
                first.word, second.word, distance
            );
            push(
                out,
                ConflictKind::LexicalContradiction {
                    first: conflict_item(first),
                    second: conflict_item(second),
                    distance,
                },
                severity,
                interpretation,
            );
        }
    }
}

fn conflict_item(hit: &Hit) -> ConflictItem {
    ConflictItem {
        word: hit.word.clone(),
        position: hit.position,
        category: hit.category.clone(),
        weight: hit.weight,
    }
}

/// Markers that stay strong even after the negation discount.
fn self_negations(hits: &[Hit], out: &mut Vec<Conflict>) {
    for hit in hits {
        if !hit.negation.negated || hit.weight <= SELF_NEGATION_THRESHOLD {
            continue;
        }
        let interpretation = format!(
            "\"{}\" is negated yet still lands with weight {:.2}",
            hit.word, hit.weight
        );
        push(
            out,
            ConflictKind::SelfNegation {
                word: hit.word.clone(),
                position: hit.position,
                weight: hit.weight,
            },
            hit.weight * 0.25,
            interpretation,
        );
    }
}

/// Markers amplified and diminished in the same window.
fn modifier_conflicts(hits: &[Hit], out: &mut Vec<Conflict>) {
    for hit in hits {
        if !hit.modifier.conflicted {
            continue;
        }
        let interpretation = format!(
            "\"{}\" is both amplified ({}) and hedged ({})",
            hit.word,
            hit.modifier.intensifiers.join(", "),
            hit.modifier.diminishers.join(", ")
        );
        push(
            out,
            ConflictKind::ModifierConflict {
                word: hit.word.clone(),
                position: hit.position,
                weight: hit.weight,
                intensifiers: hit.modifier.intensifiers.clone(),
                diminishers: hit.modifier.diminishers.clone(),
            },
            hit.weight * 0.15,
            interpretation,
        );
    }
}

/// Pairs of mutually-opposed drivers that both score high.
fn driver_conflicts(
    drivers: &BTreeMap<String, DriverScore>,
    knowledge: &KnowledgeBase,
    out: &mut Vec<Conflict>,
) {
    for (first, second) in drivers.values().tuple_combinations() {
        if first.normalized <= DRIVER_SCORE_GATE || second.normalized <= DRIVER_SCORE_GATE {
            continue;
        }
        if !drivers_oppose(knowledge, &first.driver, &second.driver) {
            continue;
        }
        let severity = (first.normalized + second.normalized) / 20.0;
        let interpretation = format!(
            "{} and {} are both strongly active but work against each other",
            first.name, second.name
        );
        push(
            out,
            ConflictKind::DriverConflict {
                first: first.driver.clone(),
                second: second.driver.clone(),
                first_score: first.normalized,
                second_score: second.normalized,
            },
            severity,
            interpretation,
        );
    }
}

fn drivers_oppose(knowledge: &KnowledgeBase, a: &str, b: &str) -> bool {
    let forward = knowledge
        .driver(a)
        .is_some_and(|d| d.conflicts_with.iter().any(|c| c == b));
    let backward = knowledge
        .driver(b)
        .is_some_and(|d| d.conflicts_with.iter().any(|c| c == a));
    forward || backward
}

/// Pattern pairs in declared tension.
///
/// A `Conflicts` relation is a direct tension. A `Reinforces` relation still
/// conflicts when the two patterns feed opposing drivers, since the text is
/// then reinforcing both sides of a contradiction.
fn pattern_conflicts(
    patterns: &BTreeMap<String, PatternScore>,
    knowledge: &KnowledgeBase,
    out: &mut Vec<Conflict>,
) {
    for (first, second) in patterns.values().tuple_combinations() {
        if first.confidence <= PATTERN_CONFIDENCE_GATE
            || second.confidence <= PATTERN_CONFIDENCE_GATE
        {
            continue;
        }
        let reinforcing = match knowledge.relation(&first.category, &second.category) {
            Some(PatternRelation::Conflicts) => false,
            Some(PatternRelation::Reinforces) => {
                let (Some(first_driver), Some(second_driver)) = (&first.driver, &second.driver)
                else {
                    continue;
                };
                if first_driver == second_driver
                    || !drivers_oppose(knowledge, first_driver, second_driver)
                {
                    continue;
                }
                true
            }
            None => continue,
        };
        let severity = (first.confidence + second.confidence) / 2.0;
        let interpretation = if reinforcing {
            format!(
                "{} feeds {} even though their underlying needs oppose",
                first.name, second.name
            )
        } else {
            format!("{} and {} contradict each other", first.name, second.name)
        };
        push(
            out,
            ConflictKind::PatternConflict {
                first: first.category.clone(),
                second: second.category.clone(),
                first_confidence: first.confidence,
                second_confidence: second.confidence,
                reinforcing,
            },
            severity,
            interpretation,
        );
    }
}

/// One arc resolving while another on the same driver escalates.
fn temporal_conflicts(
    temporal: &TemporalShift,
    knowledge: &KnowledgeBase,
    out: &mut Vec<Conflict>,
) {
    for ((cat_a, arc_a), (cat_b, arc_b)) in temporal.arcs.iter().tuple_combinations() {
        let (resolving, escalating) = match (arc_a, arc_b) {
            (ArcShape::Resolving, ArcShape::Escalating) => (cat_a, cat_b),
            (ArcShape::Escalating, ArcShape::Resolving) => (cat_b, cat_a),
            _ => continue,
        };
        let driver_of = |category: &str| {
            knowledge
                .pattern(category)
                .map(|definition| definition.driver.clone())
        };
        let (Some(first_driver), Some(second_driver)) = (driver_of(resolving), driver_of(escalating))
        else {
            continue;
        };
        if first_driver != second_driver {
            continue;
        }
        let interpretation = format!(
            "{escalating} builds up while {resolving} winds down around the same need"
        );
        push(
            out,
            ConflictKind::TemporalConflict {
                driver: first_driver,
                resolving: resolving.clone(),
                escalating: escalating.clone(),
            },
            TEMPORAL_SEVERITY,
            interpretation,
        );
    }
}
