//! Confidence calibration.
//!
//! Raw evidence blends are squashed through a logistic curve so reported
//! confidence is never exactly certain or impossible. Conflicts use a prior
//! scaled by severity, clarity of the conflict class and variant-specific
//! evidence.

use std::collections::BTreeMap;

use crate::types::{Conflict, ConflictKind, DriverScore, PatternScore};

/// Lowest reportable confidence
pub const CONFIDENCE_FLOOR: f64 = 0.05;

/// Highest reportable confidence
pub const CONFIDENCE_CEIL: f64 = 0.95;

/// Prior probability a detected conflict is meaningful
const CONFLICT_PRIOR: f64 = 0.4;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn clamp(value: f64) -> f64 {
    value.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL)
}

/// Calibrate a pattern's evidence blend (0.5 evidence maps to 0.5)
#[must_use]
pub fn pattern_confidence(evidence: f64) -> f64 {
    clamp(sigmoid(10.0 * evidence - 5.0))
}

/// Calibrate a driver from its best contributing pattern confidence
#[must_use]
pub fn driver_confidence(best_pattern_confidence: f64) -> f64 {
    clamp(sigmoid(8.0 * best_pattern_confidence - 4.0))
}

/// Calibrate a conflict from its severity and variant
#[must_use]
pub fn conflict_confidence(kind: &ConflictKind, severity: f64) -> f64 {
    let severity_factor = 1.0 + (severity / 2.0).min(1.0);
    let raw = CONFLICT_PRIOR * severity_factor * clarity(kind) * (0.8 + 0.4 * evidence(kind));
    clamp(raw)
}

/// How unambiguous each conflict class is
fn clarity(kind: &ConflictKind) -> f64 {
    match kind {
        ConflictKind::LexicalContradiction { .. } => 1.0,
        ConflictKind::DriverConflict { .. } => 0.95,
        ConflictKind::SelfNegation { .. } => 0.85,
        ConflictKind::PatternConflict { .. } => 0.8,
        ConflictKind::TemporalConflict { .. } => 0.75,
        ConflictKind::ModifierConflict { .. } => 0.7,
    }
}

/// Variant-specific supporting evidence in [0, 1]
fn evidence(kind: &ConflictKind) -> f64 {
    match kind {
        ConflictKind::LexicalContradiction { first, second, .. } => {
            ((first.weight + second.weight) / 4.0).min(1.0)
        }
        ConflictKind::SelfNegation { weight, .. }
        | ConflictKind::ModifierConflict { weight, .. } => (weight / 3.0).min(1.0),
        ConflictKind::DriverConflict {
            first_score,
            second_score,
            ..
        } => ((first_score + second_score) / 10.0).min(1.0),
        ConflictKind::PatternConflict {
            first_confidence,
            second_confidence,
            ..
        } => (first_confidence + second_confidence) / 2.0,
        ConflictKind::TemporalConflict { .. } => 0.6,
    }
}

/// Blend per-layer confidences and coherence into one composite.
///
/// Missing layers fall back to neutral values: no patterns or drivers count
/// as zero, no conflicts as 0.5.
#[must_use]
pub fn composite(
    patterns: &BTreeMap<String, PatternScore>,
    drivers: &BTreeMap<String, DriverScore>,
    conflicts: &[Conflict],
    coherence: f64,
) -> f64 {
    let pattern_avg = mean(patterns.values().map(|p| p.confidence)).unwrap_or(0.0);
    let driver_avg = mean(drivers.values().map(|d| d.confidence)).unwrap_or(0.0);
    let conflict_avg = mean(conflicts.iter().map(|c| c.confidence)).unwrap_or(0.5);
    0.4 * pattern_avg + 0.3 * driver_avg + 0.2 * conflict_avg + 0.1 * coherence
}

/// Arithmetic mean, `None` for an empty sequence
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}
