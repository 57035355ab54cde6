//! Temporal shift analysis.
//!
//! Splits the document into early, middle and late segments, profiles each
//! pattern's weight per segment, reports significant shifts between adjacent
//! segments and classifies the overall arc of each pattern.

use std::collections::BTreeMap;

use crate::types::{
    ArcShape, Hit, PatternShift, Segment, SegmentWeights, ShiftDirection, TemporalShift,
};

/// Minimum absolute weight change between segments to report a shift
const SHIFT_THRESHOLD: f64 = 1.0;

/// Profile hits over time and derive shifts and arcs.
pub fn analyze_shifts(hits: &[Hit]) -> TemporalShift {
    let mut profiles: BTreeMap<String, SegmentWeights> = BTreeMap::new();
    for hit in hits {
        profiles
            .entry(hit.category.clone())
            .or_default()
            .add(hit.segment, hit.weight);
    }

    let mut shifts = Vec::new();
    let mut arcs = BTreeMap::new();
    for (category, profile) in &profiles {
        for (from, to) in [
            (Segment::Early, Segment::Middle),
            (Segment::Middle, Segment::Late),
        ] {
            let previous = profile.get(from);
            let current = profile.get(to);
            let change = current - previous;
            if change.abs() <= SHIFT_THRESHOLD {
                continue;
            }
            let (percent_change, direction) = if previous == 0.0 {
                (100.0, ShiftDirection::Emerging)
            } else if change > 0.0 {
                (change / previous * 100.0, ShiftDirection::Escalating)
            } else {
                (change / previous * 100.0, ShiftDirection::Diminishing)
            };
            shifts.push(PatternShift {
                category: category.clone(),
                from,
                to,
                previous,
                current,
                change,
                percent_change,
                direction,
            });
        }
        arcs.insert(category.clone(), classify_arc(profile));
    }

    TemporalShift {
        profiles,
        shifts,
        arcs,
    }
}

/// Classify the early/middle/late weight curve.
///
/// Comparisons are strict, so any tie short of a full plateau falls through
/// to [`ArcShape::Fluctuating`].
fn classify_arc(profile: &SegmentWeights) -> ArcShape {
    let (early, middle, late) = (profile.early, profile.middle, profile.late);
    if early == middle && middle == late {
        ArcShape::Plateau
    } else if early < middle && middle < late {
        ArcShape::Escalating
    } else if early > middle && middle > late {
        ArcShape::Resolving
    } else if middle > early && middle > late {
        ArcShape::PeakingMiddle
    } else if middle < early && middle < late {
        ArcShape::DipRecovery
    } else {
        ArcShape::Fluctuating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerOptions;
    use crate::marker;
    use crate::modifier::ModifierCues;
    use crate::negation::NegationCues;
    use crate::token;
    use mindsift_lexicon::KnowledgeBase;
    use pretty_assertions::assert_eq;

    fn shifts_for(text: &str) -> TemporalShift {
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
        analyze_shifts(&hits)
    }

    #[test]
    fn test_even_spread_is_a_plateau_with_no_shifts() {
        // one absolutist hit of equal weight in each third
        let temporal = shifts_for("always aa bb always cc dd always ee ff");

        let profile = &temporal.profiles["absolutist"];
        assert_eq!(profile.early, profile.middle);
        assert_eq!(profile.middle, profile.late);
        assert!(temporal.shifts.is_empty());
        assert_eq!(temporal.arcs["absolutist"], ArcShape::Plateau);
    }

    #[test]
    fn test_growing_weight_escalates() {
        // one early hit, two middle, three late
        let temporal = shifts_for(
            "always aa bb cc dd always always ee always always always",
        );

        assert_eq!(temporal.arcs["absolutist"], ArcShape::Escalating);
        assert_eq!(temporal.shifts.len(), 2);
        for shift in &temporal.shifts {
            assert_eq!(shift.direction, ShiftDirection::Escalating);
            assert!(shift.change > SHIFT_THRESHOLD);
        }
    }

    #[test]
    fn test_late_onset_pattern_emerges() {
        let temporal =
            shifts_for("aa bb cc dd ee ff gg hh worthless pathetic useless");

        let emerging: Vec<&PatternShift> = temporal
            .shifts
            .iter()
            .filter(|s| s.direction == ShiftDirection::Emerging)
            .collect();
        assert!(!emerging.is_empty());
        assert!((emerging[0].percent_change - 100.0).abs() < 1e-9);
        assert_eq!(emerging[0].previous, 0.0);
    }

    #[test]
    fn test_small_changes_are_not_reported() {
        // hedging swings by exactly 1.0 per segment, at the threshold
        let temporal = shifts_for("sometimes aa bb cc dd ee sometimes hh ff");
        assert!(!temporal.profiles.is_empty());
        assert!(temporal.shifts.is_empty());
    }

    #[test]
    fn test_middle_peak_classified() {
        let profile = SegmentWeights {
            early: 1.0,
            middle: 4.0,
            late: 1.5,
        };
        assert_eq!(classify_arc(&profile), ArcShape::PeakingMiddle);

        let dip = SegmentWeights {
            early: 3.0,
            middle: 0.5,
            late: 2.0,
        };
        assert_eq!(classify_arc(&dip), ArcShape::DipRecovery);

        let mixed = SegmentWeights {
            early: 2.0,
            middle: 2.0,
            late: 4.0,
        };
        assert_eq!(classify_arc(&mixed), ArcShape::Fluctuating);
    }

    #[test]
    fn test_no_hits_no_output() {
        let temporal = analyze_shifts(&[]);
        assert!(temporal.profiles.is_empty());
        assert!(temporal.shifts.is_empty());
        assert!(temporal.arcs.is_empty());
    }
}
