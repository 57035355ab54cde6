use mindsift_analyzer::AnalysisResult;

/// Render a human-readable summary of one analysis.
pub fn render(result: &AnalysisResult) -> String {
    let mut md = String::new();
    md.push_str("# Mindsift analysis\n\n");
    md.push_str(&format!("- Words: `{}`\n", result.metadata.word_count));
    md.push_str(&format!(
        "- Markers: `{}` (density {:.3})\n",
        result.metadata.marker_count, result.metadata.density
    ));
    md.push_str(&format!("- Coherence: `{:.2}`\n", result.coherence));
    md.push_str(&format!(
        "- Composite confidence: `{:.2}`\n\n",
        result.confidence
    ));

    let patterns = result.top_patterns(10);
    if patterns.is_empty() {
        md.push_str("No patterns detected.\n");
        return md;
    }

    md.push_str("## Patterns\n\n");
    md.push_str("| pattern | hits | weighted | confidence | severe |\n");
    md.push_str("|---|---:|---:|---:|---|\n");
    for pattern in &patterns {
        md.push_str(&format!(
            "| `{}` | `{}` | `{:.2}` | `{:.2}` | {} |\n",
            pattern.category,
            pattern.count,
            pattern.weighted_score,
            pattern.confidence,
            if pattern.severe { "yes" } else { "no" },
        ));
    }
    md.push('\n');

    let drivers = result.top_drivers(6);
    if !drivers.is_empty() {
        md.push_str("## Drivers\n\n");
        md.push_str("| driver | normalized | intensity | confidence | primary |\n");
        md.push_str("|---|---:|---:|---:|---|\n");
        for driver in &drivers {
            md.push_str(&format!(
                "| `{}` | `{:.2}` | `{:.2}` | `{:.2}` | {} |\n",
                driver.name,
                driver.normalized,
                driver.intensity,
                driver.confidence,
                if driver.primary { "yes" } else { "no" },
            ));
        }
        md.push('\n');
        let primaries = result.primary_drivers();
        if !primaries.is_empty() {
            for primary in &primaries {
                md.push_str(&format!("> {}\n", primary.insight));
            }
            md.push('\n');
        }
    }

    if !result.conflicts.is_empty() {
        md.push_str("## Conflicts\n\n");
        for conflict in &result.conflicts {
            md.push_str(&format!(
                "- `{}` (severity {:.2}, confidence {:.2}): {}\n",
                conflict.kind.as_str(),
                conflict.severity,
                conflict.confidence,
                conflict.interpretation
            ));
        }
        md.push('\n');
    }

    if !result.temporal.arcs.is_empty() {
        md.push_str("## Temporal arcs\n\n");
        for (category, arc) in &result.temporal.arcs {
            md.push_str(&format!("- `{}`: {}\n", category, arc.as_str()));
        }
        for shift in &result.temporal.shifts {
            md.push_str(&format!(
                "- `{}` {} from {} to {} ({:+.2})\n",
                shift.category,
                shift.direction.as_str(),
                shift.from.as_str(),
                shift.to.as_str(),
                shift.change
            ));
        }
        md.push('\n');
    }

    md
}
