//! Formatted terminal output: run summary and classification tables.

use crate::domain::{ClassifiedPoint, RunConfig};
use crate::fit::FittedCurve;
use crate::io::ingest::CurveBatch;

/// Format the full run summary (dataset stats + one line per selected fit).
pub fn format_run_summary(
    training: &CurveBatch,
    candidates: &CurveBatch,
    fits: &[FittedCurve],
    config: &RunConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== fitc - Curve Fit Selection ===\n");
    out.push_str(&format!("Loss: {}\n", config.loss.display_name()));
    out.push_str(&format!(
        "Tolerance factor: {:.6}\n",
        config.tolerance_factor
    ));
    out.push_str(&format!("Training:   {}\n", fmt_batch(training)));
    out.push_str(&format!("Candidates: {}\n", fmt_batch(candidates)));

    out.push_str("\nSelected fits:\n");
    out.push_str(&format!(
        "{:<12} {:<12} {:>14} {:>14} {:>14}\n",
        "training", "best", "fit_error", "deviation", "tolerance"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<12} {:-<14} {:-<14} {:-<14}\n",
        "", "", "", "", ""
    ));
    for fit in fits {
        out.push_str(&format!(
            "{:<12} {:<12} {:>14.6} {:>14.6} {:>14.6}\n",
            truncate(fit.training().name(), 12),
            truncate(fit.name(), 12),
            fit.fit_error(),
            fit.biggest_deviation(),
            fit.tolerance(),
        ));
    }
    out.push('\n');

    out
}

/// Format the classification table plus a match/miss tally.
pub fn format_classifications(results: &[ClassifiedPoint], fits: &[FittedCurve]) -> String {
    let mut out = String::new();

    let matched = results.iter().filter(|r| r.matched.is_some()).count();
    out.push_str(&format!(
        "Classified {} test points: {} matched, {} unmatched\n",
        results.len(),
        matched,
        results.len() - matched
    ));

    out.push_str(&format!(
        "{:>12} {:>12} {:<12} {:>12}\n",
        "x", "y", "best", "delta_y"
    ));
    out.push_str(&format!("{:-<12} {:-<12} {:-<12} {:-<12}\n", "", "", "", ""));

    for result in results {
        let (label, delta) = match result.matched {
            Some(m) => (
                truncate(fits[m.index].name(), 12),
                format!("{:>12.6}", m.distance),
            ),
            None => ("-".to_string(), format!("{:>12}", "-")),
        };
        out.push_str(&format!(
            "{:>12.4} {:>12.4} {:<12} {}\n",
            result.point.x, result.point.y, label, delta
        ));
    }

    out
}

fn fmt_batch(batch: &CurveBatch) -> String {
    format!(
        "{} curves | rows={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]",
        batch.stats.n_curves,
        batch.stats.n_rows,
        batch.stats.x_min,
        batch.stats.x_max,
        batch.stats.y_min,
        batch.stats.y_max
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
