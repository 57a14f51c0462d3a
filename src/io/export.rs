//! Export classification results to CSV.
//!
//! The mapping file is keyed by test point and is meant to be easy to consume
//! in spreadsheets or downstream scripts. Unmatched points use the output
//! conventions of the reference store: label "-" and distance -1.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ClassifiedPoint;
use crate::error::AppError;
use crate::fit::FittedCurve;

/// Write the point → classification mapping to a CSV file.
pub fn write_mapping_csv(
    path: &Path,
    results: &[ClassifiedPoint],
    fits: &[FittedCurve],
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to create mapping CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "x,y,delta_y,best_curve")
        .map_err(|e| AppError::invalid_input(format!("Failed to write mapping header: {e}")))?;

    for result in results {
        writeln!(file, "{}", mapping_row(result, fits))
            .map_err(|e| AppError::invalid_input(format!("Failed to write mapping row: {e}")))?;
    }

    Ok(())
}

/// One CSV row for a classified point. The -1 / "-" sentinels exist only
/// here; in-memory results keep `Option`s.
fn mapping_row(result: &ClassifiedPoint, fits: &[FittedCurve]) -> String {
    let (delta_y, label) = match result.matched {
        Some(m) => (m.distance, fits[m.index].name().to_string()),
        None => (-1.0, "-".to_string()),
    };

    format!(
        "{:.6},{:.6},{:.6},{}",
        result.point.x, result.point.y, delta_y, label
    )
}
