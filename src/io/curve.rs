//! Read/write fitted-set JSON files.
//!
//! The JSON file is the "portable" representation of a fit run:
//! - one record per fitted curve (winner samples + training samples)
//! - fit error, tolerance factor, and the derived tolerance at export time
//!
//! It exists so plots can be re-rendered without refitting.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{LossKind, Point};
use crate::error::AppError;
use crate::fit::FittedCurve;

/// A saved fit run (JSON schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub loss: LossKind,
    pub fits: Vec<FitRecord>,
}

/// One fitted curve, flattened for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitRecord {
    pub name: String,
    pub training_name: String,
    pub fit_error: f64,
    pub tolerance_factor: f64,
    /// Derived at export time; re-derivable from the samples and factor.
    pub tolerance: f64,
    pub samples: Vec<Point>,
    pub training_samples: Vec<Point>,
}

/// Flatten a fitted set into export records.
pub fn fit_records(fits: &[FittedCurve]) -> Vec<FitRecord> {
    fits.iter()
        .map(|fit| FitRecord {
            name: fit.name().to_string(),
            training_name: fit.training().name().to_string(),
            fit_error: fit.fit_error(),
            tolerance_factor: fit.tolerance_factor(),
            tolerance: fit.tolerance(),
            samples: fit.curve().points().collect(),
            training_samples: fit.training().points().collect(),
        })
        .collect()
}

/// Write a fitted-set JSON file.
pub fn write_fits_json(
    path: &Path,
    fits: &[FittedCurve],
    loss: LossKind,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to create fits JSON '{}': {e}",
            path.display()
        ))
    })?;

    let out = FitFile {
        tool: "fitc".to_string(),
        loss,
        fits: fit_records(fits),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::invalid_input(format!("Failed to write fits JSON: {e}")))?;

    Ok(())
}

/// Read a fitted-set JSON file.
pub fn read_fits_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to open fits JSON '{}': {e}",
            path.display()
        ))
    })?;
    let fits: FitFile = serde_json::from_reader(file)
        .map_err(|e| AppError::invalid_input(format!("Invalid fits JSON: {e}")))?;
    Ok(fits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurveModel;

    #[test]
    fn records_capture_derived_tolerance() {
        let c = CurveModel::from_tabular("y1", &[1.0, 2.0], &[2.0, 4.0]);
        let t = CurveModel::from_tabular("t1", &[1.0, 2.0], &[2.0, 5.0]);
        let mut fit = FittedCurve::new(c, t, 1.0);
        fit.set_tolerance_factor(2.0);

        let records = fit_records(&[fit]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "y1");
        assert_eq!(records[0].training_name, "t1");
        assert!((records[0].tolerance - 2.0).abs() < 1e-12);
        assert_eq!(records[0].samples.len(), 2);
        assert_eq!(records[0].training_samples.len(), 2);
    }

    #[test]
    fn fit_file_round_trips_through_json() {
        let c = CurveModel::from_tabular("y1", &[1.0], &[2.0]);
        let t = CurveModel::from_tabular("t1", &[1.0], &[2.0]);
        let file = FitFile {
            tool: "fitc".to_string(),
            loss: LossKind::Squared,
            fits: fit_records(&[FittedCurve::new(c, t, 0.0)]),
        };

        let json = serde_json::to_string(&file).unwrap();
        let back: FitFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fits.len(), 1);
        assert_eq!(back.fits[0].name, "y1");
        assert_eq!(back.loss, LossKind::Squared);
    }
}
