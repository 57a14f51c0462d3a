//! Shared pipeline logic behind the `run` and `fit` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> selection -> tolerance factor -> classification
//!
//! The CLI layer can then focus on presentation (printing and exports).

use crate::classify::classify_points;
use crate::domain::{ClassifiedPoint, RunConfig};
use crate::error::AppError;
use crate::fit::{FittedCurve, loss_for, select_all};
use crate::io::ingest::{CurveBatch, load_curves, load_test_points};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub training: CurveBatch,
    pub candidates: CurveBatch,
    pub fits: Vec<FittedCurve>,
    /// Empty when no test file was supplied.
    pub results: Vec<ClassifiedPoint>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    // 1) Ingest the training and candidate batches.
    let training = load_curves(&config.train_path)?;
    let candidates = load_curves(&config.candidates_path)?;

    // 2) Pick the minimum-loss candidate per training curve.
    let loss = loss_for(config.loss);
    let mut fits = select_all(&training.curves, &candidates.curves, loss)?;

    // 3) Apply the acceptance criterion factor.
    for fit in &mut fits {
        fit.set_tolerance_factor(config.tolerance_factor);
    }

    // 4) Classify test points, if a test file was supplied.
    let results = match &config.test_path {
        Some(path) => {
            let points = load_test_points(path)?;
            classify_points(&points, &fits)?
        }
        None => Vec::new(),
    };

    Ok(RunOutput {
        training,
        candidates,
        fits,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LossKind;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn end_to_end_fit_and_classify() {
        let dir = std::env::temp_dir().join("fitc-pipeline-test");
        std::fs::create_dir_all(&dir).unwrap();

        // Training t1 tracks candidate y1 (2x) with a max deviation of 0.5;
        // candidate y2 (3x) is far away.
        let train = write_file(&dir, "train.csv", "x,t1\n1,2.5\n2,4.0\n3,6.0\n");
        let ideal = write_file(&dir, "ideal.csv", "x,y1,y2\n1,2,3\n2,4,6\n3,6,9\n");
        // One point inside the band, one far outside.
        let test = write_file(&dir, "test.csv", "x,y\n2,4.1\n3,30.0\n");

        let config = RunConfig {
            train_path: train,
            candidates_path: ideal,
            test_path: Some(test),
            loss: LossKind::Squared,
            tolerance_factor: std::f64::consts::SQRT_2,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_mapping: None,
            export_fits: None,
        };

        let run = run_pipeline(&config).unwrap();

        assert_eq!(run.fits.len(), 1);
        assert_eq!(run.fits[0].name(), "y1");
        assert!((run.fits[0].fit_error() - 0.25).abs() < 1e-12);
        // deviation 0.5, factor sqrt(2) -> tolerance ~0.707
        assert!((run.fits[0].tolerance() - 0.5 * std::f64::consts::SQRT_2).abs() < 1e-12);

        assert_eq!(run.results.len(), 2);
        let first = run.results[0].matched.unwrap();
        assert_eq!(first.index, 0);
        assert!((first.distance - 0.1).abs() < 1e-9);
        assert!(run.results[1].matched.is_none());
    }
}
