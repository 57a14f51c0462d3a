//! Synthetic demo dataset generation.
//!
//! Produces the three CSVs the pipeline ingests:
//! - `ideal.csv`: noiseless candidate curves from analytic families
//! - `train.csv`: randomly chosen candidates with Gaussian noise added
//! - `test.csv`: single points drawn from random candidates, occasionally
//!   pushed outside every band by an outlier jump
//!
//! All three share one x-grid, written with identical formatting, so
//! exact-match lookup works across files after a CSV round trip.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{CurveModel, Point};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_dir: PathBuf,
    pub candidate_count: usize,
    pub training_count: usize,
    pub test_count: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub x_step: f64,
    /// Std dev of the Gaussian noise added to training curves and test points.
    pub noise_sigma: f64,
    /// Probability that a test point gets an outlier jump (should not classify).
    pub outlier_prob: f64,
    /// Outlier jump magnitude in units of `noise_sigma`.
    pub outlier_k: f64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub candidates: Vec<CurveModel>,
    pub training: Vec<CurveModel>,
    pub test_points: Vec<Point>,
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.candidate_count == 0 || config.training_count == 0 {
        return Err(AppError::invalid_input(
            "Candidate and training counts must be > 0.",
        ));
    }
    if !(config.x_step.is_finite() && config.x_step > 0.0) || config.x_end <= config.x_start {
        return Err(AppError::invalid_input("Invalid x-grid settings."));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::invalid_input("Invalid noise sigma."));
    }
    if !(0.0..=1.0).contains(&config.outlier_prob) {
        return Err(AppError::invalid_input("Outlier probability must be in [0, 1]."));
    }

    let grid = x_grid(config.x_start, config.x_end, config.x_step);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sigma.max(1e-12))
        .map_err(|e| AppError::invalid_input(format!("Noise distribution error: {e}")))?;

    let candidates: Vec<CurveModel> = (0..config.candidate_count)
        .map(|k| {
            let ys: Vec<f64> = grid.iter().map(|&x| candidate_value(k, x)).collect();
            CurveModel::from_tabular(format!("y{}", k + 1), &grid, &ys)
        })
        .collect();

    let training: Vec<CurveModel> = (0..config.training_count)
        .map(|i| {
            let source = rng.gen_range(0..config.candidate_count);
            let ys: Vec<f64> = grid
                .iter()
                .map(|&x| candidate_value(source, x) + normal.sample(&mut rng))
                .collect();
            CurveModel::from_tabular(format!("t{}", i + 1), &grid, &ys)
        })
        .collect();

    let test_points: Vec<Point> = (0..config.test_count)
        .map(|_| {
            let x = grid[rng.gen_range(0..grid.len())];
            let source = rng.gen_range(0..config.candidate_count);
            let jump = if rng.r#gen::<f64>() < config.outlier_prob {
                config.outlier_k * config.noise_sigma
            } else {
                0.0
            };
            let y = candidate_value(source, x) + normal.sample(&mut rng) + jump;
            Point { x, y }
        })
        .collect();

    Ok(SampleData {
        candidates,
        training,
        test_points,
    })
}

/// Write the dataset as `ideal.csv`, `train.csv`, and `test.csv` in `out_dir`.
pub fn write_sample(data: &SampleData, out_dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to create output dir '{}': {e}",
            out_dir.display()
        ))
    })?;

    write_batch_csv(&out_dir.join("ideal.csv"), &data.candidates)?;
    write_batch_csv(&out_dir.join("train.csv"), &data.training)?;

    let test = CurveModel::from_points("y".to_string(), data.test_points.clone());
    write_batch_csv(&out_dir.join("test.csv"), std::slice::from_ref(&test))?;

    Ok(())
}

fn write_batch_csv(path: &Path, curves: &[CurveModel]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::invalid_input(format!("Failed to create '{}': {e}", path.display()))
    })?;

    let mut header = String::from("x");
    for curve in curves {
        header.push(',');
        header.push_str(curve.name());
    }
    writeln!(file, "{header}")
        .map_err(|e| AppError::invalid_input(format!("Failed to write '{}': {e}", path.display())))?;

    // All curves in a batch share the grid of the first one.
    let rows = curves.first().map(|c| c.len()).unwrap_or(0);
    for row in 0..rows {
        let mut line = format!("{:.6}", curves[0].samples()[row].x);
        for curve in curves {
            line.push_str(&format!(",{:.6}", curve.samples()[row].y));
        }
        writeln!(file, "{line}").map_err(|e| {
            AppError::invalid_input(format!("Failed to write '{}': {e}", path.display()))
        })?;
    }

    Ok(())
}

fn x_grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).round() as usize + 1;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Deterministic analytic curve families, cycled by candidate index.
fn candidate_value(k: usize, x: f64) -> f64 {
    let wave = (k / 5) as f64;
    let scale = 0.5 + 0.4 * wave;
    let offset = ((k % 7) as f64 - 3.0) * 1.5;

    match k % 5 {
        0 => scale * x + offset,
        1 => 0.1 * scale * x * x + offset,
        2 => 4.0 * scale * x.sin() + offset,
        3 => 4.0 * scale * (0.5 * x).cos() + offset,
        _ => 0.02 * scale * x * x * x + offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SampleConfig {
        SampleConfig {
            out_dir: PathBuf::from("demo-data"),
            candidate_count: 10,
            training_count: 3,
            test_count: 25,
            x_start: -5.0,
            x_end: 5.0,
            x_step: 0.5,
            noise_sigma: 0.2,
            outlier_prob: 0.1,
            outlier_k: 8.0,
            seed: 42,
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let config = base_config();
        let a = generate_sample(&config).unwrap();
        let b = generate_sample(&config).unwrap();

        assert_eq!(a.training[0].samples(), b.training[0].samples());
        assert_eq!(a.test_points, b.test_points);
    }

    #[test]
    fn shapes_match_the_config() {
        let config = base_config();
        let data = generate_sample(&config).unwrap();

        assert_eq!(data.candidates.len(), 10);
        assert_eq!(data.training.len(), 3);
        assert_eq!(data.test_points.len(), 25);

        // 21 grid points for [-5, 5] at step 0.5.
        assert_eq!(data.candidates[0].len(), 21);
        assert_eq!(data.training[0].len(), 21);
    }

    #[test]
    fn test_points_lie_on_the_shared_grid() {
        let data = generate_sample(&base_config()).unwrap();
        for p in &data.test_points {
            assert!(data.candidates[0].lookup_y(p.x).is_ok());
        }
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let mut config = base_config();
        config.x_step = 0.0;
        let err = generate_sample(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
