//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the selection/classification code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::LossKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fitc",
    version,
    about = "Curve fit selection and tolerance-band classification"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit training curves, classify test points, print reports/plots, export.
    Run(RunArgs),
    /// Fit only (skip classification even when --test is given).
    Fit(RunArgs),
    /// Generate a synthetic demo dataset (ideal/train/test CSVs).
    Sample(SampleArgs),
    /// Plot a previously exported fits JSON.
    Plot(PlotArgs),
}

/// Common options for fitting and classification.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Training curves CSV (one `x` column, one column per training curve).
    #[arg(long, value_name = "CSV")]
    pub train: PathBuf,

    /// Candidate curves CSV (same x-grid as the training file).
    #[arg(long, value_name = "CSV")]
    pub candidates: PathBuf,

    /// Test points CSV (`x,y`). Omit to stop after fitting.
    #[arg(long, value_name = "CSV")]
    pub test: Option<PathBuf>,

    /// Loss minimized when picking the best candidate.
    #[arg(long, value_enum, default_value_t = LossKind::Squared)]
    pub loss: LossKind,

    /// Acceptance band multiplier applied to every fit.
    #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
    pub tolerance_factor: f64,

    /// Render an ASCII plot per fit (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the point -> classification mapping to CSV.
    #[arg(long = "export-mapping")]
    pub export_mapping: Option<PathBuf>,

    /// Export the fitted set (samples + tolerances) to JSON.
    #[arg(long = "export-fits")]
    pub export_fits: Option<PathBuf>,
}

/// Options for generating demo data.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output directory for ideal.csv / train.csv / test.csv.
    #[arg(long, default_value = "demo-data")]
    pub out: PathBuf,

    /// Number of candidate curves.
    #[arg(long, default_value_t = 20)]
    pub candidates: usize,

    /// Number of training curves.
    #[arg(long, default_value_t = 4)]
    pub training: usize,

    /// Number of test points.
    #[arg(long, default_value_t = 100)]
    pub test: usize,

    /// First x value of the shared grid.
    #[arg(long, default_value_t = -10.0)]
    pub x_start: f64,

    /// Last x value of the shared grid.
    #[arg(long, default_value_t = 10.0)]
    pub x_end: f64,

    /// Grid spacing.
    #[arg(long, default_value_t = 0.1)]
    pub x_step: f64,

    /// Std dev of the Gaussian noise on training curves and test points.
    #[arg(long, default_value_t = 0.25)]
    pub noise: f64,

    /// Probability that a test point gets an outlier jump.
    #[arg(long, default_value_t = 0.1)]
    pub outlier_prob: f64,

    /// Outlier jump magnitude (in noise sigmas).
    #[arg(long, default_value_t = 8.0)]
    pub outlier_k: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for plotting a saved fit set.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Fits JSON file produced by `fitc run --export-fits`.
    #[arg(long, value_name = "JSON")]
    pub fits: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
