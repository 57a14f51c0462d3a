//! Core data model: sampled curves, test points, run configuration.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during selection and classification
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single (x, y) sample. Also used for ephemeral test points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An immutable, named collection of (x, y) samples with exact-match lookup by x.
///
/// x values are assumed unique within a curve; duplicate keys are the ingest
/// layer's responsibility. The sample set cannot be mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveModel {
    name: String,
    samples: Vec<Point>,
}

impl CurveModel {
    /// Pair `xs[i]` with `ys[i]` in order. The two series must have equal length;
    /// ingest guarantees this for tabular sources.
    pub fn from_tabular(name: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        let samples = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| Point { x, y })
            .collect();
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Wrap an existing sample set.
    pub fn from_points(name: impl Into<String>, samples: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// A lazy, restartable traversal over the samples. Each call starts fresh
    /// from the beginning; no cursor state is shared between traversals.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.samples.iter().copied()
    }

    /// Exact-match lookup of the y-value at `x`.
    ///
    /// There is no interpolation and no nearest-neighbor fallback: an absent
    /// x fails with a not-found error.
    pub fn lookup_y(&self, x: f64) -> Result<f64, AppError> {
        self.samples
            .iter()
            .find(|s| s.x == x)
            .map(|s| s.y)
            .ok_or_else(|| {
                AppError::not_found(format!("x={x} is not in the domain of curve '{}'.", self.name))
            })
    }

    /// Pointwise difference of y-values (`self - other`) by index position.
    ///
    /// Both curves are assumed to share the same x-domain and ordering;
    /// behavior is undefined when they differ.
    pub fn diff_y(&self, other: &CurveModel) -> Vec<f64> {
        self.samples
            .iter()
            .zip(other.samples.iter())
            .map(|(a, b)| a.y - b.y)
            .collect()
    }
}

/// Which loss function to minimize during candidate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LossKind {
    /// Sum of squared pointwise differences (default).
    Squared,
    /// Sum of absolute pointwise differences.
    Absolute,
}

impl LossKind {
    pub fn display_name(self) -> &'static str {
        match self {
            LossKind::Squared => "sum of squared differences",
            LossKind::Absolute => "sum of absolute differences",
        }
    }
}

/// A successful classification: index into the fitted set plus the absolute
/// y-distance at the test point's x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveMatch {
    pub index: usize,
    pub distance: f64,
}

/// One classified test point. `matched` is `None` exactly when no fitted
/// curve's tolerance band contained the point.
#[derive(Debug, Clone)]
pub struct ClassifiedPoint {
    pub point: Point,
    pub matched: Option<CurveMatch>,
}

/// Summary stats about an ingested curve batch.
#[derive(Debug, Clone)]
pub struct BatchStats {
    pub n_curves: usize,
    pub n_rows: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub train_path: PathBuf,
    pub candidates_path: PathBuf,
    /// Test points to classify. When absent the run stops after fitting.
    pub test_path: Option<PathBuf>,

    pub loss: LossKind,
    /// Acceptance half-width multiplier applied to every fit (√2 by default).
    pub tolerance_factor: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_mapping: Option<PathBuf>,
    pub export_fits: Option<PathBuf>,
}
