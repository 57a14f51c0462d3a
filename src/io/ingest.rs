//! CSV ingest: turn a tabular source into a batch of named curves.
//!
//! Expected shape: a header row with one `x` column and one or more y-series
//! columns; each y-series becomes one `CurveModel` sharing the x column.
//!
//! Design goals:
//! - **Strict schema**: missing `x` column or malformed numbers fail with
//!   clear, line-numbered errors (exit code 2)
//! - **Deterministic behavior**: column order is preserved
//! - **Separation of concerns**: no fitting or classification logic here

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{BatchStats, CurveModel, Point};
use crate::error::AppError;

/// Ingest output: the curves plus summary stats.
#[derive(Debug, Clone)]
pub struct CurveBatch {
    pub curves: Vec<CurveModel>,
    pub stats: BatchStats,
    pub rows_read: usize,
}

/// Load a batch of curves from a CSV file.
pub fn load_curves(path: &Path) -> Result<CurveBatch, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::invalid_input(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_curves(file, &path.display().to_string())
}

/// Load test points: the *first* y-series of the batch, taken as (x, y) pairs.
/// Extra y-series in the file are ignored.
pub fn load_test_points(path: &Path) -> Result<Vec<Point>, AppError> {
    let batch = load_curves(path)?;
    let first = batch.curves.into_iter().next().ok_or_else(|| {
        AppError::empty_data(format!("No y-series in test CSV '{}'.", path.display()))
    })?;
    Ok(first.points().collect())
}

/// Parse curves from any reader (`source` is used in error messages only).
pub fn read_curves<R: std::io::Read>(reader: R, source: &str) -> Result<CurveBatch, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();

    let x_idx = names.iter().position(|n| n == "x").ok_or_else(|| {
        AppError::invalid_input(format!("Missing required column `x` in '{source}'."))
    })?;

    let y_indices: Vec<usize> = (0..names.len()).filter(|&idx| idx != x_idx).collect();
    if y_indices.is_empty() {
        return Err(AppError::empty_data(format!(
            "No y-series columns in '{source}' (only `x`)."
        )));
    }

    let mut xs: Vec<f64> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); y_indices.len()];

    let mut rows_read = 0usize;
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record =
            result.map_err(|e| AppError::invalid_input(format!("{source}:{line}: {e}")))?;

        xs.push(parse_cell(&record, x_idx, "x", source, line)?);

        for (slot, &field_idx) in y_indices.iter().enumerate() {
            let value = parse_cell(&record, field_idx, &names[field_idx], source, line)?;
            columns[slot].push(value);
        }
    }

    if rows_read == 0 {
        return Err(AppError::empty_data(format!("No data rows in '{source}'.")));
    }

    let curves: Vec<CurveModel> = y_indices
        .iter()
        .zip(columns)
        .map(|(&field_idx, ys)| CurveModel::from_tabular(names[field_idx].clone(), &xs, &ys))
        .collect();

    let stats = compute_stats(&curves).ok_or_else(|| {
        AppError::empty_data(format!("No finite samples in '{source}'."))
    })?;

    Ok(CurveBatch {
        curves,
        stats,
        rows_read,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿x"). If we don't strip it, schema validation will
    // incorrectly report a missing `x` column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_cell(
    record: &StringRecord,
    idx: usize,
    name: &str,
    source: &str,
    line: usize,
) -> Result<f64, AppError> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::invalid_input(format!("{source}:{line}: missing value for `{name}`."))
        })?;

    let value: f64 = raw.parse().map_err(|_| {
        AppError::invalid_input(format!(
            "{source}:{line}: invalid number '{raw}' for `{name}`."
        ))
    })?;

    if !value.is_finite() {
        return Err(AppError::invalid_input(format!(
            "{source}:{line}: non-finite value for `{name}`."
        )));
    }

    Ok(value)
}

fn compute_stats(curves: &[CurveModel]) -> Option<BatchStats> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut n_rows = 0usize;

    for curve in curves {
        n_rows = n_rows.max(curve.len());
        for p in curve.points() {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
    }

    if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    Some(BatchStats {
        n_curves: curves.len(),
        n_rows,
        x_min,
        x_max,
        y_min,
        y_max,
    })
}
