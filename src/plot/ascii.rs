//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - fitted curve: `-` line
//! - tolerance band: `.` fill around the curve
//! - training samples: `o`
//! - classified test points: `*` (matched), `x` (unmatched)

use crate::domain::Point;
use crate::fit::FittedCurve;
use crate::io::curve::FitRecord;

/// What to draw: the fitted line, its training scatter, and the band width.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub title: &'a str,
    pub curve: &'a [Point],
    pub training: &'a [Point],
    pub tolerance: f64,
}

/// Render a plot for an in-memory fit, overlaying classified test points
/// (`true` = matched).
pub fn render_fit_plot(
    fit: &FittedCurve,
    overlay: &[(Point, bool)],
    width: usize,
    height: usize,
) -> String {
    let curve: Vec<Point> = fit.curve().points().collect();
    let training: Vec<Point> = fit.training().points().collect();
    let series = PlotSeries {
        title: fit.name(),
        curve: &curve,
        training: &training,
        tolerance: fit.tolerance(),
    };
    render_band_plot(&series, overlay, width, height)
}

/// Render a plot from a saved fit record (no overlay points).
pub fn render_fit_record_plot(record: &FitRecord, width: usize, height: usize) -> String {
    let series = PlotSeries {
        title: &record.name,
        curve: &record.samples,
        training: &record.training_samples,
        tolerance: record.tolerance,
    };
    render_band_plot(&series, &[], width, height)
}

pub fn render_band_plot(
    series: &PlotSeries,
    overlay: &[(Point, bool)],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(series.curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(series, overlay).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Band first, then the curve line, so everything else overlays it.
    for p in series.curve {
        let col = map_x(p.x, x_min, x_max, width);
        let top = map_y(p.y + series.tolerance, y_min, y_max, height);
        let bottom = map_y(p.y - series.tolerance, y_min, y_max, height);
        for row in grid.iter_mut().take(bottom + 1).skip(top) {
            row[col] = '.';
        }
    }

    for p in series.curve {
        let col = map_x(p.x, x_min, x_max, width);
        let row = map_y(p.y, y_min, y_max, height);
        grid[row][col] = '-';
    }

    for p in series.training {
        let col = map_x(p.x, x_min, x_max, width);
        let row = map_y(p.y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    for &(p, matched) in overlay {
        let col = map_x(p.x, x_min, x_max, width);
        let row = map_y(p.y, y_min, y_max, height);
        grid[row][col] = if matched { '*' } else { 'x' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}] | tol={:.4}\n",
        series.title, series.tolerance
    ));
    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn x_range(points: &[Point]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        min = min.min(p.x);
        max = max.max(p.x);
    }
    if !min.is_finite() || !max.is_finite() || max <= min {
        return None;
    }
    Some((min, max))
}

fn y_range(series: &PlotSeries, overlay: &[(Point, bool)]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in series.curve {
        min = min.min(p.y - series.tolerance);
        max = max.max(p.y + series.tolerance);
    }
    for p in series.training {
        min = min.min(p.y);
        max = max.max(p.y);
    }
    for (p, _) in overlay {
        min = min.min(p.y);
        max = max.max(p.y);
    }
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    Some((min, max))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs().max(1e-9);
    (min - span * frac, max + span * frac)
}

fn map_x(x: f64, min: f64, max: f64, width: usize) -> usize {
    let u = ((x - min) / (max - min)).clamp(0.0, 1.0);
    ((u * (width as f64 - 1.0)).round() as usize).min(width - 1)
}

fn map_y(y: f64, min: f64, max: f64, height: usize) -> usize {
    // Row 0 is the top of the grid.
    let u = ((y - min) / (max - min)).clamp(0.0, 1.0);
    let row = ((1.0 - u) * (height as f64 - 1.0)).round() as usize;
    row.min(height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurveModel;

    fn fit() -> FittedCurve {
        let xs: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 0.5 * x).collect();
        let noisy: Vec<f64> = xs.iter().map(|&x| 0.5 * x + 1.0).collect();
        let mut fit = FittedCurve::new(
            CurveModel::from_tabular("y1", &xs, &ys),
            CurveModel::from_tabular("t1", &xs, &noisy),
            1.0,
        );
        fit.set_tolerance_factor(std::f64::consts::SQRT_2);
        fit
    }

    #[test]
    fn plot_has_header_plus_height_rows() {
        let out = render_fit_plot(&fit(), &[], 60, 15);
        assert_eq!(out.lines().count(), 16);
        assert!(out.starts_with("Plot: y1 |"));
    }

    #[test]
    fn plot_contains_curve_band_and_scatter() {
        let out = render_fit_plot(&fit(), &[], 60, 15);
        assert!(out.contains('-'));
        assert!(out.contains('.'));
        assert!(out.contains('o'));
    }

    #[test]
    fn overlay_points_render_by_match_state() {
        let overlay = [
            (Point { x: 10.0, y: 5.0 }, true),
            (Point { x: 40.0, y: 2.0 }, false),
        ];
        let out = render_fit_plot(&fit(), &overlay, 60, 15);
        assert!(out.contains('*'));
        assert!(out.contains('x'));
    }
}
