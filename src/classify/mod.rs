//! Point classification against a set of fitted curves.
//!
//! A point matches a fitted curve when its absolute y-distance at `point.x`
//! is strictly inside the curve's tolerance band. Among all matching curves,
//! the smallest distance wins; ties keep the first-encountered curve.

use crate::domain::{ClassifiedPoint, CurveMatch, Point};
use crate::error::AppError;
use crate::fit::FittedCurve;

/// Classify one point against the fitted set, in order.
///
/// A failed lookup (x absent from any fitted curve's domain) propagates
/// immediately and aborts the whole point, even if an earlier curve already
/// matched. This mirrors the reference behavior; treating it as "no match
/// from this curve, continue" would be a deliberate deviation.
pub fn classify(point: Point, fits: &[FittedCurve]) -> Result<Option<CurveMatch>, AppError> {
    let mut best: Option<CurveMatch> = None;

    for (index, fit) in fits.iter().enumerate() {
        let y = fit.value_at(point.x)?;
        let distance = (y - point.y).abs();

        // Strict inequality: a point exactly on the band boundary is rejected.
        if distance < fit.tolerance() {
            let improves = match best {
                None => true,
                Some(current) => distance < current.distance,
            };
            if improves {
                best = Some(CurveMatch { index, distance });
            }
        }
    }

    Ok(best)
}

/// Classify a batch of test points, preserving their order.
///
/// Fails fast on the first point whose classification aborts.
pub fn classify_points(
    points: &[Point],
    fits: &[FittedCurve],
) -> Result<Vec<ClassifiedPoint>, AppError> {
    points
        .iter()
        .map(|&point| {
            classify(point, fits).map(|matched| ClassifiedPoint { point, matched })
        })
        .collect()
}
