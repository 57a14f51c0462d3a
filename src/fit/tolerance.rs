//! The tolerance model: a fitted curve and its acceptance half-width.

use crate::domain::CurveModel;
use crate::error::AppError;

/// The selected candidate for one training curve, bundled with the training
/// curve it was fit against and the loss value at selection time.
///
/// `FittedCurve` holds its own sample set (the winner's) by composition and
/// refers to a training curve it conceptually does not own; there is no
/// "is-a curve" relationship here.
#[derive(Debug, Clone)]
pub struct FittedCurve {
    curve: CurveModel,
    training: CurveModel,
    fit_error: f64,
    tolerance_factor: f64,
}

impl FittedCurve {
    /// Created by the fit selector, one per training curve.
    pub fn new(curve: CurveModel, training: CurveModel, fit_error: f64) -> Self {
        Self {
            curve,
            training,
            fit_error,
            tolerance_factor: 1.0,
        }
    }

    /// The winning candidate's name (doubles as the classification label).
    pub fn name(&self) -> &str {
        self.curve.name()
    }

    pub fn curve(&self) -> &CurveModel {
        &self.curve
    }

    pub fn training(&self) -> &CurveModel {
        &self.training
    }

    pub fn fit_error(&self) -> f64 {
        self.fit_error
    }

    pub fn tolerance_factor(&self) -> f64 {
        self.tolerance_factor
    }

    /// The only mutation a fitted curve permits. The tolerance itself is
    /// always derived, so no cache needs invalidating here.
    pub fn set_tolerance_factor(&mut self, factor: f64) {
        self.tolerance_factor = factor;
    }

    /// Max over shared x of |y_fitted − y_training|.
    pub fn biggest_deviation(&self) -> f64 {
        self.curve
            .diff_y(&self.training)
            .into_iter()
            .map(f64::abs)
            .fold(0.0, f64::max)
    }

    /// `tolerance_factor * biggest_deviation`, recomputed on every read.
    pub fn tolerance(&self) -> f64 {
        self.tolerance_factor * self.biggest_deviation()
    }

    /// Exact-match lookup on the fitted samples.
    pub fn value_at(&self, x: f64) -> Result<f64, AppError> {
        self.curve.lookup_y(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(name: &str, ys: &[f64]) -> CurveModel {
        let xs: Vec<f64> = (1..=ys.len()).map(|i| i as f64).collect();
        CurveModel::from_tabular(name, &xs, ys)
    }

    #[test]
    fn deviation_zero_for_identical_samples() {
        let fit = FittedCurve::new(
            curve("a", &[2.0, 4.0, 6.0]),
            curve("t", &[2.0, 4.0, 6.0]),
            0.0,
        );
        assert_eq!(fit.biggest_deviation(), 0.0);
        assert_eq!(fit.tolerance(), 0.0);
    }

    #[test]
    fn deviation_is_max_absolute_difference() {
        let fit = FittedCurve::new(
            curve("a", &[2.0, 4.0, 6.0]),
            curve("t", &[2.5, 1.0, 6.2]),
            0.0,
        );
        assert!((fit.biggest_deviation() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn tolerance_scales_linearly_with_factor() {
        let mut fit = FittedCurve::new(
            curve("a", &[2.0, 4.0, 6.0]),
            curve("t", &[2.0, 4.0, 7.0]),
            0.0,
        );
        assert!((fit.tolerance() - 1.0).abs() < 1e-12);

        fit.set_tolerance_factor(2.0);
        assert!((fit.tolerance() - 2.0).abs() < 1e-12);

        fit.set_tolerance_factor(std::f64::consts::SQRT_2);
        assert!((fit.tolerance() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn factor_zero_collapses_the_band() {
        let mut fit = FittedCurve::new(
            curve("a", &[2.0, 4.0]),
            curve("t", &[2.0, 5.0]),
            0.0,
        );
        fit.set_tolerance_factor(0.0);
        assert_eq!(fit.tolerance(), 0.0);
    }
}
