//! Candidate selection: pick the minimum-loss candidate per training curve.
//!
//! Selection is an exhaustive scan over a fixed, small candidate set. The
//! running minimum uses strict `<`, so exact ties keep the first-encountered
//! candidate without any re-comparison.

use crate::domain::{CurveModel, LossKind};
use crate::error::AppError;
use crate::fit::tolerance::FittedCurve;

/// A pluggable scalar measure of dissimilarity between two curves.
///
/// Must return a value `>= 0` for the selection semantics to be meaningful.
pub type Loss = fn(&CurveModel, &CurveModel) -> f64;

/// Sum over shared x of the squared pointwise difference (default loss).
pub fn sum_squared_diff(a: &CurveModel, b: &CurveModel) -> f64 {
    b.diff_y(a).into_iter().map(|d| d * d).sum()
}

/// Sum over shared x of the absolute pointwise difference.
pub fn sum_abs_diff(a: &CurveModel, b: &CurveModel) -> f64 {
    b.diff_y(a).into_iter().map(f64::abs).sum()
}

/// Resolve a configured loss kind to its implementation.
pub fn loss_for(kind: LossKind) -> Loss {
    match kind {
        LossKind::Squared => sum_squared_diff,
        LossKind::Absolute => sum_abs_diff,
    }
}

/// Pick the candidate minimizing `loss(training, candidate)`.
///
/// Candidates are assumed to share the training curve's x-domain. An empty
/// candidate list fails: no meaningful minimum exists.
pub fn select_best(
    training: &CurveModel,
    candidates: &[CurveModel],
    loss: Loss,
) -> Result<FittedCurve, AppError> {
    let Some(first) = candidates.first() else {
        return Err(AppError::invalid_input(
            "Candidate set is empty; cannot select a best fit.",
        ));
    };

    let mut best = first;
    let mut smallest_error = loss(training, best);

    for candidate in &candidates[1..] {
        let error = loss(training, candidate);
        if error < smallest_error {
            smallest_error = error;
            best = candidate;
        }
    }

    Ok(FittedCurve::new(
        best.clone(),
        training.clone(),
        smallest_error,
    ))
}

/// Fit every training curve against the same candidate set, preserving the
/// training batch order.
pub fn select_all(
    training: &[CurveModel],
    candidates: &[CurveModel],
    loss: Loss,
) -> Result<Vec<FittedCurve>, AppError> {
    training
        .iter()
        .map(|t| select_best(t, candidates, loss))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(name: &str, ys: &[f64]) -> CurveModel {
        let xs: Vec<f64> = (1..=ys.len()).map(|i| i as f64).collect();
        CurveModel::from_tabular(name, &xs, ys)
    }

    #[test]
    fn identical_candidate_wins_with_zero_error() {
        let training = curve("t1", &[2.0, 4.0, 6.0]);
        let a = curve("a", &[2.0, 4.0, 6.0]);
        let b = curve("b", &[3.0, 6.0, 9.0]);

        let fit = select_best(&training, &[a, b], sum_squared_diff).unwrap();
        assert_eq!(fit.name(), "a");
        assert_eq!(fit.fit_error(), 0.0);
    }

    #[test]
    fn exact_tie_keeps_first_encountered() {
        let training = curve("t1", &[0.0, 0.0]);
        // Both candidates are at distance 1 from the training curve at each x.
        let a = curve("a", &[1.0, 1.0]);
        let b = curve("b", &[-1.0, -1.0]);

        let fit = select_best(&training, &[a, b], sum_squared_diff).unwrap();
        assert_eq!(fit.name(), "a");
        assert_eq!(fit.fit_error(), 2.0);
    }

    #[test]
    fn empty_candidate_set_is_invalid_input() {
        let training = curve("t1", &[1.0]);
        let err = select_best(&training, &[], sum_squared_diff).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn losses_disagree_on_the_winner_when_outliers_dominate() {
        let training = curve("t1", &[0.0, 0.0, 0.0]);
        // `spiky` is closer at two points but has one large outlier;
        // `even` is uniformly off by 2.
        let spiky = curve("spiky", &[0.0, 0.0, 5.0]);
        let even = curve("even", &[2.0, 2.0, 2.0]);

        let squared = select_best(&training, &[spiky.clone(), even.clone()], sum_squared_diff)
            .unwrap();
        assert_eq!(squared.name(), "even"); // 25 vs 12

        let absolute = select_best(&training, &[spiky, even], sum_abs_diff).unwrap();
        assert_eq!(absolute.name(), "spiky"); // 5 vs 6
    }

    #[test]
    fn select_all_preserves_training_order() {
        let t1 = curve("t1", &[1.0, 2.0]);
        let t2 = curve("t2", &[10.0, 20.0]);
        let a = curve("a", &[1.0, 2.0]);
        let b = curve("b", &[10.0, 20.0]);

        let fits = select_all(&[t1, t2], &[a, b], sum_squared_diff).unwrap();
        assert_eq!(fits.len(), 2);
        assert_eq!(fits[0].name(), "a");
        assert_eq!(fits[0].training().name(), "t1");
        assert_eq!(fits[1].name(), "b");
        assert_eq!(fits[1].training().name(), "t2");
    }
}
