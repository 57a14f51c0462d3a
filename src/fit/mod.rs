//! Fit selection and the tolerance model.
//!
//! Responsibilities:
//!
//! - pick the minimum-loss candidate for each training curve
//! - bundle the winner with its training curve and loss (`FittedCurve`)
//! - derive the acceptance half-width (tolerance) from the fit

pub mod selection;
pub mod tolerance;

pub use selection::*;
pub use tolerance::*;
