//! Ordinary least squares linear regression.

use augur_traits::{FeatureRow, FittedModel, Regressor, Result};
use ndarray::{Array1, Array2};
use std::fmt::Write;

use crate::linalg::{center, least_squares, validate_training, validate_width};

/// An affine model `ŷ = intercept + x · coefficients`.
///
/// Shared by every regressor whose fitted form is linear in its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    /// Constant term.
    pub intercept: f64,
    /// One coefficient per input column.
    pub coefficients: Array1<f64>,
}

impl LinearFit {
    /// Evaluate the affine model on every row of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`augur_traits::AugurError::Model`] if `x` has the wrong
    /// number of columns.
    pub fn evaluate(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        validate_width(x, self.coefficients.len())?;
        Ok(x.dot(&self.coefficients) + self.intercept)
    }

    /// Render `close = <intercept> + <c1> * day_offset + ...` using the first
    /// `terms` coefficients, with four decimals.
    #[must_use]
    pub fn equation(&self, terms: usize) -> String {
        let mut out = format!("close = {:.4}", self.intercept);
        for (j, coef) in self.coefficients.iter().take(terms).enumerate() {
            let sign = if *coef < 0.0 { '-' } else { '+' };
            // Writing to a String cannot fail
            let _ = write!(
                out,
                " {sign} {:.4} * {}",
                coef.abs(),
                FeatureRow::feature_name(j)
            );
        }
        out
    }
}

/// Ordinary least squares with an intercept.
///
/// The columns are centered before solving, so the intercept is recovered as
/// `ȳ - x̄ · β` and the QR solve works on a better-conditioned system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression;

impl LinearRegression {
    /// Create a linear regression model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fit and return the concrete affine model.
    ///
    /// # Errors
    ///
    /// Returns [`augur_traits::AugurError::Model`] for inconsistent or
    /// non-finite inputs.
    pub fn fit_linear(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearFit> {
        validate_training(x, y)?;
        let (xc, yc, x_mean, y_mean) = center(x, y)?;
        let coefficients = least_squares(&xc, &yc)?;
        let intercept = y_mean - x_mean.dot(&coefficients);
        Ok(LinearFit {
            intercept,
            coefficients,
        })
    }
}

/// Fitted form of [`LinearRegression`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinear {
    fit: LinearFit,
}

impl FittedLinear {
    /// The learned intercept and coefficients.
    #[must_use]
    pub const fn parameters(&self) -> &LinearFit {
        &self.fit
    }
}

impl Regressor for LinearRegression {
    fn name(&self) -> &str {
        "linear"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        let fit = self.fit_linear(x, y)?;
        Ok(Box::new(FittedLinear { fit }))
    }
}

impl FittedModel for FittedLinear {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.fit.evaluate(x)
    }

    fn describe(&self) -> String {
        format!(
            "Linear Regression: {}",
            self.fit.equation(self.fit.coefficients.len())
        )
    }
}
