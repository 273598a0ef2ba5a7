//! Ridge regression (L2-penalized least squares).

use augur_traits::{AugurError, FittedModel, Regressor, Result};
use ndarray::{Array1, Array2};

use crate::linalg::{center, cholesky_solve, validate_training};
use crate::linear::LinearFit;

/// Default regularization strength.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Ridge regression.
///
/// Minimizes `||y - Xβ - b||² + α||β||²`. The intercept `b` is not penalized:
/// the system `(XᵀX + αI)β = Xᵀy` is solved on centered columns and the
/// intercept recovered as `ȳ - x̄ · β`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeRegression {
    alpha: f64,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl RidgeRegression {
    /// Create a ridge model with the given penalty.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::InvalidParameter`] unless `alpha` is finite and
    /// strictly positive.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(AugurError::InvalidParameter(format!(
                "ridge alpha must be positive, got {alpha}"
            )));
        }
        Ok(Self { alpha })
    }

    /// The L2 penalty.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fit and return the concrete affine model.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::Model`] for inconsistent or non-finite inputs.
    pub fn fit_ridge(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearFit> {
        validate_training(x, y)?;
        let (xc, yc, x_mean, y_mean) = center(x, y)?;

        let mut gram = xc.t().dot(&xc);
        for i in 0..gram.nrows() {
            gram[[i, i]] += self.alpha;
        }
        let xty = xc.t().dot(&yc);

        let coefficients = cholesky_solve(&gram, &xty)?;
        let intercept = y_mean - x_mean.dot(&coefficients);
        Ok(LinearFit {
            intercept,
            coefficients,
        })
    }
}

/// Fitted form of [`RidgeRegression`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedRidge {
    alpha: f64,
    fit: LinearFit,
}

impl FittedRidge {
    /// The learned intercept and coefficients.
    #[must_use]
    pub const fn parameters(&self) -> &LinearFit {
        &self.fit
    }
}

impl Regressor for RidgeRegression {
    fn name(&self) -> &str {
        "ridge"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        let fit = self.fit_ridge(x, y)?;
        Ok(Box::new(FittedRidge {
            alpha: self.alpha,
            fit,
        }))
    }
}

impl FittedModel for FittedRidge {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.fit.evaluate(x)
    }

    /// Only the `day_offset` coefficient is reported.
    fn describe(&self) -> String {
        format!(
            "Ridge Regression (alpha = {:.1}): {}",
            self.alpha,
            self.fit.equation(1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::LinearRegression;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_invalid_alpha() {
        assert!(RidgeRegression::new(0.0).is_err());
        assert!(RidgeRegression::new(-1.0).is_err());
        assert!(RidgeRegression::new(f64::NAN).is_err());
        assert_eq!(RidgeRegression::default().alpha(), 1.0);
    }

    #[test]
    fn test_closed_form_single_feature() {
        // Centered x = [-1, 0, 1], centered y = [-2, 0, 2]
        // β = Σxy / (Σx² + α) = 4 / (2 + 1)
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![1.0, 3.0, 5.0];
        let fit = RidgeRegression::default().fit_ridge(&x, &y).unwrap();

        assert_abs_diff_eq!(fit.coefficients[0], 4.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 3.0 - 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shrinks_towards_zero() {
        let x = array![[0.0, 1.0], [1.0, 3.0], [2.0, 2.0], [3.0, 5.0], [4.0, 4.0]];
        let y = array![1.0, 4.0, 4.0, 8.0, 8.0];

        let ols = LinearRegression::new().fit_linear(&x, &y).unwrap();
        let ridge = RidgeRegression::default().fit_ridge(&x, &y).unwrap();

        let norm = |c: &Array1<f64>| c.dot(c).sqrt();
        assert!(norm(&ridge.coefficients) < norm(&ols.coefficients));
    }

    #[test]
    fn test_handles_collinear_columns() {
        let x = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let y = array![1.0, 2.0, 3.0];
        let model = RidgeRegression::default().fit(&x, &y).unwrap();
        let pred = model.predict(&x).unwrap();
        assert!(pred.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_describe_reports_first_coefficient() {
        let x = array![[0.0, 5.0], [1.0, 4.0], [2.0, 6.0], [3.0, 2.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];
        let model = RidgeRegression::default().fit(&x, &y).unwrap();
        let text = model.describe();

        assert!(text.starts_with("Ridge Regression (alpha = 1.0): close = "));
        assert!(text.ends_with(" * day_offset"));
        assert!(!text.contains("lag_1"));
    }
}
