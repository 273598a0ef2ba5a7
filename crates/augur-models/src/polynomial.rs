//! Polynomial regression via monomial expansion.

use augur_traits::{AugurError, FittedModel, Regressor, Result};
use ndarray::{Array1, Array2, Axis};

use crate::linalg::{validate_training, validate_width};
use crate::linear::{LinearFit, LinearRegression};

/// Default polynomial degree.
pub const DEFAULT_DEGREE: usize = 3;

/// Per-column min-max scaling to `[0, 1]`.
///
/// Constant columns map to zero.
#[derive(Debug, Clone, PartialEq)]
struct MinMaxScaler {
    min: Array1<f64>,
    range: Array1<f64>,
}

impl MinMaxScaler {
    fn fit(x: &Array2<f64>) -> Self {
        let min = x.fold_axis(Axis(0), f64::INFINITY, |acc, &v| acc.min(v));
        let max = x.fold_axis(Axis(0), f64::NEG_INFINITY, |acc, &v| acc.max(v));
        let range = (&max - &min).mapv(|r| if r > 0.0 { r } else { 1.0 });
        Self { min, range }
    }

    fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        (x - &self.min) / &self.range
    }
}

/// Every monomial of total degree `1..=degree` over `n_features` inputs,
/// as non-decreasing lists of column indices.
fn monomials(n_features: usize, degree: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut frontier: Vec<Vec<usize>> = vec![Vec::new()];
    for _ in 0..degree {
        let mut next = Vec::new();
        for term in &frontier {
            let start = term.last().copied().unwrap_or(0);
            for j in start..n_features {
                let mut extended = term.clone();
                extended.push(j);
                next.push(extended);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

fn expand(x: &Array2<f64>, terms: &[Vec<usize>]) -> Array2<f64> {
    Array2::from_shape_fn((x.nrows(), terms.len()), |(i, t)| {
        terms[t].iter().map(|&j| x[[i, j]]).product()
    })
}

/// Least squares over the polynomial expansion of the inputs.
///
/// Inputs are min-max scaled before expansion so the cubic terms of large
/// `day_offset` values stay well conditioned. Scaling is affine and leaves the
/// span of the expanded features unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialRegression {
    degree: usize,
}

impl Default for PolynomialRegression {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
        }
    }
}

impl PolynomialRegression {
    /// Create a polynomial model of the given degree.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::InvalidParameter`] if `degree` is zero.
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(AugurError::InvalidParameter(
                "polynomial degree must be at least 1".to_string(),
            ));
        }
        Ok(Self { degree })
    }

    /// The maximum total degree of the expansion.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }
}

/// Fitted form of [`PolynomialRegression`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPolynomial {
    degree: usize,
    n_features: usize,
    scaler: MinMaxScaler,
    terms: Vec<Vec<usize>>,
    fit: LinearFit,
}

impl FittedPolynomial {
    /// Number of columns in the expanded design matrix.
    #[must_use]
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }
}

impl Regressor for PolynomialRegression {
    fn name(&self) -> &str {
        "polynomial"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        validate_training(x, y)?;

        let scaler = MinMaxScaler::fit(x);
        let terms = monomials(x.ncols(), self.degree);
        let design = expand(&scaler.transform(x), &terms);
        let fit = LinearRegression::new().fit_linear(&design, y)?;

        Ok(Box::new(FittedPolynomial {
            degree: self.degree,
            n_features: x.ncols(),
            scaler,
            terms,
            fit,
        }))
    }
}

impl FittedModel for FittedPolynomial {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        validate_width(x, self.n_features)?;
        let design = expand(&self.scaler.transform(x), &self.terms);
        self.fit.evaluate(&design)
    }

    fn describe(&self) -> String {
        format!(
            "Polynomial Regression (degree {}): coefficients of the expanded feature set are not shown",
            self.degree
        )
    }
}
