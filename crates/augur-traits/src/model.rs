//! Regression strategy traits.
//!
//! Every model class the forecast engine can use implements [`Regressor`].
//! Fitting produces a [`FittedModel`] that owns its learned parameters and can
//! both predict and describe itself.

use ndarray::{Array1, Array2};

use crate::Result;

/// An untrained regression strategy.
///
/// Implementations hold only hyperparameters; all learned state lives in the
/// [`FittedModel`] returned by [`Regressor::fit`], so one regressor can be fit
/// any number of times without interference.
///
/// # Example
///
/// ```no_run
/// use augur_traits::{FittedModel, Regressor, Result};
/// use ndarray::{Array1, Array2};
///
/// struct MeanModel(f64);
///
/// impl FittedModel for MeanModel {
///     fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
///         Ok(Array1::from_elem(x.nrows(), self.0))
///     }
///
///     fn describe(&self) -> String {
///         format!("Mean: {:.4}", self.0)
///     }
/// }
///
/// struct MeanRegressor;
///
/// impl Regressor for MeanRegressor {
///     fn name(&self) -> &str {
///         "mean"
///     }
///
///     fn fit(&self, _x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
///         Ok(Box::new(MeanModel(y.mean().unwrap_or(0.0))))
///     }
/// }
/// ```
pub trait Regressor: Send + Sync {
    /// Returns the canonical name of this model class.
    fn name(&self) -> &str;

    /// Fits the model on a feature matrix and target vector.
    ///
    /// # Arguments
    ///
    /// * `x` - Feature matrix, one row per observation
    /// * `y` - Target values, one per row of `x`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `x` and `y` disagree on the number of observations
    /// - The inputs contain non-finite values
    /// - The underlying linear system cannot be solved
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>>;
}

/// A trained model.
pub trait FittedModel: Send + Sync {
    /// Predicts one value per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has a different number of columns than the
    /// matrix the model was fit on.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Human-readable summary of the fitted model.
    fn describe(&self) -> String;
}
