//! In-sample fit diagnostics.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Goodness-of-fit of a model on its own training rows.
///
/// Purely diagnostic: the forecast itself does not depend on these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Coefficient of determination
    pub r_squared: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Number of training rows
    pub n_train: usize,
}

impl FitMetrics {
    /// Compare in-sample predictions with the actual targets.
    ///
    /// # Arguments
    ///
    /// * `actual` - Observed targets
    /// * `predicted` - Model output for the same rows, same order
    ///
    /// With a constant target `r_squared` is 1.0 for a perfect fit and 0.0
    /// otherwise. Empty inputs give all-zero metrics.
    #[must_use]
    pub fn calculate(actual: &Array1<f64>, predicted: &Array1<f64>) -> Self {
        let n_train = actual.len().min(predicted.len());
        if n_train == 0 {
            return Self {
                r_squared: 0.0,
                mae: 0.0,
                rmse: 0.0,
                n_train,
            };
        }

        let n = n_train as f64;
        let pairs = || actual.iter().zip(predicted.iter());

        let mean = actual.iter().take(n_train).sum::<f64>() / n;
        let ss_res: f64 = pairs().map(|(a, p)| (a - p).powi(2)).sum();
        let ss_tot: f64 = actual.iter().take(n_train).map(|a| (a - mean).powi(2)).sum();
        let abs_err: f64 = pairs().map(|(a, p)| (a - p).abs()).sum();

        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Self {
            r_squared,
            mae: abs_err / n,
            rmse: (ss_res / n).sqrt(),
            n_train,
        }
    }
}
