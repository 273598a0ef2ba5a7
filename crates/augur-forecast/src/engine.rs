//! Model fitting and multi-step prediction over lag feature rows.

use augur_models::ModelKind;
use augur_traits::{AugurError, FeatureRow, Result};
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::metrics::FitMetrics;
use crate::request::MAX_HORIZON;

/// Output of one engine run, before dates are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// `day_offset` of each future step.
    pub future_offsets: Vec<i64>,
    /// Predicted close for each future step.
    pub predictions: Vec<f64>,
    /// The fitted model's description.
    pub description: String,
    /// In-sample diagnostics.
    pub fit: FitMetrics,
}

/// Fits one model class on feature rows and predicts future steps.
///
/// Future rows carry `day_offset` values `max + 1 ..= max + horizon` and
/// zero for every lag column. The forecast is a single-shot prediction, not a
/// recursive one: earlier predictions never feed later lags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForecastEngine {
    model: ModelKind,
}

impl ForecastEngine {
    /// Create an engine for a model class.
    #[must_use]
    pub const fn new(model: ModelKind) -> Self {
        Self { model }
    }

    /// The selected model class.
    #[must_use]
    pub const fn model(&self) -> ModelKind {
        self.model
    }

    /// Minimum number of feature rows needed with `num_lags` lag columns.
    #[must_use]
    pub const fn min_rows(num_lags: usize) -> usize {
        num_lags + 2
    }

    /// Fit on `rows` and predict `horizon` future steps.
    ///
    /// # Errors
    ///
    /// - [`AugurError::InvalidParameter`] if `horizon` is outside
    ///   `1..=MAX_HORIZON`
    /// - [`AugurError::EmptySeries`] if `rows` is empty
    /// - [`AugurError::InsufficientData`] if there are fewer than
    ///   `num_lags + 2` rows
    /// - [`AugurError::Model`] if fitting or prediction fails numerically
    pub fn run(&self, rows: &[FeatureRow], horizon: usize) -> Result<EngineOutput> {
        if !(1..=MAX_HORIZON).contains(&horizon) {
            return Err(AugurError::InvalidParameter(format!(
                "horizon must be between 1 and {MAX_HORIZON}, got {horizon}"
            )));
        }
        let Some(last) = rows.last() else {
            return Err(AugurError::EmptySeries(
                "no feature rows to fit on".to_string(),
            ));
        };

        let num_lags = last.lags.len();
        let required = Self::min_rows(num_lags);
        if rows.len() < required {
            return Err(AugurError::InsufficientData {
                required,
                available: rows.len(),
            });
        }

        let max_offset = rows.iter().map(|r| r.day_offset).max().unwrap_or(last.day_offset);
        let future_offsets = future_offsets(max_offset, horizon)?;

        let (x, y) = feature_matrix(rows)?;
        let model = self.model.build().fit(&x, &y)?;
        let fit = FitMetrics::calculate(&y, &model.predict(&x)?);

        let predictions = model
            .predict(&future_matrix(&future_offsets, num_lags))?
            .to_vec();

        debug!(
            model = self.model.name(),
            rows = rows.len(),
            num_lags,
            horizon,
            r_squared = fit.r_squared,
            "fitted forecast model"
        );

        Ok(EngineOutput {
            future_offsets,
            predictions,
            description: model.describe(),
            fit,
        })
    }
}

/// Offsets `max_offset + 1 ..= max_offset + horizon`.
fn future_offsets(max_offset: i64, horizon: usize) -> Result<Vec<i64>> {
    let out_of_range = || {
        AugurError::InvalidParameter(format!(
            "{horizon} steps past day offset {max_offset} are out of range"
        ))
    };
    let steps = i64::try_from(horizon).map_err(|_| out_of_range())?;
    (1..=steps)
        .map(|i| max_offset.checked_add(i).ok_or_else(out_of_range))
        .collect()
}

/// Design matrix `[day_offset, lag_1, .., lag_k]` and close targets.
///
/// # Errors
///
/// Returns [`AugurError::Model`] if rows disagree on the number of lags.
pub fn feature_matrix(rows: &[FeatureRow]) -> Result<(Array2<f64>, Array1<f64>)> {
    let width = rows.first().map_or(1, |r| r.lags.len() + 1);
    let mut values = Vec::with_capacity(rows.len() * width);
    for row in rows {
        if row.lags.len() + 1 != width {
            return Err(AugurError::Model(format!(
                "feature rows have inconsistent lag counts ({} and {})",
                width - 1,
                row.lags.len()
            )));
        }
        values.extend(row.features());
    }

    let x = Array2::from_shape_vec((rows.len(), width), values)
        .map_err(|e| AugurError::Model(format!("cannot shape feature matrix: {e}")))?;
    let y = rows.iter().map(|r| r.close).collect();
    Ok((x, y))
}

/// Future design matrix: the given offsets with every lag column zero.
#[must_use]
pub fn future_matrix(offsets: &[i64], num_lags: usize) -> Array2<f64> {
    Array2::from_shape_fn((offsets.len(), num_lags + 1), |(i, j)| {
        if j == 0 { offsets[i] as f64 } else { 0.0 }
    })
}
