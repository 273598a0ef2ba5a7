//! End-to-end forecast pipeline.
//!
//! A run goes validate, resolve, fetch, normalize, resample, featurize, fit,
//! predict and project, in that order. Each run builds its own series, rows
//! and model; nothing is cached between runs.

use augur_features::{build_lag_features, resample};
use augur_models::ModelKind;
use augur_source::{Fetch, SeriesSource, TickerRegistry};
use augur_traits::{AugurError, Date, Granularity, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::ForecastEngine;
use crate::metrics::FitMetrics;
use crate::projector::project_dates;
use crate::request::ForecastRequest;

/// One observed close of the resampled history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Calendar date of the record
    pub date: Date,
    /// Closing price
    pub close: f64,
}

/// One projected future step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Projected calendar date
    pub date: Date,
    /// Model prediction for that date
    pub predicted_close: f64,
}

/// Historical closes and projected closes for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Upper-cased ticker symbol
    pub ticker: String,
    /// Granularity of the history
    pub granularity: Granularity,
    /// Model class that produced the projection
    pub model: ModelKind,
    /// The resampled series, oldest first
    pub history: Vec<HistoryPoint>,
    /// Projected steps, in date order
    pub horizon: Vec<ProjectedPoint>,
}

/// A forecast together with the model's description and fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// The forecast itself
    pub forecast: Forecast,
    /// Human-readable model description
    pub description: String,
    /// In-sample diagnostics
    pub fit: FitMetrics,
}

/// Runs forecast requests against a ticker registry and a fetcher.
#[derive(Debug, Clone)]
pub struct Pipeline<'r, F> {
    source: SeriesSource<'r, F>,
}

impl<'r, F: Fetch> Pipeline<'r, F> {
    /// Create a pipeline over a registry and a fetcher.
    pub const fn new(registry: &'r TickerRegistry, fetcher: F) -> Self {
        Self {
            source: SeriesSource::new(registry, fetcher),
        }
    }

    /// The registry requests are resolved against.
    pub const fn registry(&self) -> &'r TickerRegistry {
        self.source.registry()
    }

    /// Execute one request.
    ///
    /// # Errors
    ///
    /// - [`AugurError::InvalidParameter`] for a malformed request, before any
    ///   fetch
    /// - [`AugurError::UnknownTicker`] if the ticker is not registered, before
    ///   any fetch
    /// - [`AugurError::DataUnavailable`] if the feed cannot be fetched or parsed
    /// - [`AugurError::EmptySeries`] if resampling or lag construction leaves
    ///   no rows
    /// - [`AugurError::InsufficientData`] if fewer than `num_lags + 2` feature
    ///   rows remain
    /// - [`AugurError::Model`] if the fit fails numerically
    pub async fn run(&self, request: &ForecastRequest) -> Result<ForecastReport> {
        let lags = request.validate()?;
        info!(
            ticker = %request.ticker,
            granularity = %request.granularity,
            model = request.model.name(),
            horizon = request.horizon,
            num_lags = request.num_lags,
            lag_gap = request.lag_gap,
            "running forecast"
        );

        let raw = self.source.load(&request.ticker).await?;
        let series = resample(&raw, request.granularity);
        let Some(max_date) = series.max_date() else {
            return Err(AugurError::EmptySeries(format!(
                "resampling {} to {} produced no records",
                series.symbol(),
                request.granularity
            )));
        };

        let rows = build_lag_features(&series, &lags);
        if rows.is_empty() {
            return Err(AugurError::EmptySeries(format!(
                "{} {} records are too few for {} lags {} apart",
                series.len(),
                request.granularity,
                lags.num_lags(),
                lags.lag_gap()
            )));
        }

        let dates = project_dates(max_date, request.horizon)?;
        let output = ForecastEngine::new(request.model).run(&rows, request.horizon)?;

        let horizon = dates
            .into_iter()
            .zip(output.predictions)
            .map(|(date, predicted_close)| ProjectedPoint {
                date,
                predicted_close,
            })
            .collect();
        let history = series
            .records()
            .iter()
            .map(|r| HistoryPoint {
                date: r.date(),
                close: r.close,
            })
            .collect();

        info!(
            ticker = series.symbol(),
            history = series.len(),
            rows = rows.len(),
            r_squared = output.fit.r_squared,
            "forecast complete"
        );

        Ok(ForecastReport {
            forecast: Forecast {
                ticker: series.symbol().to_string(),
                granularity: request.granularity,
                model: request.model,
                history,
                horizon,
            },
            description: output.description,
            fit: output.fit,
        })
    }

    /// Execute one request, turning any failure into a displayable message.
    ///
    /// # Errors
    ///
    /// Returns the [`AugurError::user_message`] of the failure.
    pub async fn run_for_display(
        &self,
        request: &ForecastRequest,
    ) -> std::result::Result<ForecastReport, String> {
        self.run(request).await.map_err(|e| {
            warn!(ticker = %request.ticker, error = %e, "forecast failed");
            e.user_message()
        })
    }
}
