//! Forecasting for augur.
//!
//! This crate ties the pipeline together:
//! - [`ForecastEngine`]: fits a model class on lag feature rows and predicts
//!   future steps
//! - [`project_dates`]: calendar dates for the projected steps
//! - [`FitMetrics`]: in-sample diagnostics of the fitted model
//! - [`Pipeline`]: validate, fetch, resample, featurize, fit and project one
//!   [`ForecastRequest`]
//!
//! # Example
//!
//! ```no_run
//! use augur_forecast::{ForecastRequest, Pipeline};
//! use augur_models::ModelKind;
//! use augur_source::{HttpFetcher, TickerRegistry};
//!
//! # async fn run() -> augur_traits::Result<()> {
//! let pipeline = Pipeline::new(TickerRegistry::builtin(), HttpFetcher::new());
//! let request = ForecastRequest::new("GOOG").with_model(ModelKind::Ridge);
//! let report = pipeline.run(&request).await?;
//! println!("{}", report.description);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod metrics;
pub mod pipeline;
pub mod projector;
pub mod request;

// Re-export key types
pub use engine::{EngineOutput, ForecastEngine, feature_matrix, future_matrix};
pub use metrics::FitMetrics;
pub use pipeline::{Forecast, ForecastReport, HistoryPoint, Pipeline, ProjectedPoint};
pub use projector::project_dates;
pub use request::{DEFAULT_HORIZON, ForecastRequest, MAX_HORIZON};
