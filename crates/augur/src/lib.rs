#![doc(issue_tracker_base_url = "https://github.com/factordynamics/augur/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # augur
//!
//! Stock price forecasting from lagged closing prices.
//!
//! augur is an umbrella crate that re-exports all augur sub-crates for
//! convenience. A forecast request names a ticker, a granularity, a horizon
//! and a model class; the pipeline fetches the ticker's raw feed, resamples
//! it, builds lag features, fits the model and projects future closes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use augur::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let pipeline = Pipeline::new(TickerRegistry::builtin(), HttpFetcher::new());
//! let request = ForecastRequest::new("TSLA")
//!     .with_granularity(Granularity::Weekly)
//!     .with_model(ModelKind::RandomForest)
//!     .with_lags(3, 1)
//!     .with_horizon(5);
//!
//! let report = pipeline.run(&request).await?;
//! println!("{}", report.description);
//! for point in &report.forecast.horizon {
//!     println!("{} {:.2}", point.date, point.predicted_close);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types, the error type and the regression traits
//! - [`source`] - Ticker registry and raw feed loading
//! - [`features`] - Resampling and lag features
//! - [`models`] - Regression model classes and the model lookup table
//! - [`forecast`] - Forecast engine, date projection and the pipeline
//!
//! ## Architecture
//!
//! 1. **Source** resolves a ticker and fetches its raw CSV feed
//! 2. **Resampler** keeps the last observation of each calendar bucket
//! 3. **Lag featurizer** derives `day_offset` and lagged closes
//! 4. **Engine** fits the chosen model and predicts the future steps
//! 5. **Projector** attaches calendar dates to the predictions

/// Version information for the augur crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// - [`Regressor`] - An untrained model class
/// - [`FittedModel`] - A trained model that predicts and describes itself
/// - [`Series`], [`PriceRecord`], [`FeatureRow`] - Pipeline data
pub mod traits {
    pub use augur_traits::*;
}

pub use augur_traits::{AugurError, Result};
pub use augur_traits::{Date, FeatureRow, FittedModel, Granularity, PriceRecord, Regressor, Series};

// ============================================================================
// Pipeline Stages
// ============================================================================

/// Ticker registry and raw feed loading.
///
/// The built-in registry maps five tickers to hosted CSV files. A custom
/// registry can be loaded from a JSON file named by `AUGUR_TICKERS`.
pub mod source {
    pub use augur_source::*;
}

/// Resampling and lag feature construction.
pub mod features {
    pub use augur_features::*;
}

/// Regression model classes.
///
/// ## Available Models
///
/// - **linear**: ordinary least squares
/// - **polynomial**: least squares on degree-3 monomials
/// - **ridge**: L2-penalized least squares, `alpha = 1.0`
/// - **random_forest**: 100 bootstrap regression trees, seed 42
pub mod models {
    pub use augur_models::*;
}

/// Forecast engine, date projection and the end-to-end pipeline.
pub mod forecast {
    pub use augur_forecast::*;
}

pub use augur_forecast::{Forecast, ForecastReport, ForecastRequest, Pipeline};
pub use augur_models::ModelKind;

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use augur::prelude::*;
/// ```
pub mod prelude {
    pub use crate::forecast::{ForecastReport, ForecastRequest, Pipeline, ProjectedPoint};
    pub use crate::models::ModelKind;
    pub use crate::source::{Fetch, HttpFetcher, TickerRegistry};
    pub use crate::{AugurError, Granularity, Result};
}
