//! Feature engineering for augur forecasts.
//!
//! This crate prepares a raw price series for model fitting in two steps:
//! - Resampling: aggregate the raw feed into daily, weekly or monthly buckets,
//!   keeping the last observation of each bucket
//! - Lag features: derive `day_offset` and lagged closing prices for every
//!   record that has enough history
//!
//! # Example
//!
//! ```ignore
//! use augur_features::{LagConfig, build_lag_features, resample};
//! use augur_traits::Granularity;
//!
//! let daily = resample(&raw_series, Granularity::Daily);
//! let rows = build_lag_features(&daily, &LagConfig::new(3, 1)?);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod lags;
pub mod resample;

// Re-export key types
pub use lags::{LagConfig, build_lag_features, day_offset};
pub use resample::{bucket_start, resample};
