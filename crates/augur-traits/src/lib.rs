#![doc(issue_tracker_base_url = "https://github.com/factordynamics/augur/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the augur forecasting pipeline.
//!
//! This crate provides the foundational abstractions shared by every stage of
//! the pipeline: price records and series, lag feature rows, the unified error
//! type, and the regression strategy traits.

/// The version of the augur-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod model;
pub mod types;

// Re-exports
pub use error::{AugurError, Result};
pub use model::{FittedModel, Regressor};
pub use types::{Date, FeatureRow, Granularity, PriceRecord, Series, Symbol};
