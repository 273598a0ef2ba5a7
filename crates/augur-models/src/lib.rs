//! Regression models for augur forecasts.
//!
//! Four model classes implement [`augur_traits::Regressor`]:
//! - [`LinearRegression`]: ordinary least squares with an intercept
//! - [`PolynomialRegression`]: least squares over all monomials up to degree 3
//! - [`RidgeRegression`]: L2-penalized least squares (`alpha = 1.0`)
//! - [`RandomForestRegression`]: 100 bootstrap regression trees, seeded
//!
//! Models are selected by name through the [`MODELS`] lookup table.
//!
//! # Example
//!
//! ```no_run
//! use augur_models::ModelKind;
//! use ndarray::array;
//!
//! let kind: ModelKind = "ridge".parse()?;
//! let model = kind.build().fit(&array![[0.0], [1.0], [2.0]], &array![1.0, 3.0, 5.0])?;
//! println!("{}", model.describe());
//! # Ok::<(), augur_traits::AugurError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod linalg;

pub mod forest;
pub mod linear;
pub mod polynomial;
pub mod registry;
pub mod ridge;
pub mod tree;

// Re-export key types
pub use forest::{FittedForest, ForestConfig, RandomForestRegression};
pub use linear::{FittedLinear, LinearFit, LinearRegression};
pub use polynomial::{FittedPolynomial, PolynomialRegression};
pub use registry::{MODELS, ModelInfo, ModelKind, available_models};
pub use ridge::{FittedRidge, RidgeRegression};
pub use tree::{RegressionTree, TreeConfig};
