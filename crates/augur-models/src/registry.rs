//! Model lookup table.
//!
//! Every model class the forecast engine offers is listed once in [`MODELS`].
//! Names typed by a user are resolved through this table rather than by
//! string comparison at each call site.

use augur_traits::{AugurError, Regressor, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::forest::RandomForestRegression;
use crate::linear::LinearRegression;
use crate::polynomial::PolynomialRegression;
use crate::ridge::RidgeRegression;

/// The model classes available for forecasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Ordinary least squares.
    #[default]
    Linear,
    /// Cubic polynomial least squares.
    Polynomial,
    /// L2-penalized least squares with `alpha = 1.0`.
    Ridge,
    /// 100-tree bootstrap forest.
    RandomForest,
}

impl ModelKind {
    /// Every model class, in table order.
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::Polynomial,
        Self::Ridge,
        Self::RandomForest,
    ];

    /// The table entry for this model class.
    #[must_use]
    pub fn info(&self) -> &'static ModelInfo {
        // The table holds one entry per variant, in variant order
        &MODELS[*self as usize]
    }

    /// Canonical machine name, e.g. `random_forest`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Human-facing name, e.g. `Random Forest Regression`.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.info().display_name
    }

    /// Construct the regressor with its default hyperparameters.
    #[must_use]
    pub fn build(&self) -> Box<dyn Regressor> {
        match self {
            Self::Linear => Box::new(LinearRegression::new()),
            Self::Polynomial => Box::new(PolynomialRegression::default()),
            Self::Ridge => Box::new(RidgeRegression::default()),
            Self::RandomForest => Box::new(RandomForestRegression::default()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelKind {
    type Err = AugurError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        MODELS
            .iter()
            .find(|info| {
                info.name.eq_ignore_ascii_case(wanted)
                    || info.display_name.eq_ignore_ascii_case(wanted)
                    || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(wanted))
            })
            .map(|info| info.kind)
            .ok_or_else(|| {
                let valid: Vec<&str> = MODELS.iter().map(|info| info.name).collect();
                AugurError::InvalidParameter(format!(
                    "unknown model '{wanted}', expected one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Metadata about a model class.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Model class
    pub kind: ModelKind,

    /// Canonical machine name
    pub name: &'static str,

    /// Name shown to users
    pub display_name: &'static str,

    /// One-line description
    pub description: &'static str,

    /// Additional accepted spellings
    pub aliases: &'static [&'static str],
}

/// The model lookup table.
pub static MODELS: [ModelInfo; 4] = [
    ModelInfo {
        kind: ModelKind::Linear,
        name: "linear",
        display_name: "Linear Regression",
        description: "Ordinary least squares on day offset and lags",
        aliases: &["lr", "ols", "linear_regression"],
    },
    ModelInfo {
        kind: ModelKind::Polynomial,
        name: "polynomial",
        display_name: "Polynomial Regression",
        description: "Least squares on all monomials up to degree 3",
        aliases: &["poly", "polynomial_regression"],
    },
    ModelInfo {
        kind: ModelKind::Ridge,
        name: "ridge",
        display_name: "Ridge Regression",
        description: "L2-penalized least squares, alpha = 1.0",
        aliases: &["ridge_regression"],
    },
    ModelInfo {
        kind: ModelKind::RandomForest,
        name: "random_forest",
        display_name: "Random Forest Regression",
        description: "Average of 100 bootstrap regression trees, seed 42",
        aliases: &["rf", "forest", "random forest", "random_forest_regression"],
    },
];

/// Get information about all available models.
#[must_use]
pub fn available_models() -> &'static [ModelInfo] {
    &MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_variants() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.info().kind, kind);
        }
        assert_eq!(available_models().len(), ModelKind::ALL.len());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<ModelKind>().unwrap(), ModelKind::Linear);
        assert_eq!(
            "Linear Regression".parse::<ModelKind>().unwrap(),
            ModelKind::Linear
        );
        assert_eq!("POLY".parse::<ModelKind>().unwrap(), ModelKind::Polynomial);
        assert_eq!(" ridge ".parse::<ModelKind>().unwrap(), ModelKind::Ridge);
        assert_eq!("rf".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert_eq!(
            "Random Forest Regression".parse::<ModelKind>().unwrap(),
            ModelKind::RandomForest
        );
    }

    #[test]
    fn test_unknown_name_lists_valid() {
        let err = "lasso".parse::<ModelKind>().unwrap_err();
        match err {
            AugurError::InvalidParameter(msg) => {
                assert!(msg.contains("lasso"));
                assert!(msg.contains("random_forest"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.build().name(), kind.name());
        }
    }

    #[test]
    fn test_serde_names_match_table() {
        for kind in ModelKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
        assert_eq!(ModelKind::default(), ModelKind::Linear);
        assert_eq!(ModelKind::Ridge.to_string(), "Ridge Regression");
    }
}
