//! Bootstrap-aggregated regression trees.

use augur_traits::{AugurError, FittedModel, Regressor, Result};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::linalg::{validate_training, validate_width};
use crate::tree::{RegressionTree, TreeConfig};

/// Random forest configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Per-tree growth limits.
    pub tree: TreeConfig,
    /// Base seed; tree `i` draws its bootstrap sample from `seed + i`.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            tree: TreeConfig::default(),
            seed: 42,
        }
    }
}

/// Random forest regression.
///
/// Each tree is grown on a bootstrap sample of the rows, considering every
/// feature at every split. Predictions average the trees. Sampling is seeded,
/// so fitting the same data twice gives identical forests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomForestRegression {
    config: ForestConfig,
}

impl RandomForestRegression {
    /// Create a forest with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::InvalidParameter`] if `n_trees` is zero.
    pub fn new(config: ForestConfig) -> Result<Self> {
        if config.n_trees == 0 {
            return Err(AugurError::InvalidParameter(
                "a random forest needs at least one tree".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// The forest configuration.
    #[must_use]
    pub const fn config(&self) -> &ForestConfig {
        &self.config
    }
}

/// Fitted form of [`RandomForestRegression`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedForest {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl FittedForest {
    /// Number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForestRegression {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        validate_training(x, y)?;
        let n = x.nrows();

        let trees: Vec<RegressionTree> = (0..self.config.n_trees)
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(i as u64));
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(x, y, sample, &self.config.tree)
            })
            .collect();

        debug!(
            trees = trees.len(),
            rows = n,
            features = x.ncols(),
            "fitted random forest"
        );

        Ok(Box::new(FittedForest {
            n_features: x.ncols(),
            trees,
        }))
    }
}

impl FittedModel for FittedForest {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        validate_width(x, self.n_features)?;
        let n_trees = self.trees.len() as f64;
        Ok(x.rows()
            .into_iter()
            .map(|row| {
                self.trees
                    .iter()
                    .map(|tree| tree.predict_row(row))
                    .sum::<f64>()
                    / n_trees
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!(
            "Random Forest Regression ({} trees): no closed-form equation available",
            self.trees.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn training_set() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((30, 2), |(i, j)| {
            if j == 0 { i as f64 } else { ((i * 7) % 11) as f64 }
        });
        let y = x.rows().into_iter().map(|r| 50.0 + r[0] * 1.5 - r[1]).collect();
        (x, y)
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = training_set();
        let forest = RandomForestRegression::default();
        let a = forest.fit(&x, &y).unwrap().predict(&x).unwrap();
        let b = forest.fit(&x, &y).unwrap().predict(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_fit() {
        let (x, y) = training_set();
        let a = RandomForestRegression::default().fit(&x, &y).unwrap();
        let b = RandomForestRegression::new(ForestConfig {
            seed: 7,
            ..ForestConfig::default()
        })
        .unwrap()
        .fit(&x, &y)
        .unwrap();

        let probe = array![[10.5, 3.5], [20.5, 6.5]];
        assert_ne!(a.predict(&probe).unwrap(), b.predict(&probe).unwrap());
    }

    #[test]
    fn test_predictions_within_target_range() {
        let (x, y) = training_set();
        let model = RandomForestRegression::default().fit(&x, &y).unwrap();
        let lo = y.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Trees average training targets, so they cannot extrapolate
        let pred = model.predict(&array![[-100.0, 0.0], [1000.0, 50.0]]).unwrap();
        assert!(pred.iter().all(|&p| p >= lo && p <= hi));
    }

    #[test]
    fn test_constant_target() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![4.0, 4.0, 4.0];
        let model = RandomForestRegression::default().fit(&x, &y).unwrap();
        assert_eq!(model.predict(&array![[9.0]]).unwrap(), array![4.0]);
    }

    #[test]
    fn test_describe_and_config() {
        assert!(RandomForestRegression::new(ForestConfig {
            n_trees: 0,
            ..ForestConfig::default()
        })
        .is_err());

        let model = RandomForestRegression::default()
            .fit(&array![[0.0], [1.0]], &array![0.0, 1.0])
            .unwrap();
        assert_eq!(
            model.describe(),
            "Random Forest Regression (100 trees): no closed-form equation available"
        );
    }
}
