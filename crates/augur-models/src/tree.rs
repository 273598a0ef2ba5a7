//! CART regression trees.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Growth limits for a single regression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Minimum samples a node needs before it may split.
    pub min_samples_split: usize,
    /// Minimum samples on each side of a split.
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    sse: f64,
}

/// A fitted regression tree stored as a flat node arena.
///
/// Grown without a depth limit; every node considers every feature and
/// chooses the threshold minimizing the summed squared error of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grow a tree on the rows of `x` listed in `sample`.
    ///
    /// `sample` may repeat rows (bootstrap draws). It must be non-empty.
    #[must_use]
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, sample: Vec<usize>, config: &TreeConfig) -> Self {
        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        let mut pending = vec![(0usize, sample)];

        while let Some((id, rows)) = pending.pop() {
            let split = if rows.len() < config.min_samples_split || is_pure(y, &rows) {
                None
            } else {
                best_split(x, y, &rows, config.min_samples_leaf)
            };

            let Some(split) = split else {
                nodes[id] = Node::Leaf {
                    value: mean(y, &rows),
                };
                continue;
            };

            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .partition(|&&i| x[[i, split.feature]] <= split.threshold);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf { value: 0.0 });
            nodes.push(Node::Leaf { value: 0.0 });
            nodes[id] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
            pending.push((right, right_rows));
            pending.push((left, left_rows));
        }

        Self { nodes }
    }

    /// Predict a single feature vector.
    #[must_use]
    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    /// Number of leaves.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }
}

fn mean(y: &Array1<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|&i| y[i]).sum::<f64>() / rows.len() as f64
}

fn is_pure(y: &Array1<f64>, rows: &[usize]) -> bool {
    rows.first()
        .is_none_or(|&first| rows.iter().all(|&i| y[i] == y[first]))
}

/// Sweep every feature in sorted order, scoring each boundary between
/// distinct values with running sums.
fn best_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    rows: &[usize],
    min_leaf: usize,
) -> Option<Split> {
    let n = rows.len();
    let total_sum: f64 = rows.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = rows.iter().map(|&i| y[i] * y[i]).sum();

    let mut best: Option<Split> = None;
    let mut order = rows.to_vec();

    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for pos in 0..n - 1 {
            let i = order[pos];
            left_sum += y[i];
            left_sq += y[i] * y[i];

            let here = x[[i, feature]];
            let next = x[[order[pos + 1], feature]];
            if here == next {
                continue;
            }

            let n_left = pos + 1;
            let n_right = n - n_left;
            if n_left < min_leaf || n_right < min_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / n_left as f64)
                + (right_sq - right_sum * right_sum / n_right as f64);

            if best.is_none_or(|b| sse < b.sse) {
                let mid = here + (next - here) / 2.0;
                let threshold = if mid < next { mid } else { here };
                best = Some(Split {
                    feature,
                    threshold,
                    sse,
                });
            }
        }
    }

    best
}
