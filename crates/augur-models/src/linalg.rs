//! Dense linear algebra kernels shared by the regression models.

use augur_traits::{AugurError, Result};
use ndarray::{Array1, Array2, Axis, s};

/// Check that a training set is non-empty, consistent and finite.
pub(crate) fn validate_training(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(AugurError::Model(format!(
            "feature matrix has {} rows but target has {} values",
            x.nrows(),
            y.len()
        )));
    }
    if x.nrows() == 0 {
        return Err(AugurError::Model("cannot fit on zero rows".to_string()));
    }
    if !x.iter().chain(y.iter()).all(|v| v.is_finite()) {
        return Err(AugurError::Model(
            "training data contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

/// Check that a prediction matrix has the width the model was fit on.
pub(crate) fn validate_width(x: &Array2<f64>, expected: usize) -> Result<()> {
    if x.ncols() == expected {
        Ok(())
    } else {
        Err(AugurError::Model(format!(
            "expected {expected} feature columns, got {}",
            x.ncols()
        )))
    }
}

/// Centered copies of `x` and `y` together with the column means and `ȳ`.
pub(crate) fn center(
    x: &Array2<f64>,
    y: &Array1<f64>,
) -> Result<(Array2<f64>, Array1<f64>, Array1<f64>, f64)> {
    let empty = || AugurError::Model("cannot center an empty matrix".to_string());
    let x_mean = x.mean_axis(Axis(0)).ok_or_else(empty)?;
    let y_mean = y.mean().ok_or_else(empty)?;
    Ok((x - &x_mean, y - y_mean, x_mean, y_mean))
}

/// Least-squares solution of `a · β ≈ b` via Householder QR with column
/// pivoting.
///
/// Columns whose remaining norm falls below a relative tolerance are treated
/// as linearly dependent and receive a zero coefficient, so collinear or
/// under-determined systems still yield a least-squares (basic) solution.
pub(crate) fn least_squares(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let (m, n) = a.dim();
    if b.len() != m {
        return Err(AugurError::Model(format!(
            "system has {m} rows but right-hand side has {}",
            b.len()
        )));
    }

    let mut r = a.to_owned();
    let mut qtb = b.to_owned();
    let mut perm: Vec<usize> = (0..n).collect();

    let largest = a
        .columns()
        .into_iter()
        .map(|c| c.dot(&c).sqrt())
        .fold(0.0_f64, f64::max);
    let tol = f64::EPSILON * m.max(n) as f64 * largest;

    let mut rank = 0;
    for k in 0..m.min(n) {
        let (pivot, norm) = (k..n)
            .map(|c| {
                let col = r.slice(s![k.., c]);
                (c, col.dot(&col).sqrt())
            })
            .fold((k, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if norm <= tol {
            break;
        }
        if pivot != k {
            for row in 0..m {
                r.swap([row, k], [row, pivot]);
            }
            perm.swap(k, pivot);
        }

        let alpha = if r[[k, k]] >= 0.0 { -norm } else { norm };
        let mut v = r.slice(s![k.., k]).to_owned();
        v[0] -= alpha;
        let vv = v.dot(&v);

        if vv > 0.0 {
            for c in k..n {
                let f = 2.0 * v.dot(&r.slice(s![k.., c])) / vv;
                r.slice_mut(s![k.., c]).scaled_add(-f, &v);
            }
            let f = 2.0 * v.dot(&qtb.slice(s![k..])) / vv;
            qtb.slice_mut(s![k..]).scaled_add(-f, &v);
        }
        rank += 1;
    }

    let mut z = Array1::<f64>::zeros(n);
    for i in (0..rank).rev() {
        let mut sum = qtb[i];
        for c in (i + 1)..rank {
            sum -= r[[i, c]] * z[c];
        }
        z[i] = sum / r[[i, i]];
    }

    let mut beta = Array1::<f64>::zeros(n);
    for (k, &col) in perm.iter().enumerate() {
        beta[col] = z[k];
    }

    if beta.iter().all(|v| v.is_finite()) {
        Ok(beta)
    } else {
        Err(AugurError::Model(
            "least-squares solution is not finite".to_string(),
        ))
    }
}

/// Solve `a · x = b` for symmetric positive definite `a` by Cholesky
/// decomposition.
pub(crate) fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(AugurError::Model(format!(
            "Cholesky solve needs a square system, got {}x{} and {}",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }

    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }

            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return Err(AugurError::Model(
                        "matrix is not positive definite".to_string(),
                    ));
                }
                l[[i, i]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }

    // L · z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[[i, j]] * z[j];
        }
        z[i] = sum / l[[i, i]];
    }

    // Lᵀ · x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = z[i];
        for j in (i + 1)..n {
            sum -= l[[j, i]] * x[j];
        }
        x[i] = sum / l[[i, i]];
    }

    Ok(x)
}
