//! Dense symmetric eigen-decomposition for small feature counts.
//!
//! Cyclic Jacobi rotations: every sweep zeroes each off-diagonal pair once,
//! accumulating the rotations into the eigenvector matrix. Converges
//! quadratically for the ≤ 10×10 covariance matrices the reducer builds.

const MAX_SWEEPS: usize = 100;
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-22;
const SIGN_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Eigen {
    /// Eigenvalues, descending.
    pub values: Vec<f64>,
    /// `vectors[k]` is the unit eigenvector paired with `values[k]`.
    pub vectors: Vec<Vec<f64>>,
}

pub fn symmetric_eigen(matrix: &[Vec<f64>]) -> Eigen {
    let n = matrix.len();
    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut v = identity(n);

    for _ in 0..MAX_SWEEPS {
        if off_diagonal_norm(&a) < OFF_DIAGONAL_TOLERANCE {
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q].abs() > f64::MIN_POSITIVE {
                    rotate(&mut a, &mut v, p, q);
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[j][j].total_cmp(&a[i][i]).then(i.cmp(&j)));

    let values = order.iter().map(|&k| a[k][k]).collect();
    let vectors = order
        .iter()
        .map(|&k| {
            let mut column: Vec<f64> = (0..n).map(|row| v[row][k]).collect();
            canonical_sign(&mut column);
            column
        })
        .collect();

    Eigen { values, vectors }
}

// A <- JᵀAJ with J chosen so that A[p][q] becomes zero.
fn rotate(a: &mut [Vec<f64>], v: &mut [Vec<f64>], p: usize, q: usize) {
    let n = a.len();
    let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
    let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
    let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    for k in 0..n {
        let (akp, akq) = (a[k][p], a[k][q]);
        a[k][p] = c * akp - s * akq;
        a[k][q] = s * akp + c * akq;
    }
    for k in 0..n {
        let (apk, aqk) = (a[p][k], a[q][k]);
        a[p][k] = c * apk - s * aqk;
        a[q][k] = s * apk + c * aqk;
    }
    for row in v.iter_mut() {
        let (vkp, vkq) = (row[p], row[q]);
        row[p] = c * vkp - s * vkq;
        row[q] = s * vkp + c * vkq;
    }
}

fn off_diagonal_norm(a: &[Vec<f64>]) -> f64 {
    let mut sum = 0.0;
    for (i, row) in a.iter().enumerate() {
        for (j, x) in row.iter().enumerate() {
            if i != j {
                sum += x * x;
            }
        }
    }
    sum
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Flips `v` so its largest-magnitude entry is positive. Among entries of
/// equal magnitude the first one decides.
pub fn canonical_sign(v: &mut [f64]) {
    let mut pivot = 0.0_f64;
    for &x in v.iter() {
        if x.abs() > pivot.abs() + SIGN_EPSILON {
            pivot = x;
        }
    }
    if pivot < 0.0 {
        for x in v.iter_mut() {
            *x = -*x;
        }
    }
}
