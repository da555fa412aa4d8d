use serde::Serialize;
use tracing::{debug, info, warn};

use super::linalg::symmetric_eigen;
use super::serve::ServeFeature;
use super::types::EnrichedMatch;
use crate::config::{FeatureParams, MissingPolicy};
use crate::error::{ServeForgeError, SfResult};

pub const COMPONENTS: usize = 2;

// Columns with a smaller spread are treated as constant (scale 1).
const MIN_SCALE: f64 = 1e-12;

/// Everything needed to explain or re-apply a projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionModel {
    pub features: Vec<String>,
    pub missing_policy: MissingPolicy,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    /// One unit vector per component, aligned with `features`.
    pub loadings: Vec<Vec<f64>>,
    pub explained_variance: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
    pub rows_projected: usize,
    pub rows_dropped: usize,
    pub values_imputed: usize,
}

impl ProjectionModel {
    /// Scores of one already-filled feature vector.
    pub fn project(&self, values: &[f64]) -> [f64; COMPONENTS] {
        let mut out = [0.0; COMPONENTS];
        for (k, loading) in self.loadings.iter().enumerate().take(COMPONENTS) {
            out[k] = values
                .iter()
                .zip(&self.means)
                .zip(&self.scales)
                .zip(loading)
                .map(|(((x, mean), scale), w)| (x - mean) / scale * w)
                .sum();
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub rows: Vec<EnrichedMatch>,
    pub model: ProjectionModel,
}

/// Standardizes the serve feature vectors of `rows` and projects them onto
/// their two directions of largest variance.
///
/// Axis signs are fixed so the largest loading of each axis is positive;
/// other decomposition routines may return either sign.
pub fn reduce(rows: &[EnrichedMatch], params: &FeatureParams) -> SfResult<Projection> {
    let features = ServeFeature::feature_set(params.include_bp_saved_rate);
    let dims = features.len();

    let raw: Vec<Vec<Option<f64>>> = rows
        .iter()
        .map(|row| features.iter().map(|f| f.value(row)).collect())
        .collect();

    let (kept, matrix, values_imputed) = match params.missing_policy {
        MissingPolicy::Drop => {
            let mut kept = Vec::new();
            let mut matrix = Vec::new();
            for (i, values) in raw.iter().enumerate() {
                if let Some(full) = values.iter().copied().collect::<Option<Vec<f64>>>() {
                    kept.push(i);
                    matrix.push(full);
                }
            }
            (kept, matrix, 0)
        }
        MissingPolicy::Impute => {
            let fill = column_means(&raw, dims);
            for (f, mean) in features.iter().zip(&fill) {
                if mean.is_none() {
                    warn!("Feature '{}' has no observed values; filling with 0", f);
                }
            }
            let mut imputed = 0usize;
            let matrix: Vec<Vec<f64>> = raw
                .iter()
                .map(|values| {
                    values
                        .iter()
                        .zip(&fill)
                        .map(|(v, mean)| {
                            v.unwrap_or_else(|| {
                                imputed += 1;
                                mean.unwrap_or(0.0)
                            })
                        })
                        .collect()
                })
                .collect();
            ((0..rows.len()).collect(), matrix, imputed)
        }
    };

    if matrix.is_empty() {
        return Err(ServeForgeError::Validation(format!(
            "no rows left to project ({} in, missing policy '{}')",
            rows.len(),
            params.missing_policy
        )));
    }

    let n = matrix.len();
    let means: Vec<f64> = (0..dims)
        .map(|j| matrix.iter().map(|r| r[j]).sum::<f64>() / n as f64)
        .collect();
    let scales: Vec<f64> = (0..dims)
        .map(|j| {
            let var = matrix.iter().map(|r| (r[j] - means[j]).powi(2)).sum::<f64>() / n as f64;
            let std = var.sqrt();
            if std > MIN_SCALE {
                std
            } else {
                1.0
            }
        })
        .collect();

    let standardized: Vec<Vec<f64>> = matrix
        .iter()
        .map(|r| (0..dims).map(|j| (r[j] - means[j]) / scales[j]).collect())
        .collect();

    let covariance = covariance(&standardized, dims);
    let eigen = symmetric_eigen(&covariance);

    let total_variance: f64 = eigen.values.iter().map(|v| v.max(0.0)).sum();
    let explained_variance: Vec<f64> = eigen.values.iter().take(COMPONENTS).copied().collect();
    let explained_variance_ratio = explained_variance
        .iter()
        .map(|v| {
            if total_variance > 0.0 {
                v / total_variance
            } else {
                0.0
            }
        })
        .collect();
    let loadings: Vec<Vec<f64>> = eigen.vectors.into_iter().take(COMPONENTS).collect();

    let model = ProjectionModel {
        features: features.iter().map(|f| f.to_string()).collect(),
        missing_policy: params.missing_policy,
        means,
        scales,
        loadings,
        explained_variance,
        explained_variance_ratio,
        rows_projected: n,
        rows_dropped: rows.len() - n,
        values_imputed,
    };

    let projected = kept
        .iter()
        .zip(&matrix)
        .map(|(&i, values)| {
            let mut row = rows[i].clone();
            row.components = Some(model.project(values));
            row
        })
        .collect();

    info!(
        "🧭 Projection: {} rows, {} dropped, {} values imputed",
        model.rows_projected, model.rows_dropped, model.values_imputed
    );
    for (k, loading) in model.loadings.iter().enumerate() {
        debug!("   component {} loadings: {:?}", k + 1, loading);
    }
    info!(
        "   explained variance {:?} (ratio {:?})",
        model.explained_variance, model.explained_variance_ratio
    );

    Ok(Projection {
        rows: projected,
        model,
    })
}

fn column_means(raw: &[Vec<Option<f64>>], dims: usize) -> Vec<Option<f64>> {
    (0..dims)
        .map(|j| {
            let (sum, count) = raw
                .iter()
                .filter_map(|r| r[j])
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

// Sample covariance (n - 1), so eigenvalues read as explained variance.
fn covariance(standardized: &[Vec<f64>], dims: usize) -> Vec<Vec<f64>> {
    let denom = standardized.len().saturating_sub(1).max(1) as f64;
    let mut cov = vec![vec![0.0; dims]; dims];
    for row in standardized {
        for i in 0..dims {
            for j in i..dims {
                cov[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..dims {
        for j in i..dims {
            cov[i][j] /= denom;
            cov[j][i] = cov[i][j];
        }
    }
    cov
}
