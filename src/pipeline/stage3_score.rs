use thiserror::Error;

use crate::model::weights::WeightVector;
use crate::pipeline::stage2_normalize::NormalizedTable;

/// Allowed drift of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("weights sum to {sum:.6}; expected 1.0 within 1e-6")]
    InvalidWeight { sum: f64 },
    #[error("weights do not match criteria: {detail}")]
    WeightMismatch { detail: String },
}

/// Weighted sum per candidate over the table's criterion order. The sum
/// gate runs first, before any lookup or arithmetic; accumulation order is
/// fixed by the table, so scores are bitwise reproducible.
pub fn run_score(table: &NormalizedTable, weights: &WeightVector) -> Result<Vec<f64>, ScoreError> {
    let sum = weights.sum();
    // Negated so a NaN sum lands in the error arm.
    if !((sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE) {
        return Err(ScoreError::InvalidWeight { sum });
    }

    let aligned = align_weights(table, weights)?;

    let mut scores = vec![0.0f64; table.n_candidates];
    for (column, &weight) in table.columns.iter().zip(&aligned) {
        for (score, &value) in scores.iter_mut().zip(column) {
            *score += value * weight;
        }
    }
    Ok(scores)
}

/// Reorders weights into table column order; a criterion-set mismatch is
/// an error naming both sides.
fn align_weights(table: &NormalizedTable, weights: &WeightVector) -> Result<Vec<f64>, ScoreError> {
    for (i, (name, _)) in weights.entries.iter().enumerate() {
        if weights.entries[..i].iter().any(|(n, _)| n == name) {
            return Err(ScoreError::WeightMismatch {
                detail: format!("duplicate weight for criterion '{name}'"),
            });
        }
    }

    let mut aligned = Vec::with_capacity(table.criteria.len());
    let mut missing = Vec::new();
    for name in &table.criteria {
        match weights.get(name) {
            Some(w) => aligned.push(w),
            None => missing.push(name.as_str()),
        }
    }
    let extra: Vec<&str> = weights
        .entries
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| !table.criteria.iter().any(|c| c == name))
        .collect();

    if !missing.is_empty() || !extra.is_empty() {
        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!("criteria without weights [{}]", missing.join(", ")));
        }
        if !extra.is_empty() {
            parts.push(format!("weights without criteria [{}]", extra.join(", ")));
        }
        return Err(ScoreError::WeightMismatch {
            detail: parts.join("; "),
        });
    }
    Ok(aligned)
}
