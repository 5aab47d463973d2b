use thiserror::Error;
use tracing::debug;

use crate::input::Dataset;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("dataset contains no candidates")]
    EmptyDataset,
    #[error("criterion '{name}': {reason}")]
    InvalidCriterion { name: String, reason: String },
    #[error("candidate '{candidate}', criterion '{criterion}': {reason}")]
    InvalidData {
        candidate: String,
        criterion: String,
        reason: String,
    },
}

/// Column-major normalized values, `columns[criterion][candidate]`, with
/// the per-column divisor kept in `maxima` for the report stage.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub criteria: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    pub maxima: Vec<f64>,
    pub n_candidates: usize,
}

/// Benefit normalization: raw value over column maximum, so the maximum
/// holder comes out at exactly 1.0. Raw values must be finite and
/// non-negative, with at least one positive value per column.
pub fn run_normalize(dataset: &Dataset) -> Result<NormalizedTable, NormalizeError> {
    if dataset.candidates.is_empty() {
        return Err(NormalizeError::EmptyDataset);
    }

    let n_candidates = dataset.candidates.len();
    let mut criteria = Vec::with_capacity(dataset.criteria.len());
    let mut columns = Vec::with_capacity(dataset.criteria.len());
    let mut maxima = Vec::with_capacity(dataset.criteria.len());

    for (j, criterion) in dataset.criteria.iter().enumerate() {
        let mut raw = Vec::with_capacity(n_candidates);
        let mut short_row: Option<&str> = None;
        for candidate in &dataset.candidates {
            match candidate.values.get(j) {
                Some(&v) => raw.push(v),
                None => short_row = short_row.or(Some(candidate.name.as_str())),
            }
        }
        if raw.is_empty() {
            return Err(NormalizeError::InvalidCriterion {
                name: criterion.name.clone(),
                reason: "column is missing from the dataset".to_string(),
            });
        }
        if let Some(candidate) = short_row {
            return Err(NormalizeError::InvalidData {
                candidate: candidate.to_string(),
                criterion: criterion.name.clone(),
                reason: "missing raw value".to_string(),
            });
        }

        let mut max = 0.0f64;
        for (candidate, &v) in dataset.candidates.iter().zip(&raw) {
            if !v.is_finite() {
                return Err(NormalizeError::InvalidData {
                    candidate: candidate.name.clone(),
                    criterion: criterion.name.clone(),
                    reason: format!("raw value {v} is not finite"),
                });
            }
            if v < 0.0 {
                return Err(NormalizeError::InvalidData {
                    candidate: candidate.name.clone(),
                    criterion: criterion.name.clone(),
                    reason: format!("negative raw value {v}"),
                });
            }
            if v > max {
                max = v;
            }
        }
        if max == 0.0 {
            return Err(NormalizeError::InvalidCriterion {
                name: criterion.name.clone(),
                reason: "all raw values are zero; benefit normalization is undefined".to_string(),
            });
        }

        debug!(criterion = %criterion.name, max, "normalizing column");
        columns.push(raw.iter().map(|&v| v / max).collect());
        maxima.push(max);
        criteria.push(criterion.name.clone());
    }

    Ok(NormalizedTable {
        criteria,
        columns,
        maxima,
        n_candidates,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
