use std::cmp::Ordering;

use crate::input::Dataset;
use crate::model::candidate::ScoredCandidate;
use crate::pipeline::stage2_normalize::NormalizedTable;

/// Sorts by final score descending and assigns dense 1-based ranks, no
/// gaps. The sort is stable over the original row order: equal scores keep
/// their dataset order, the earlier row taking the better rank.
pub fn run_rank(
    dataset: &Dataset,
    table: &NormalizedTable,
    scores: &[f64],
) -> Vec<ScoredCandidate> {
    let mut order: Vec<usize> = (0..dataset.candidates.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut ranked = Vec::with_capacity(order.len());
    for (position, &row) in order.iter().enumerate() {
        let candidate = &dataset.candidates[row];
        ranked.push(ScoredCandidate {
            name: candidate.name.clone(),
            raw: candidate.values.clone(),
            normalized: table.columns.iter().map(|col| col[row]).collect(),
            score: scores[row],
            rank: (position + 1) as u32,
            note: candidate.note.clone(),
        });
    }
    ranked
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rank.rs"]
mod tests;
