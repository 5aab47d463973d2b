use serde::Serialize;

pub mod json;
pub mod text;

/// Payload of `summary.json`; floats are pre-rounded to six decimals.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub input: InputEcho,
    pub tie_break: String,
    pub criteria: Vec<CriterionSummary>,
    pub metrics: ScoreMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputEcho {
    pub path: String,
    pub delimiter: String,
    pub id_column: String,
    pub note_column: Option<String>,
    pub n_candidates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriterionSummary {
    pub name: String,
    /// Fraction actually applied, after the percent conversion.
    pub weight: f64,
    pub max_raw: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreMetrics {
    pub top_score: f64,
    pub top_candidate: String,
    pub score_mean: f64,
    pub score_median: f64,
    pub score_min: f64,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub source_path: String,
    pub id_column: String,
    pub note_column: Option<String>,
    pub n_candidates: usize,
    pub criteria: Vec<CriterionSummary>,
    pub top_score: f64,
    pub top_candidate: String,
    pub score_mean: f64,
    pub score_median: f64,
    pub top_rows: Vec<RankingRow>,
}

#[derive(Debug, Clone)]
pub struct RankingRow {
    pub rank: u32,
    pub name: String,
    pub score: f64,
    pub note: String,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Upper median, no averaging: the result is always one of the inputs.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((sorted.len() - 1) as f64 * 0.5).ceil() as usize;
    sorted[idx]
}
