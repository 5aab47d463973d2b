use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::model::candidate::ScoredCandidate;
use crate::model::weights::WeightVector;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    CriterionSummary, InputEcho, RankingRow, ReportContext, ScoreMetrics, SummaryData,
    format_f64_6, mean, median, round6,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub ranked: &'a [ScoredCandidate],
    pub criteria: &'a [String],
    pub maxima: &'a [f64],
    pub weights: &'a WeightVector,

    pub source_path: String,
    pub id_column: String,
    pub note_column: Option<String>,
    pub delimiter: char,
    pub top_n: usize,

    pub tool_name: String,
    pub tool_version: String,
}

/// Writes `ranking.csv`, `summary.json` and `report.txt` into `out_dir`.
/// Floats go out with six decimals, so a rerun over the same input rewrites
/// every file byte-identically.
pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let ranking_path = out_dir.join("ranking.csv");
    write_ranking_csv(input, &ranking_path)?;

    let summary = build_summary(input);
    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let report_path = out_dir.join("report.txt");
    let report_ctx = build_report_context(input, &summary);
    write_text(&report_path, &render_report_text(&report_ctx))?;

    info!(
        out_dir = %out_dir.display(),
        candidates = input.ranked.len(),
        "wrote ranking.csv, summary.json, report.txt"
    );
    Ok(())
}

fn write_ranking_csv(input: &Stage5Input<'_>, path: &Path) -> Result<(), ReportError> {
    let mut w = csv::Writer::from_path(path)?;

    let mut header = vec!["ranking".to_string(), input.id_column.clone()];
    for name in input.criteria {
        header.push(name.clone());
    }
    for name in input.criteria {
        header.push(format!("norm_{name}"));
    }
    header.push("skor_akhir".to_string());
    if let Some(note_column) = &input.note_column {
        header.push(note_column.clone());
    }
    w.write_record(&header)?;

    for candidate in input.ranked {
        let mut row = vec![candidate.rank.to_string(), candidate.name.clone()];
        for &v in &candidate.raw {
            row.push(format_f64_6(v));
        }
        for &v in &candidate.normalized {
            row.push(format_f64_6(v));
        }
        row.push(format_f64_6(candidate.score));
        if input.note_column.is_some() {
            row.push(candidate.note.clone().unwrap_or_default());
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let scores: Vec<f64> = input.ranked.iter().map(|c| c.score).collect();
    let top = input.ranked.first();

    let criteria = input
        .criteria
        .iter()
        .zip(input.maxima)
        .map(|(name, &max_raw)| CriterionSummary {
            name: name.clone(),
            weight: round6(input.weights.get(name).unwrap_or(0.0)),
            max_raw,
        })
        .collect();

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        input: InputEcho {
            path: input.source_path.clone(),
            delimiter: delimiter_label(input.delimiter),
            id_column: input.id_column.clone(),
            note_column: input.note_column.clone(),
            n_candidates: input.ranked.len(),
        },
        tie_break: "input_order".to_string(),
        criteria,
        metrics: ScoreMetrics {
            top_score: round6(top.map(|c| c.score).unwrap_or(0.0)),
            top_candidate: top.map(|c| c.name.clone()).unwrap_or_default(),
            score_mean: round6(mean(&scores)),
            score_median: round6(median(&scores)),
            score_min: round6(scores.last().copied().unwrap_or(0.0)),
        },
    }
}

fn build_report_context(input: &Stage5Input<'_>, summary: &SummaryData) -> ReportContext {
    let top_rows = input
        .ranked
        .iter()
        .take(input.top_n)
        .map(|c| RankingRow {
            rank: c.rank,
            name: c.name.clone(),
            score: c.score,
            note: c.note.clone().unwrap_or_default(),
        })
        .collect();

    ReportContext {
        source_path: input.source_path.clone(),
        id_column: input.id_column.clone(),
        note_column: input.note_column.clone(),
        n_candidates: input.ranked.len(),
        criteria: summary.criteria.clone(),
        top_score: summary.metrics.top_score,
        top_candidate: summary.metrics.top_candidate.clone(),
        score_mean: summary.metrics.score_mean,
        score_median: summary.metrics.score_median,
        top_rows,
    }
}

fn delimiter_label(delimiter: char) -> String {
    match delimiter {
        '\t' => "tab".to_string(),
        other => other.to_string(),
    }
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
