use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::candidate::Candidate;
use crate::model::criteria::Criterion;

/// Optional free-text column, carried through to the reports and never
/// scored.
pub const NOTE_COLUMN: &str = "rekomendasi";

pub const DEFAULT_ID_COLUMN: &str = "nama";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// One loaded input file; candidate values are aligned to the criterion
/// order the caller requested.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub criteria: Vec<Criterion>,
    pub candidates: Vec<Candidate>,
    pub id_column: String,
    pub note_column: Option<String>,
    pub delimiter: u8,
}

/// Loads a delimited candidate file. Headers match after trimming and
/// lowercasing; rows with an empty identifier are skipped with a warning.
pub fn load_dataset(
    path: &Path,
    criteria: &[Criterion],
    id_column: &str,
    delimiter: Option<u8>,
) -> Result<Dataset, InputError> {
    let raw = std::fs::read_to_string(path)?;
    let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    if text.trim().is_empty() {
        return Err(InputError::Parse(format!(
            "dataset file is empty: {}",
            path.display()
        )));
    }

    let delim = match delimiter {
        Some(d) => d,
        None => sniff_delimiter(text),
    };
    debug!(delimiter = %delimiter_name(delim), "reading dataset");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delim)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let wanted_id = normalize_header(id_column);
    let id_idx = find_column(&headers, &wanted_id).ok_or_else(|| {
        InputError::MissingColumn(format!("identifier column '{wanted_id}'"))
    })?;

    let mut criterion_idx = Vec::with_capacity(criteria.len());
    for criterion in criteria {
        let wanted = normalize_header(&criterion.name);
        let idx = find_column(&headers, &wanted).ok_or_else(|| {
            InputError::MissingColumn(format!("criterion column '{wanted}'"))
        })?;
        criterion_idx.push(idx);
    }

    let note_idx = find_column(&headers, NOTE_COLUMN);
    debug!(
        id_column = id_idx,
        criterion_columns = ?criterion_idx,
        note_column = ?note_idx,
        "resolved dataset columns"
    );

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or((idx + 2) as u64);

        let name = record.get(id_idx).unwrap_or("").trim().to_string();
        if name.is_empty() {
            warn!(line, "row has no identifier; skipping");
            continue;
        }
        if !seen.insert(name.clone()) {
            warn!(line, name = %name, "duplicate identifier; ranking both rows");
        }

        let mut values = Vec::with_capacity(criteria.len());
        for (slot, &col) in criterion_idx.iter().enumerate() {
            let cell = record.get(col).unwrap_or("").trim();
            let value: f64 = cell.parse().map_err(|_| {
                InputError::Parse(format!(
                    "line {}: value '{}' for criterion '{}' is not numeric",
                    line, cell, criteria[slot].name
                ))
            })?;
            values.push(value);
        }

        let note = note_idx
            .and_then(|col| record.get(col))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        candidates.push(Candidate { name, values, note });
    }

    info!(
        path = %path.display(),
        candidates = candidates.len(),
        criteria = criteria.len(),
        "dataset loaded"
    );

    Ok(Dataset {
        criteria: criteria.to_vec(),
        candidates,
        id_column: wanted_id,
        note_column: note_idx.map(|_| NOTE_COLUMN.to_string()),
        delimiter: delim,
    })
}

/// Trim plus lowercase, applied to file headers and CLI criterion names.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Most frequent separator in the header line wins; ties go to the comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut best = (b',', header.bytes().filter(|&b| b == b',').count());
    for cand in [b';', b'\t'] {
        let count = header.bytes().filter(|&b| b == cand).count();
        if count > best.1 {
            best = (cand, count);
        }
    }
    best.0
}

fn find_column(headers: &[String], wanted: &str) -> Option<usize> {
    headers.iter().position(|h| h == wanted)
}

fn delimiter_name(delim: u8) -> String {
    match delim {
        b'\t' => "tab".to_string(),
        other => char::from(other).to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
