mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::{DEFAULT_ID_COLUMN, load_dataset, normalize_header};
use crate::model::weights::WeightVector;
use crate::pipeline::stage2_normalize::run_normalize;
use crate::pipeline::stage3_score::run_score;
use crate::pipeline::stage4_rank::run_rank;
use crate::pipeline::stage5_report::{Stage5Input, write_reports};

#[derive(Debug, Parser)]
#[command(
    name = "saw-rank",
    version,
    about = "Deterministic candidate ranking with Simple Additive Weighting"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score and rank a candidate dataset, writing the run artifacts
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Candidate dataset (CSV; delimiter sniffed unless --delimiter is set)
    #[arg(long)]
    input: PathBuf,

    /// Output directory for ranking.csv, summary.json and report.txt
    #[arg(long)]
    out: PathBuf,

    /// Criterion weights as name=percent pairs, covering the full
    /// criterion set; percentages must total 100
    #[arg(long, default_value_t = default_weight_spec())]
    weights: String,

    /// Header of the identifier column
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,

    /// Rows shown in the report.txt ranking table
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Force the field delimiter instead of sniffing (',', ';' or tab)
    #[arg(long)]
    delimiter: Option<char>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(&args),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), String> {
    let weights = parse_weight_spec(&args.weights)?;
    let criteria = weights.criteria();

    let delimiter = match args.delimiter {
        Some(c) => Some(delimiter_byte(c)?),
        None => None,
    };

    let dataset = load_dataset(&args.input, &criteria, &args.id_column, delimiter)
        .map_err(|e| e.to_string())?;

    let table = run_normalize(&dataset).map_err(|e| e.to_string())?;
    let scores = run_score(&table, &weights).map_err(|e| e.to_string())?;
    let ranked = run_rank(&dataset, &table, &scores);

    let report_input = Stage5Input {
        ranked: &ranked,
        criteria: &table.criteria,
        maxima: &table.maxima,
        weights: &weights,
        source_path: args.input.display().to_string(),
        id_column: dataset.id_column.clone(),
        note_column: dataset.note_column.clone(),
        delimiter: char::from(dataset.delimiter),
        top_n: args.top,
        tool_name: "saw-rank".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&report_input, &args.out).map_err(|e| e.to_string())?;

    Ok(())
}

/// Renders `default_v1` back into `--weights` spec form, percent points.
fn default_weight_spec() -> String {
    WeightVector::default_v1()
        .entries
        .iter()
        .map(|(name, weight)| format!("{name}={}", weight * 100.0))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses `name=percent,name=percent` into a weight vector. Names get the
/// same normalization as dataset headers; totals are the scorer's problem.
fn parse_weight_spec(spec: &str) -> Result<WeightVector, String> {
    let mut entries: Vec<(String, f64)> = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, pct) = part
            .split_once('=')
            .ok_or_else(|| format!("invalid weight entry '{part}' (expected name=percent)"))?;
        let name = normalize_header(name);
        if name.is_empty() {
            return Err(format!("invalid weight entry '{part}': empty criterion name"));
        }
        let pct: f64 = pct
            .trim()
            .parse()
            .map_err(|_| format!("invalid weight entry '{part}': percent is not numeric"))?;
        if !(0.0..=100.0).contains(&pct) {
            return Err(format!(
                "invalid weight entry '{part}': percent must be between 0 and 100"
            ));
        }
        if entries.iter().any(|(n, _)| n == &name) {
            return Err(format!("duplicate criterion '{name}' in weight spec"));
        }
        entries.push((name, pct));
    }
    if entries.is_empty() {
        return Err("weight spec is empty".to_string());
    }
    Ok(WeightVector::from_percentages(&entries))
}

fn delimiter_byte(c: char) -> Result<u8, String> {
    match c {
        ',' | ';' | '\t' => Ok(c as u8),
        other => Err(format!("unsupported delimiter '{other}' (use ',', ';' or tab)")),
    }
}
