use crate::report::{ReportContext, format_f64_6};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let mut out = String::new();

    out.push_str("Candidate Selection Report (SAW)\n");
    out.push_str("================================\n\n");

    out.push_str("1. Dataset\n");
    out.push_str(&format!("Source: {}\n", ctx.source_path));
    out.push_str(&format!("Candidates: {}\n", ctx.n_candidates));
    for criterion in &ctx.criteria {
        out.push_str(&format!(
            "Criterion {}: weight {:.2}, raw max {}\n",
            criterion.name,
            criterion.weight,
            format_f64_6(criterion.max_raw)
        ));
    }
    out.push('\n');

    out.push_str("2. Summary\n");
    out.push_str(&format!("Top score: {:.3}\n", ctx.top_score));
    out.push_str(&format!(
        "Best candidate: {}\n",
        title_case(&ctx.top_candidate)
    ));
    out.push_str(&format!("Score mean: {}\n", format_f64_6(ctx.score_mean)));
    out.push_str(&format!(
        "Score median: {}\n",
        format_f64_6(ctx.score_median)
    ));
    out.push_str("Tie-break: equal scores keep dataset order\n\n");

    out.push_str(&format!(
        "3. Top {} of {}\n",
        ctx.top_rows.len(),
        ctx.n_candidates
    ));
    out.push_str(&render_ranking_table(ctx));

    out
}

fn render_ranking_table(ctx: &ReportContext) -> String {
    let width = ctx
        .top_rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(ctx.id_column.chars().count());

    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:<width$} {:>10}",
        "ranking", ctx.id_column, "skor_akhir"
    ));
    if let Some(note_column) = &ctx.note_column {
        out.push_str(&format!("  {note_column}"));
    }
    out.push('\n');

    for row in &ctx.top_rows {
        out.push_str(&format!(
            "{:<8} {:<width$} {:>10}",
            row.rank,
            row.name,
            format_f64_6(row.score)
        ));
        if ctx.note_column.is_some() {
            out.push_str(&format!("  {}", row.note));
        }
        out.push('\n');
    }
    out
}

/// First letter of each word uppercased, the rest lowercased.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}
