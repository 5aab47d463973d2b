use crate::report::SummaryData;

/// Pretty-printed machine summary; field order follows the struct
/// declaration.
pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}
