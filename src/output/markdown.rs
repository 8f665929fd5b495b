// Markdown recommendation report.
//
// `render_report` builds the document; `generate_report` writes it to disk,
// creating the parent directory if needed.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::format_external_rating;
use crate::recommend::service::RecommendedItem;

/// Render a markdown report of one user's recommendations.
pub fn render_report(username: &str, items: &[RecommendedItem], generated_at: &str) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Recommendations for {username}\n");
    let _ = writeln!(md, "_Generated {generated_at}_\n");

    if items.is_empty() {
        md.push_str("No new recommendations found. Try rating more movies!\n");
        return md;
    }

    md.push_str("| # | Title | Year | IMDB | Genres | Similarity |\n");
    md.push_str("|---|-------|------|------|--------|------------|\n");
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {:.2} |",
            i + 1,
            escape_cell(&item.title),
            item.year,
            format_external_rating(item.external_rating),
            escape_cell(&item.tags),
            item.score
        );
    }

    md
}

/// Write the report to `path`. Returns the path written.
pub fn generate_report(username: &str, items: &[RecommendedItem], path: &str) -> Result<String> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = render_report(username, items, &generated_at);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, report).with_context(|| format!("Failed to write report to {path}"))?;

    Ok(path.to_string())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
