// Output formatting: terminal display and report generation.

pub mod markdown;
pub mod terminal;

/// Shorten a title or tag list to `max_chars` characters for a table
/// column, marking the cut with "...". Counts chars, so titles like
/// "Amélie" are never split inside a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push_str("...");
    short
}

/// Format an optional external rating with one decimal, or "N/A".
pub fn format_external_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}"))
}
