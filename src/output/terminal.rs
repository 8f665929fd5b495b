// Colored terminal output for recommendation lists and catalog searches.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use super::{format_external_rating, truncate_chars};
use crate::catalog::models::CatalogItem;
use crate::recommend::service::{Recommendation, RecommendedItem};
use crate::sentiment::suggestion::SentimentLabel;

/// Display any recommendation outcome, including the cold-start messages.
pub fn display_recommendation(outcome: &Recommendation, liked_threshold: u8) {
    match outcome {
        Recommendation::Ranked(items) if items.is_empty() => {
            println!("{}", "=== Recommendations ===".bold());
            println!("No new recommendations found. Try rating more movies!");
        }
        Recommendation::Ranked(items) => display_recommendations(items),
        Recommendation::InsufficientSignal => {
            println!("{}", "=== Recommendations ===".bold());
            println!(
                "Rate some movies with {liked_threshold}+ stars to get better recommendations!"
            );
        }
        Recommendation::NeedsMoreRatings => {
            println!("{}", "=== Recommendations ===".bold());
            println!("Please rate some movies first to get personalized recommendations!");
        }
        Recommendation::Cancelled => {
            println!(
                "{} Recommendation timed out before finishing.",
                "Warning:".yellow()
            );
        }
    }
}

/// Display a ranked recommendation list.
pub fn display_recommendations(items: &[RecommendedItem]) {
    println!(
        "\n{}",
        format!("=== Top {} Recommendations ===", items.len()).bold()
    );
    println!(
        "{}",
        "Based on your viewing preferences and ratings\n".dimmed()
    );

    for (i, item) in items.iter().enumerate() {
        println!("  {:>2}. {} ({})", i + 1, item.title.bold(), item.year);
        println!(
            "      IMDB: {} | {}",
            format_external_rating(item.external_rating),
            truncate_chars(&item.tags, 60).dimmed()
        );
        println!("      Similarity: {}", colorize_score(item.score));
        println!();
    }
}

/// Display catalog search hits, with the community average when known.
pub fn display_search_results(hits: &[(&CatalogItem, Option<f64>)]) {
    if hits.is_empty() {
        println!("No titles matched.");
        return;
    }

    for (item, average) in hits {
        let average = average
            .map(|a| format!("  avg {a:.1}/10"))
            .unwrap_or_default();
        println!(
            "  {:<12} {} ({}) - IMDB: {}{}",
            item.id.as_str().dimmed(),
            item.title,
            item.year,
            format_external_rating(item.external_rating),
            average.cyan()
        );
    }
}

/// Display a rating suggestion.
pub fn display_suggestion(label: SentimentLabel, polarity: f64, suggested: u8) {
    println!(
        "Analysis: {} review (polarity {:+.2}) | Suggested rating: {}/10",
        colorize_label(label),
        polarity,
        suggested.to_string().bold()
    );
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}");
    if score >= 0.75 {
        text.bright_green()
    } else if score >= 0.4 {
        text.bright_yellow()
    } else {
        text.normal()
    }
}

fn colorize_label(label: SentimentLabel) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => label.as_str().green(),
        SentimentLabel::Neutral => label.as_str().normal(),
        SentimentLabel::Negative => label.as_str().red(),
    }
}
