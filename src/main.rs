use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use cinematch::catalog::ingest::{self, CatalogFile};
use cinematch::catalog::models::RatingEntry;
use cinematch::config::Config;
use cinematch::output::{markdown, terminal};
use cinematch::recommend::cancel::Cancellation;
use cinematch::recommend::service::{
    Recommendation, RecommendationRequest, RecommendationService,
};
use cinematch::sentiment::suggestion::{suggested_rating, Polarity, SentimentLabel};

/// Cinematch: content-based movie and series recommendations.
///
/// Builds a taste profile from the genres of titles you rated highly and
/// ranks everything you haven't rated yet by similarity to it.
#[derive(Parser)]
#[command(name = "cinematch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend titles for a user
    Recommend {
        /// Use this user's reviews from the catalog as their rating history
        #[arg(long)]
        user: Option<String>,

        /// Extra rating as ID=VALUE (repeatable; overrides catalog reviews)
        #[arg(long = "rate", value_parser = parse_rating)]
        rate: Vec<RatingEntry>,

        /// Number of recommendations (default: CINEMATCH_TOP_N or 10)
        #[arg(long)]
        top_n: Option<usize>,

        /// Also write a markdown report to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Suggest a 1-10 rating from a sentiment polarity in [-1, 1]
    SuggestRating {
        #[arg(allow_negative_numbers = true)]
        polarity: f64,
    },

    /// Search catalog titles
    Search {
        /// Case-insensitive title fragment
        term: String,
    },

    /// Show catalog status (items, vocabulary, reviewers)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinematch=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            user,
            rate,
            top_n,
            report,
        } => {
            let config = Config::load()?;
            let catalog = load_catalog(&config)?;

            let username = user.as_deref().unwrap_or("you");
            let ratings = merge_ratings(
                user.as_deref()
                    .map(|u| catalog.ratings_for(u))
                    .unwrap_or_default(),
                rate,
            );

            info!(user = username, ratings = ratings.len(), "Requesting recommendations");

            let cancel = config
                .timeout
                .map(Cancellation::with_timeout)
                .unwrap_or_default();
            let request = RecommendationRequest::new(
                Arc::clone(&catalog.snapshot),
                ratings,
                top_n,
            )
            .with_cancellation(cancel);

            let service = Arc::new(RecommendationService::new(config.recommend_params()));
            let outcome = tokio::task::spawn_blocking(move || service.recommend(&request))
                .await
                .context("Recommendation task panicked")?;

            terminal::display_recommendation(&outcome, config.liked_threshold);

            if let (Some(path), Recommendation::Ranked(items)) = (report, &outcome) {
                let written = markdown::generate_report(username, items, &path)?;
                println!("{}", format!("Markdown report saved to: {written}").bold());
            }
        }

        Commands::SuggestRating { polarity } => {
            let polarity = Polarity::new(polarity)?;
            terminal::display_suggestion(
                SentimentLabel::from_polarity(polarity),
                polarity.value(),
                suggested_rating(polarity),
            );
        }

        Commands::Search { term } => {
            let config = Config::load()?;
            let catalog = load_catalog(&config)?;

            let hits: Vec<_> = catalog
                .snapshot
                .search(&term)
                .into_iter()
                .map(|item| (item, catalog.average_rating(&item.id)))
                .collect();
            terminal::display_search_results(&hits);
        }

        Commands::Status => {
            let config = Config::load()?;
            println!("Catalog: {}", config.catalog_path.display());
            if config.require_catalog().is_err() {
                println!("  not found. Set CINEMATCH_CATALOG in your .env file.");
                return Ok(());
            }

            let catalog = load_catalog(&config)?;
            let service = RecommendationService::new(config.recommend_params());
            let vectors = service.vectors(&catalog.snapshot, &Cancellation::new())?;

            println!("Items: {}", catalog.snapshot.len());
            println!("Vocabulary: {} tag terms", vectors.dim());
            println!(
                "Reviews: {} from {} reviewers",
                catalog.reviews.len(),
                catalog.reviewers().len()
            );
            println!(
                "Liked threshold: {}+ | Default list length: {}",
                config.liked_threshold, config.top_n
            );
        }
    }

    Ok(())
}

fn load_catalog(config: &Config) -> Result<CatalogFile> {
    config.require_catalog()?;
    ingest::load_catalog(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))
}

/// Parse a `--rate ID=VALUE` argument. Out-of-range values are rejected here.
fn parse_rating(raw: &str) -> Result<RatingEntry, String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got {raw:?}"))?;
    let value: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("rating must be an integer, got {value:?}"))?;
    RatingEntry::new(id.trim(), value).map_err(|e| e.to_string())
}

/// Catalog ratings first, then ad-hoc ratings replacing any for the same item.
fn merge_ratings(mut base: Vec<RatingEntry>, extra: Vec<RatingEntry>) -> Vec<RatingEntry> {
    for entry in extra {
        match base.iter_mut().find(|r| r.item_id() == entry.item_id()) {
            Some(existing) => *existing = entry,
            None => base.push(entry),
        }
    }
    base
}
