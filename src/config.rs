use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::models::{MAX_RATING, MIN_RATING};
use crate::recommend::service::RecommendParams;
use crate::scoring::profile::LIKED_THRESHOLD;
use crate::scoring::ranker::DEFAULT_TOP_N;

/// Default location of the catalog JSON.
pub const DEFAULT_CATALOG_PATH: &str = "./data/movies.json";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// variable is optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog JSON path (CINEMATCH_CATALOG)
    pub catalog_path: PathBuf,
    /// Default recommendation list length (CINEMATCH_TOP_N)
    pub top_n: usize,
    /// Ratings at or above this are "liked" (CINEMATCH_LIKED_THRESHOLD)
    pub liked_threshold: u8,
    /// Optional per-request deadline (CINEMATCH_TIMEOUT_MS)
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let catalog_path = env::var("CINEMATCH_CATALOG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH));

        let top_n = match env::var("CINEMATCH_TOP_N") {
            Ok(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("CINEMATCH_TOP_N must be a non-negative integer, got {v:?}"))?,
            Err(_) => DEFAULT_TOP_N,
        };

        let liked_threshold = match env::var("CINEMATCH_LIKED_THRESHOLD") {
            Ok(v) => parse_threshold(&v)?,
            Err(_) => LIKED_THRESHOLD,
        };

        let timeout = match env::var("CINEMATCH_TIMEOUT_MS") {
            Ok(v) => Some(Duration::from_millis(v.trim().parse::<u64>().with_context(
                || format!("CINEMATCH_TIMEOUT_MS must be a number of milliseconds, got {v:?}"),
            )?)),
            Err(_) => None,
        };

        Ok(Self {
            catalog_path,
            top_n,
            liked_threshold,
            timeout,
        })
    }

    /// Recommender parameters derived from this configuration.
    pub fn recommend_params(&self) -> RecommendParams {
        RecommendParams {
            liked_threshold: self.liked_threshold,
            top_n: self.top_n,
        }
    }

    /// Check that the catalog file exists.
    /// Call this before any operation that reads the catalog.
    pub fn require_catalog(&self) -> Result<()> {
        if !self.catalog_path.exists() {
            anyhow::bail!(
                "Catalog not found at {}\n\
                 Set CINEMATCH_CATALOG in your .env file to point at a movies.json catalog.",
                self.catalog_path.display()
            );
        }
        Ok(())
    }
}

fn parse_threshold(raw: &str) -> Result<u8> {
    let value: u8 = raw
        .trim()
        .parse()
        .with_context(|| format!("CINEMATCH_LIKED_THRESHOLD must be an integer, got {raw:?}"))?;
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        anyhow::bail!(
            "CINEMATCH_LIKED_THRESHOLD must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("6").unwrap(), 6);
        assert_eq!(parse_threshold(" 10 ").unwrap(), 10);
        assert!(parse_threshold("0").is_err());
        assert!(parse_threshold("11").is_err());
        assert!(parse_threshold("six").is_err());
    }
}
