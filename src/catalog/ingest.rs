// Catalog ingestion: turns the loosely-typed catalog JSON into a validated
// `CatalogSnapshot` plus the review records embedded in it.
//
// The source file maps item ids to records like:
//
//   "tt0111161": {
//       "Series_Title": "The Shawshank Redemption",
//       "Released_Year": "1994",
//       "Genre": "Drama",
//       "IMDB_Rating": 9.3,
//       "reviews": [{"username": "ann", "date": "...", "rating": 9, "content": "..."}]
//   }
//
// Required vs optional fields are checked here, once. Nothing downstream
// ever looks at raw JSON again.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::models::{CatalogItem, CatalogSnapshot, ItemId, RatingEntry};

/// Everything that can go wrong while ingesting catalog or rating data.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Item {item_id}: missing required field {field}")]
    MissingField { item_id: ItemId, field: &'static str },

    #[error("Item {item_id}: invalid year {value:?}")]
    InvalidYear { item_id: ItemId, value: String },

    #[error("Item {item_id}: invalid external rating {value:?}")]
    InvalidExternalRating { item_id: ItemId, value: String },

    #[error("Duplicate item id {0}")]
    DuplicateItem(ItemId),

    #[error("Rating {value} for item {item_id} is outside 1-10")]
    InvalidRatingValue { item_id: ItemId, value: i64 },
}

/// A user's review of one catalog item, as stored alongside the catalog.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub username: String,
    pub date: Option<String>,
    pub content: String,
    pub rating: RatingEntry,
}

/// A parsed catalog file: the immutable snapshot plus its review records.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub snapshot: Arc<CatalogSnapshot>,
    pub reviews: Vec<ReviewRecord>,
}

impl CatalogFile {
    /// Rating history for one user, in catalog order. If a user somehow has
    /// two reviews of the same item, the later one wins.
    pub fn ratings_for(&self, username: &str) -> Vec<RatingEntry> {
        let mut ratings: Vec<RatingEntry> = Vec::new();
        let mut seen: HashMap<ItemId, usize> = HashMap::new();

        for review in self.reviews.iter().filter(|r| r.username == username) {
            let id = review.rating.item_id().clone();
            match seen.get(&id) {
                Some(&pos) => ratings[pos] = review.rating.clone(),
                None => {
                    seen.insert(id, ratings.len());
                    ratings.push(review.rating.clone());
                }
            }
        }

        ratings
    }

    /// Mean of all user ratings for an item, or None if nobody reviewed it.
    pub fn average_rating(&self, item_id: &ItemId) -> Option<f64> {
        let values: Vec<f64> = self
            .reviews
            .iter()
            .filter(|r| r.rating.item_id() == item_id)
            .map(|r| r.rating.value() as f64)
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }

    /// Distinct usernames with at least one review.
    pub fn reviewers(&self) -> BTreeSet<&str> {
        self.reviews.iter().map(|r| r.username.as_str()).collect()
    }
}

/// A JSON value that the source data stores either as a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(rename = "Series_Title")]
    title: Option<String>,
    #[serde(rename = "Released_Year")]
    year: Option<Loose>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "IMDB_Rating", default)]
    imdb_rating: Option<Loose>,
    #[serde(default)]
    reviews: Vec<RawReview>,
}

#[derive(Deserialize)]
struct RawReview {
    username: String,
    #[serde(default)]
    date: Option<String>,
    rating: i64,
    #[serde(default)]
    content: String,
}

/// Read and validate a catalog file from disk.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, IngestError> {
    let json = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file = parse_catalog(&json)?;

    info!(
        path = %path.display(),
        items = file.snapshot.len(),
        reviews = file.reviews.len(),
        "Loaded catalog"
    );

    Ok(file)
}

/// Parse and validate catalog JSON. Object order becomes catalog order.
pub fn parse_catalog(json: &str) -> Result<CatalogFile, IngestError> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

    let mut items = Vec::with_capacity(raw.len());
    let mut reviews = Vec::new();

    for (id, value) in raw {
        let item_id = ItemId::new(id);
        let raw_item: RawItem = serde_json::from_value(value)?;

        for review in raw_item.reviews {
            reviews.push(ReviewRecord {
                username: review.username,
                date: review.date,
                content: review.content,
                rating: RatingEntry::new(item_id.clone(), review.rating)?,
            });
        }

        let title = raw_item.title.ok_or_else(|| IngestError::MissingField {
            item_id: item_id.clone(),
            field: "Series_Title",
        })?;
        let tags = raw_item.genre.ok_or_else(|| IngestError::MissingField {
            item_id: item_id.clone(),
            field: "Genre",
        })?;
        let year = match raw_item.year {
            Some(year) => parse_year(&item_id, year)?,
            None => {
                return Err(IngestError::MissingField {
                    item_id,
                    field: "Released_Year",
                })
            }
        };
        let external_rating = match raw_item.imdb_rating {
            Some(rating) => parse_external_rating(&item_id, rating)?,
            None => None,
        };

        items.push(CatalogItem {
            id: item_id,
            title,
            tags,
            year,
            external_rating,
        });
    }

    Ok(CatalogFile {
        snapshot: Arc::new(CatalogSnapshot::new(items)?),
        reviews,
    })
}

fn parse_year(item_id: &ItemId, value: Loose) -> Result<i32, IngestError> {
    let invalid = |value: String| IngestError::InvalidYear {
        item_id: item_id.clone(),
        value,
    };

    match value {
        Loose::Int(year) => i32::try_from(year).map_err(|_| invalid(year.to_string())),
        Loose::Float(year) if year.fract() == 0.0 && year.abs() <= i32::MAX as f64 => {
            Ok(year as i32)
        }
        Loose::Float(year) => Err(invalid(year.to_string())),
        Loose::Text(text) => text.trim().parse::<i32>().map_err(|_| invalid(text)),
    }
}

/// "N/A" and blank strings mean "no rating"; anything else must be numeric.
fn parse_external_rating(item_id: &ItemId, value: Loose) -> Result<Option<f64>, IngestError> {
    match value {
        Loose::Int(rating) => Ok(Some(rating as f64)),
        Loose::Float(rating) => Ok(Some(rating)),
        Loose::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| IngestError::InvalidExternalRating {
                    item_id: item_id.clone(),
                    value: text,
                })
        }
    }
}
