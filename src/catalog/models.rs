// Catalog data model: the immutable snapshot the recommender reads.
//
// These types are validated once at ingestion (see `ingest`) and never
// mutated afterwards. A catalog update builds a brand new snapshot with a
// fresh version number, which is what the vector cache keys on.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::ingest::IngestError;

/// Lowest rating a user can give.
pub const MIN_RATING: u8 = 1;
/// Highest rating a user can give.
pub const MAX_RATING: u8 = 10;

static NEXT_SNAPSHOT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Unique key of a catalog item (string ids, as in the catalog file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A movie or series in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    /// Free-text tag list, e.g. "Action, Adventure, Sci-Fi"
    pub tags: String,
    pub year: i32,
    /// External (IMDB) rating, when the source had one
    pub external_rating: Option<f64>,
}

/// A single user rating. The value is guaranteed to be within
/// `MIN_RATING..=MAX_RATING`: out-of-range values are rejected by
/// `RatingEntry::new` and never reach the profile builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingEntry {
    item_id: ItemId,
    value: u8,
}

impl RatingEntry {
    pub fn new(item_id: impl Into<ItemId>, value: i64) -> Result<Self, IngestError> {
        let item_id = item_id.into();
        if value < MIN_RATING as i64 || value > MAX_RATING as i64 {
            return Err(IngestError::InvalidRatingValue { item_id, value });
        }
        Ok(Self {
            item_id,
            value: value as u8,
        })
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

/// An immutable, ordered catalog. The position of an item in `items` is its
/// catalog index, which is the tie-breaker for equal similarity scores.
#[derive(Debug)]
pub struct CatalogSnapshot {
    version: u64,
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot from items in catalog order. Fails on duplicate ids.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, IngestError> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), i).is_some() {
                return Err(IngestError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self {
            version: NEXT_SNAPSHOT_VERSION.fetch_add(1, Ordering::Relaxed),
            items,
            index,
        })
    }

    /// Process-unique identity of this snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog index of an item id, if present.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.position(id).map(|i| &self.items[i])
    }

    /// Case-insensitive title substring search, in catalog order.
    pub fn search(&self, term: &str) -> Vec<&CatalogItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            title: title.to_string(),
            tags: "Drama".to_string(),
            year: 2000,
            external_rating: None,
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(RatingEntry::new("a", 1).is_ok());
        assert!(RatingEntry::new("a", 10).is_ok());
        assert!(matches!(
            RatingEntry::new("a", 0),
            Err(IngestError::InvalidRatingValue { value: 0, .. })
        ));
        assert!(matches!(
            RatingEntry::new("a", 11),
            Err(IngestError::InvalidRatingValue { value: 11, .. })
        ));
    }

    #[test]
    fn test_snapshot_versions_are_unique() {
        let a = CatalogSnapshot::new(vec![item("1", "Heat")]).unwrap();
        let b = CatalogSnapshot::new(vec![item("1", "Heat")]).unwrap();
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = CatalogSnapshot::new(vec![item("1", "Heat"), item("1", "Ronin")]);
        assert!(matches!(result, Err(IngestError::DuplicateItem(_))));
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let snapshot = CatalogSnapshot::new(vec![
            item("1", "The Godfather"),
            item("2", "Heat"),
            item("3", "The Godfather Part II"),
        ])
        .unwrap();

        let hits: Vec<&str> = snapshot
            .search("godFATHER")
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(hits, vec!["1", "3"]);
    }
}
