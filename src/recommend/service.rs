// Recommendation service: orchestrates one recommendation request.
//
// Given a catalog snapshot and a user's rating history, this module:
// 1. Rejects an empty history (NeedsMoreRatings) before touching vectors
// 2. Fetches item vectors for the snapshot (cached per snapshot version)
// 3. Builds the user's profile from liked ratings (or InsufficientSignal)
// 4. Ranks every unrated item against the profile
// 5. Maps ranked ids back to display records

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::catalog::models::{CatalogSnapshot, ItemId, RatingEntry};
use crate::recommend::cancel::{Cancellation, Cancelled};
use crate::scoring::profile::{self, ProfileOutcome, LIKED_THRESHOLD};
use crate::scoring::ranker::{CosineRanker, DEFAULT_TOP_N};
use crate::scoring::traits::CandidateRanker;
use crate::vectors::cache::VectorCache;
use crate::vectors::tfidf::{CorpusVectors, TfIdfVectorizer};
use crate::vectors::traits::CorpusVectorizer;

/// Tunables for the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendParams {
    /// Ratings at or above this count as liked (default 6)
    pub liked_threshold: u8,
    /// Default list length when a caller doesn't choose one (default 10)
    pub top_n: usize,
}

impl Default for RecommendParams {
    fn default() -> Self {
        Self {
            liked_threshold: LIKED_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Everything one request needs. The "current user" is whoever's ratings
/// are in here; the service itself holds no per-user state.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub catalog: Arc<CatalogSnapshot>,
    pub ratings: Vec<RatingEntry>,
    /// List length; `None` falls back to the service's `RecommendParams::top_n`
    pub top_n: Option<usize>,
    pub cancel: Cancellation,
}

impl RecommendationRequest {
    pub fn new(
        catalog: Arc<CatalogSnapshot>,
        ratings: Vec<RatingEntry>,
        top_n: Option<usize>,
    ) -> Self {
        Self {
            catalog,
            ratings,
            top_n,
            cancel: Cancellation::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }
}

/// A recommended item, denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedItem {
    pub item_id: ItemId,
    pub title: String,
    pub tags: String,
    pub year: i32,
    pub external_rating: Option<f64>,
    /// Cosine similarity to the user's profile (0.0 to 1.0)
    pub score: f64,
}

/// Outcome of a recommendation request. None of these are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Ranked list, best first. May be empty (empty catalog, everything rated).
    Ranked(Vec<RecommendedItem>),
    /// Ratings exist, but none qualify as liked
    InsufficientSignal,
    /// No ratings at all
    NeedsMoreRatings,
    /// Cancelled or timed out mid-computation
    Cancelled,
}

impl Recommendation {
    /// The ranked items, if this is a ranked outcome.
    pub fn items(&self) -> Option<&[RecommendedItem]> {
        match self {
            Recommendation::Ranked(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Ranked(_) => "Ranked",
            Recommendation::InsufficientSignal => "InsufficientSignal",
            Recommendation::NeedsMoreRatings => "NeedsMoreRatings",
            Recommendation::Cancelled => "Cancelled",
        }
    }
}

impl From<Cancelled> for Recommendation {
    fn from(_: Cancelled) -> Self {
        Recommendation::Cancelled
    }
}

/// Content-based recommender with a per-snapshot vector cache.
///
/// Safe to share across threads: requests against the same snapshot reuse
/// one `Arc<CorpusVectors>`.
pub struct RecommendationService {
    vectorizer: Box<dyn CorpusVectorizer>,
    ranker: Box<dyn CandidateRanker>,
    cache: VectorCache,
    params: RecommendParams,
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new(RecommendParams::default())
    }
}

impl RecommendationService {
    /// TF-IDF vectorizer + cosine ranker.
    pub fn new(params: RecommendParams) -> Self {
        Self::with_components(
            Box::new(TfIdfVectorizer::default()),
            Box::new(CosineRanker),
            params,
        )
    }

    pub fn with_components(
        vectorizer: Box<dyn CorpusVectorizer>,
        ranker: Box<dyn CandidateRanker>,
        params: RecommendParams,
    ) -> Self {
        Self {
            vectorizer,
            ranker,
            cache: VectorCache::new(),
            params,
        }
    }

    pub fn params(&self) -> &RecommendParams {
        &self.params
    }

    /// Item vectors for a snapshot, from cache when possible.
    pub fn vectors(
        &self,
        snapshot: &CatalogSnapshot,
        cancel: &Cancellation,
    ) -> Result<Arc<CorpusVectors>, Cancelled> {
        self.cache
            .get_or_compute(snapshot, self.vectorizer.as_ref(), cancel)
    }

    /// Run one recommendation request.
    pub fn recommend(&self, request: &RecommendationRequest) -> Recommendation {
        let outcome = self.run(request).unwrap_or_else(Recommendation::from);

        info!(
            outcome = outcome.as_str(),
            ratings = request.ratings.len(),
            catalog = request.catalog.len(),
            returned = outcome.items().map_or(0, <[RecommendedItem]>::len),
            "Recommendation request finished"
        );

        outcome
    }

    fn run(&self, request: &RecommendationRequest) -> Result<Recommendation, Cancelled> {
        if request.ratings.is_empty() {
            return Ok(Recommendation::NeedsMoreRatings);
        }

        let snapshot = request.catalog.as_ref();
        let corpus = self.vectors(snapshot, &request.cancel)?;

        // Empty catalog: nothing to rank, and that's not an error
        if corpus.is_empty() {
            return Ok(Recommendation::Ranked(Vec::new()));
        }

        let profile = match profile::build_profile(
            &request.ratings,
            snapshot,
            &corpus,
            self.params.liked_threshold,
        ) {
            ProfileOutcome::Profile(p) => p,
            ProfileOutcome::InsufficientSignal => return Ok(Recommendation::InsufficientSignal),
        };

        let rated: HashSet<ItemId> = request
            .ratings
            .iter()
            .map(|r| r.item_id().clone())
            .collect();

        let ranked = self.ranker.rank(
            &profile,
            snapshot,
            &corpus,
            &rated,
            request.top_n.unwrap_or(self.params.top_n),
            &request.cancel,
        )?;

        let items = ranked
            .into_iter()
            .filter_map(|candidate| {
                let item = snapshot.items().get(candidate.catalog_index)?;
                Some(RecommendedItem {
                    item_id: item.id.clone(),
                    title: item.title.clone(),
                    tags: item.tags.clone(),
                    year: item.year,
                    external_rating: item.external_rating,
                    score: candidate.score,
                })
            })
            .collect();

        Ok(Recommendation::Ranked(items))
    }
}

/// One-shot recommendation with default parameters and no cache reuse.
pub fn get_recommendations(
    catalog: Arc<CatalogSnapshot>,
    ratings: Vec<RatingEntry>,
    top_n: Option<usize>,
) -> Recommendation {
    RecommendationService::default().recommend(&RecommendationRequest::new(catalog, ratings, top_n))
}
