// Candidate ranker trait: swap-ready abstraction over similarity ranking.
//
// The default implementation scores every unrated item by cosine similarity
// to the profile. The recommendation service only talks to this trait, which
// also lets tests observe whether ranking happened at all.

use std::collections::HashSet;

use serde::Serialize;

use super::profile::ProfileVector;
use crate::catalog::models::{CatalogSnapshot, ItemId};
use crate::recommend::cancel::{Cancellation, Cancelled};
use crate::vectors::tfidf::CorpusVectors;

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Similarity to the profile, 0.0 to 1.0
    pub score: f64,
    pub item_id: ItemId,
    /// Position in the catalog snapshot (the tie-breaker)
    pub catalog_index: usize,
}

/// Ranks catalog items against a profile vector.
pub trait CandidateRanker: Send + Sync {
    /// Score every item whose id is not in `rated`, order by descending
    /// score then ascending catalog index, and keep at most `top_n`.
    fn rank(
        &self,
        profile: &ProfileVector,
        snapshot: &CatalogSnapshot,
        corpus: &CorpusVectors,
        rated: &HashSet<ItemId>,
        top_n: usize,
        cancel: &Cancellation,
    ) -> Result<Vec<ScoredCandidate>, Cancelled>;
}
