// Cosine similarity ranking of unrated catalog items.
//
// Every item the user hasn't rated (liked or not) is a candidate. Scores are
// full cosine similarities, because the profile is a mean of unit vectors and
// isn't unit length itself. Ordering is descending score, then ascending
// catalog index, so equal scores come out in catalog order on every run.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use super::profile::ProfileVector;
use super::traits::{CandidateRanker, ScoredCandidate};
use crate::catalog::models::{CatalogSnapshot, ItemId};
use crate::recommend::cancel::{Cancellation, Cancelled, CHECK_INTERVAL};
use crate::vectors::sparse::cosine_similarity;
use crate::vectors::tfidf::CorpusVectors;

/// Default number of recommendations returned.
pub const DEFAULT_TOP_N: usize = 10;

/// The default `CandidateRanker`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineRanker;

impl CandidateRanker for CosineRanker {
    fn rank(
        &self,
        profile: &ProfileVector,
        snapshot: &CatalogSnapshot,
        corpus: &CorpusVectors,
        rated: &HashSet<ItemId>,
        top_n: usize,
        cancel: &Cancellation,
    ) -> Result<Vec<ScoredCandidate>, Cancelled> {
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<ScoredCandidate> = Vec::new();

        for (index, (item, vector)) in snapshot
            .items()
            .iter()
            .zip(corpus.vectors())
            .enumerate()
        {
            if index % CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            if rated.contains(&item.id) {
                continue;
            }
            candidates.push(ScoredCandidate {
                score: cosine_similarity(&profile.vector, vector),
                item_id: item.id.clone(),
                catalog_index: index,
            });
        }

        let candidate_count = candidates.len();
        sort_candidates(&mut candidates);
        candidates.truncate(top_n);

        debug!(
            candidates = candidate_count,
            returned = candidates.len(),
            "Ranked candidates"
        );

        Ok(candidates)
    }
}

/// Descending score, ties broken by ascending catalog index.
pub fn sort_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(ranking_order);
}

/// Comparator form of the ranking order.
pub fn ranking_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.catalog_index.cmp(&b.catalog_index))
}
