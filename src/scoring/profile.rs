// Profile builder: turns a user's rating history into a taste vector.
//
// The profile is the unweighted arithmetic mean of the item vectors of every
// "liked" item (rating >= the liked threshold). A 10 and a 6 contribute
// equally; weighting by (rating - threshold) would be a different model.
// Ratings for ids that aren't in the catalog are skipped without comment.

use tracing::debug;

use crate::catalog::models::{CatalogSnapshot, RatingEntry};
use crate::vectors::sparse::SparseVector;
use crate::vectors::tfidf::CorpusVectors;

/// Ratings at or above this value count as "liked".
pub const LIKED_THRESHOLD: u8 = 6;

/// A user's taste vector for one request. Not renormalized after averaging.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileVector {
    pub vector: SparseVector,
    /// How many liked ratings went into the mean
    pub liked_count: usize,
}

/// Result of building a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    Profile(ProfileVector),
    /// The user has ratings, but none of them are liked items in this catalog
    InsufficientSignal,
}

/// Build the profile vector from the liked subset of `ratings`.
pub fn build_profile(
    ratings: &[RatingEntry],
    snapshot: &CatalogSnapshot,
    corpus: &CorpusVectors,
    liked_threshold: u8,
) -> ProfileOutcome {
    let liked: Vec<&SparseVector> = ratings
        .iter()
        .filter(|r| r.value() >= liked_threshold)
        .filter_map(|r| corpus.vector_for(snapshot, r.item_id()))
        .collect();

    if liked.is_empty() {
        debug!(
            ratings = ratings.len(),
            threshold = liked_threshold,
            "No liked items in catalog"
        );
        return ProfileOutcome::InsufficientSignal;
    }

    let liked_count = liked.len();
    let vector = SparseVector::mean(corpus.dim(), liked);

    debug!(liked = liked_count, nnz = vector.nnz(), "Built profile vector");

    ProfileOutcome::Profile(ProfileVector {
        vector,
        liked_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{CatalogItem, ItemId};
    use crate::recommend::cancel::Cancellation;
    use crate::vectors::tfidf::TfIdfVectorizer;
    use crate::vectors::tokenize::TagTokenizer;
    use crate::vectors::traits::CorpusVectorizer;

    fn fixture() -> (CatalogSnapshot, CorpusVectors) {
        let items = [("a", "action adventure"), ("b", "action"), ("c", "drama romance")]
            .iter()
            .map(|(id, tags)| CatalogItem {
                id: ItemId::new(*id),
                title: id.to_uppercase(),
                tags: tags.to_string(),
                year: 2001,
                external_rating: None,
            })
            .collect();
        let snapshot = CatalogSnapshot::new(items).unwrap();
        let corpus = TfIdfVectorizer::new(TagTokenizer::with_stop_words(Vec::<String>::new()))
            .vectorize(&snapshot, &Cancellation::new())
            .unwrap();
        (snapshot, corpus)
    }

    #[test]
    fn test_single_liked_item_is_its_vector() {
        let (snapshot, corpus) = fixture();
        let ratings = vec![
            RatingEntry::new("a", 8).unwrap(),
            RatingEntry::new("c", 3).unwrap(),
        ];
        match build_profile(&ratings, &snapshot, &corpus, LIKED_THRESHOLD) {
            ProfileOutcome::Profile(p) => {
                assert_eq!(p.liked_count, 1);
                assert_eq!(&p.vector, corpus.vector(0).unwrap());
            }
            other => panic!("expected profile, got {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let (snapshot, corpus) = fixture();
        let ratings = vec![RatingEntry::new("b", 6).unwrap()];
        assert!(matches!(
            build_profile(&ratings, &snapshot, &corpus, LIKED_THRESHOLD),
            ProfileOutcome::Profile(_)
        ));

        let ratings = vec![RatingEntry::new("b", 5).unwrap()];
        assert_eq!(
            build_profile(&ratings, &snapshot, &corpus, LIKED_THRESHOLD),
            ProfileOutcome::InsufficientSignal
        );
    }

    #[test]
    fn test_mean_is_unweighted_and_not_renormalized() {
        let (snapshot, corpus) = fixture();
        let ratings = vec![
            RatingEntry::new("b", 10).unwrap(),
            RatingEntry::new("c", 6).unwrap(),
        ];
        let ProfileOutcome::Profile(p) =
            build_profile(&ratings, &snapshot, &corpus, LIKED_THRESHOLD)
        else {
            panic!("expected profile");
        };
        // b and c share no tokens, so the mean of two unit vectors has norm 1/sqrt(2)
        assert!((p.vector.norm() - 0.5_f64.sqrt()).abs() < 1e-9);
        let action = corpus.vocabulary().get("action").unwrap();
        assert!((p.vector.get(action) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let (snapshot, corpus) = fixture();
        let ratings = vec![
            RatingEntry::new("missing", 9).unwrap(),
            RatingEntry::new("b", 7).unwrap(),
        ];
        let ProfileOutcome::Profile(p) =
            build_profile(&ratings, &snapshot, &corpus, LIKED_THRESHOLD)
        else {
            panic!("expected profile");
        };
        assert_eq!(p.liked_count, 1);

        let only_unknown = vec![RatingEntry::new("missing", 9).unwrap()];
        assert_eq!(
            build_profile(&only_unknown, &snapshot, &corpus, LIKED_THRESHOLD),
            ProfileOutcome::InsufficientSignal
        );
    }
}
