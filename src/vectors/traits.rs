// Corpus vectorizer trait: the seam between the catalog and the vector space.
//
// The default implementation is TF-IDF over genre tags. Anything that turns a
// catalog snapshot into one vector per item, over one shared vocabulary, can
// stand in for it.

use super::tfidf::CorpusVectors;
use crate::catalog::models::CatalogSnapshot;
use crate::recommend::cancel::{Cancellation, Cancelled};

/// Builds the vocabulary and one item vector per catalog item.
pub trait CorpusVectorizer: Send + Sync {
    fn vectorize(
        &self,
        snapshot: &CatalogSnapshot,
        cancel: &Cancellation,
    ) -> Result<CorpusVectors, Cancelled>;
}
