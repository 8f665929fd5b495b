// Per-snapshot cache of vectorizer output.
//
// Snapshots are immutable and carry a process-unique version, so the cache
// only has to remember the last (version, vectors) pair. Readers get an
// `Arc` and never hold the lock while ranking. Two requests racing on a new
// snapshot may both vectorize it; the later result simply replaces the
// earlier, identical one.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::tfidf::CorpusVectors;
use super::traits::CorpusVectorizer;
use crate::catalog::models::CatalogSnapshot;
use crate::recommend::cancel::{Cancellation, Cancelled};

#[derive(Debug, Default)]
pub struct VectorCache {
    slot: Mutex<Option<Arc<CorpusVectors>>>,
}

impl VectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached vectors for `snapshot`, if the last computation was for it.
    pub fn get(&self, snapshot: &CatalogSnapshot) -> Option<Arc<CorpusVectors>> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|v| v.snapshot_version() == snapshot.version())
            .cloned()
    }

    /// Return cached vectors for `snapshot`, vectorizing it on a miss.
    /// A cancelled computation leaves the cache untouched.
    pub fn get_or_compute(
        &self,
        snapshot: &CatalogSnapshot,
        vectorizer: &dyn CorpusVectorizer,
        cancel: &Cancellation,
    ) -> Result<Arc<CorpusVectors>, Cancelled> {
        if let Some(hit) = self.get(snapshot) {
            debug!(snapshot = snapshot.version(), "Vector cache hit");
            return Ok(hit);
        }

        debug!(snapshot = snapshot.version(), "Vector cache miss");
        let computed = Arc::new(vectorizer.vectorize(snapshot, cancel)?);

        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::clone(&computed));
        Ok(computed)
    }

    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}
