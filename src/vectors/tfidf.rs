// TF-IDF vectorization of catalog tags.
//
// Every catalog item is a document; its tag text is tokenized, and each token
// gets weight tf * idf where
//
//   idf(t) = ln((1 + N) / (1 + df(t))) + 1
//
// N is the item count and df(t) the number of items containing t. The +1
// terms keep the idf finite and strictly positive. Each item vector is then
// L2-normalized (items with no usable tokens stay the zero vector).
//
// The vocabulary is the sorted set of all tokens, so column order is the same
// every time the same snapshot is vectorized.

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use super::sparse::SparseVector;
use super::tokenize::TagTokenizer;
use super::traits::CorpusVectorizer;
use crate::catalog::models::{CatalogSnapshot, ItemId};
use crate::recommend::cancel::{Cancellation, Cancelled, CHECK_INTERVAL};

/// Alphabetically ordered set of distinct tag tokens.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from any collection of tokens; duplicates are collapsed.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = terms.into_iter().map(Into::into).collect();
        let terms: Vec<String> = sorted.into_iter().collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    /// Vector dimensionality D.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column index of a token.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Vectorizer output for one catalog snapshot: vocabulary, idf weights and
/// one L2-normalized vector per item, in catalog order.
#[derive(Debug, Clone)]
pub struct CorpusVectors {
    snapshot_version: u64,
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl CorpusVectors {
    pub fn new(
        snapshot_version: u64,
        vocabulary: Vocabulary,
        idf: Vec<f64>,
        vectors: Vec<SparseVector>,
    ) -> Self {
        Self {
            snapshot_version,
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Version of the snapshot these vectors were computed from.
    pub fn snapshot_version(&self) -> u64 {
        self.snapshot_version
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Dimensionality shared by every vector.
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of item vectors (equals the catalog size).
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Item vector at a catalog index.
    pub fn vector(&self, catalog_index: usize) -> Option<&SparseVector> {
        self.vectors.get(catalog_index)
    }

    /// Item vector by id, resolved through the snapshot.
    pub fn vector_for(&self, snapshot: &CatalogSnapshot, id: &ItemId) -> Option<&SparseVector> {
        snapshot.position(id).and_then(|i| self.vector(i))
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    /// Inverse document frequency of a token, if it's in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|i| self.idf[i])
    }
}

/// Smoothed inverse document frequency.
pub fn smoothed_idf(item_count: usize, doc_freq: usize) -> f64 {
    ((1.0 + item_count as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

/// TF-IDF vectorizer over catalog tag text: the default `CorpusVectorizer`.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    tokenizer: TagTokenizer,
}

impl TfIdfVectorizer {
    pub fn new(tokenizer: TagTokenizer) -> Self {
        Self { tokenizer }
    }
}

impl CorpusVectorizer for TfIdfVectorizer {
    fn vectorize(
        &self,
        snapshot: &CatalogSnapshot,
        cancel: &Cancellation,
    ) -> Result<CorpusVectors, Cancelled> {
        let items = snapshot.items();

        // Pass 1: tokenize every item and collect the vocabulary
        let mut tokenized: Vec<Vec<String>> = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if i % CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            tokenized.push(self.tokenizer.tokenize(&item.tags));
        }

        let vocabulary = Vocabulary::from_terms(tokenized.iter().flatten().map(String::as_str));
        let dim = vocabulary.len();

        // Pass 2: raw term counts per item, and document frequency per term
        let mut doc_freq = vec![0usize; dim];
        let mut term_counts: Vec<HashMap<usize, u32>> = Vec::with_capacity(items.len());
        for (i, tokens) in tokenized.iter().enumerate() {
            if i % CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for token in tokens {
                if let Some(col) = vocabulary.get(token) {
                    *counts.entry(col).or_insert(0) += 1;
                }
            }
            for &col in counts.keys() {
                doc_freq[col] += 1;
            }
            term_counts.push(counts);
        }

        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| smoothed_idf(items.len(), df))
            .collect();

        // Pass 3: weight and normalize
        let mut vectors = Vec::with_capacity(items.len());
        for (i, counts) in term_counts.into_iter().enumerate() {
            if i % CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            let entries = counts
                .into_iter()
                .map(|(col, tf)| (col, tf as f64 * idf[col]))
                .collect();
            vectors.push(SparseVector::from_entries(dim, entries).normalized());
        }

        info!(
            items = items.len(),
            vocabulary = dim,
            snapshot = snapshot.version(),
            "Vectorized catalog"
        );

        Ok(CorpusVectors::new(snapshot.version(), vocabulary, idf, vectors))
    }
}
