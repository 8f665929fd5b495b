// Unit tests for the vector space: tokenization, TF-IDF vectors and cosine
// similarity properties that must hold for any catalog.

use cinematch::catalog::models::{CatalogItem, CatalogSnapshot, ItemId};
use cinematch::recommend::cancel::Cancellation;
use cinematch::vectors::sparse::{cosine_similarity, SparseVector};
use cinematch::vectors::tfidf::{CorpusVectors, TfIdfVectorizer};
use cinematch::vectors::tokenize::TagTokenizer;
use cinematch::vectors::traits::CorpusVectorizer;

fn snapshot(tags: &[&str]) -> CatalogSnapshot {
    let items = tags
        .iter()
        .enumerate()
        .map(|(i, t)| CatalogItem {
            id: ItemId::new(format!("tt{i:04}")),
            title: format!("Title {i}"),
            tags: t.to_string(),
            year: 1990 + i as i32,
            external_rating: Some(7.0),
        })
        .collect();
    CatalogSnapshot::new(items).unwrap()
}

fn vectorize(snap: &CatalogSnapshot) -> CorpusVectors {
    TfIdfVectorizer::default()
        .vectorize(snap, &Cancellation::new())
        .unwrap()
}

const TAGS: &[&str] = &[
    "Action, Adventure, Fantasy",
    "Crime, Drama",
    "Drama, Romance",
    "Comedy, Romance",
    "Horror, Mystery, Thriller",
    "",
    "Action, Crime, Thriller",
    "Animation, Adventure, Comedy",
    "Drama",
    "Western",
];

// ============================================================
// Dimensionality and normalization
// ============================================================

#[test]
fn every_vector_has_vocabulary_dimensionality() {
    let corpus = vectorize(&snapshot(TAGS));
    assert_eq!(corpus.len(), TAGS.len());
    for v in corpus.vectors() {
        assert_eq!(v.dim(), corpus.vocabulary().len());
    }
}

#[test]
fn tagged_vectors_are_unit_length() {
    let corpus = vectorize(&snapshot(TAGS));
    for (i, v) in corpus.vectors().iter().enumerate() {
        if TAGS[i].is_empty() {
            assert!(v.is_zero(), "Untagged item {i} should be the zero vector");
        } else {
            assert!(
                (v.norm() - 1.0).abs() < 1e-9,
                "Item {i} has norm {}",
                v.norm()
            );
        }
    }
}

#[test]
fn weights_are_non_negative() {
    let corpus = vectorize(&snapshot(TAGS));
    for v in corpus.vectors() {
        assert!(v.entries().iter().all(|&(_, w)| w > 0.0));
    }
}

#[test]
fn vocabulary_is_sorted() {
    let corpus = vectorize(&snapshot(TAGS));
    let terms = corpus.vocabulary().terms();
    let mut sorted = terms.to_vec();
    sorted.sort();
    assert_eq!(terms, sorted.as_slice());
    assert!(corpus.vocabulary().get("drama").is_some());
    assert!(corpus.vocabulary().get("western").is_some());
}

#[test]
fn rarer_terms_get_higher_idf() {
    let corpus = vectorize(&snapshot(TAGS));
    // "drama" is on 3 items, "western" on 1
    let drama = corpus.idf("drama").unwrap();
    let western = corpus.idf("western").unwrap();
    assert!(western > drama);
    assert!(drama >= 1.0);
}

#[test]
fn vectorization_is_deterministic_across_snapshots() {
    let a = vectorize(&snapshot(TAGS));
    let b = vectorize(&snapshot(TAGS));
    assert_eq!(a.vocabulary().terms(), b.vocabulary().terms());
    assert_eq!(a.vectors(), b.vectors());
    assert_ne!(a.snapshot_version(), b.snapshot_version());
}

// ============================================================
// Cosine similarity properties
// ============================================================

#[test]
fn self_similarity_is_one() {
    let corpus = vectorize(&snapshot(TAGS));
    for v in corpus.vectors().iter().filter(|v| !v.is_zero()) {
        assert!((cosine_similarity(v, v) - 1.0).abs() < 1e-6);
    }
}

#[test]
fn similarity_is_bounded_and_symmetric() {
    let corpus = vectorize(&snapshot(TAGS));
    let vectors = corpus.vectors();
    for a in vectors {
        for b in vectors {
            let ab = cosine_similarity(a, b);
            let ba = cosine_similarity(b, a);
            assert!((0.0..=1.0).contains(&ab));
            assert!((ab - ba).abs() < 1e-12);
        }
    }
}

#[test]
fn shared_genres_score_above_disjoint_ones() {
    let corpus = vectorize(&snapshot(TAGS));
    let crime_drama = corpus.vector(1).unwrap();
    let drama = corpus.vector(8).unwrap();
    let western = corpus.vector(9).unwrap();
    assert!(cosine_similarity(crime_drama, drama) > 0.0);
    assert_eq!(cosine_similarity(crime_drama, western), 0.0);
}

#[test]
fn cosine_uses_full_formula_for_short_vectors() {
    // A half-length copy of a unit vector is still perfectly similar
    let v = SparseVector::from_entries(3, vec![(0, 0.6), (1, 0.8)]);
    let half = SparseVector::from_entries(3, vec![(0, 0.3), (1, 0.4)]);
    assert!((v.dot(&half) - 0.5).abs() < 1e-12);
    assert!((cosine_similarity(&v, &half) - 1.0).abs() < 1e-9);
}

// ============================================================
// Tokenizer
// ============================================================

#[test]
fn tokenizer_lowercases_and_splits_punctuation() {
    let tokenizer = TagTokenizer::english();
    assert_eq!(
        tokenizer.tokenize("Crime,Drama/THRILLER"),
        vec!["crime", "drama", "thriller"]
    );
}

#[test]
fn sci_fi_keeps_both_fragments() {
    let tokenizer = TagTokenizer::english();
    assert_eq!(
        tokenizer.tokenize("Action, Sci-Fi"),
        vec!["action", "sci", "fi"]
    );

    let corpus = vectorize(&snapshot(&["Action, Sci-Fi", "Drama"]));
    assert!(corpus.vocabulary().get("fi").is_some());
    assert!(corpus.vocabulary().get("sci").is_some());
}

#[test]
fn empty_catalog_has_empty_vocabulary() {
    let corpus = vectorize(&snapshot(&[]));
    assert!(corpus.is_empty());
    assert!(corpus.vocabulary().is_empty());
}
