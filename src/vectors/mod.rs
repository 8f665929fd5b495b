// Vector space: tag tokenization, TF-IDF item vectors and their cache.

pub mod cache;
pub mod sparse;
pub mod tfidf;
pub mod tokenize;
pub mod traits;
