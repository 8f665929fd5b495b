// Scoring: profile construction and similarity ranking.

pub mod profile;
pub mod ranker;
pub mod traits;
