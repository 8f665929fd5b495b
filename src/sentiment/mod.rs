// Review sentiment: polarity-based rating suggestions and the analyzer that
// wraps the (external) translation and sentiment collaborators.

pub mod analyzer;
pub mod suggestion;
pub mod traits;
