// Translation and sentiment scorer traits: the swap-ready collaborators.
//
// Reviews can be written in any language. A `Translator` turns them into
// English and a `SentimentScorer` maps English text to a polarity. Both are
// external services in practice, so both are async and both may fail; the
// `ReviewAnalyzer` absorbs those failures.

use anyhow::Result;
use async_trait::async_trait;

/// Translate review text to English.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_to_english(&self, text: &str) -> Result<String>;
}

/// Score English text for sentiment polarity in [-1, 1].
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn polarity(&self, text: &str) -> Result<f64>;
}

/// Translator that returns its input unchanged (for English-only setups).
pub struct IdentityTranslator;

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate_to_english(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}
