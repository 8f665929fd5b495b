// Review analyzer: translate, score, label and suggest a rating.
//
// Failure policy:
// - blank review: Neutral, polarity 0.0, no collaborator calls
// - translation fails: score the original text instead
// - scoring fails or returns an out-of-range polarity: Neutral, 0.0
// No path returns an error to the caller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, warn};

use super::suggestion::{suggested_rating_with, Polarity, SentimentLabel, SuggestionParams};
use super::traits::{SentimentScorer, Translator};

/// Sentiment of one review plus the rating it suggests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewSentiment {
    pub label: SentimentLabel,
    pub polarity: f64,
    pub suggested_rating: u8,
}

pub struct ReviewAnalyzer {
    translator: Arc<dyn Translator>,
    scorer: Arc<dyn SentimentScorer>,
    params: SuggestionParams,
}

impl ReviewAnalyzer {
    pub fn new(translator: Arc<dyn Translator>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            translator,
            scorer,
            params: SuggestionParams::default(),
        }
    }

    pub fn with_params(mut self, params: SuggestionParams) -> Self {
        self.params = params;
        self
    }

    fn sentiment_for(&self, polarity: Polarity) -> ReviewSentiment {
        ReviewSentiment {
            label: SentimentLabel::from_polarity(polarity),
            polarity: polarity.value(),
            suggested_rating: suggested_rating_with(polarity, &self.params),
        }
    }

    /// Analyze one review. Never fails; see the module notes for fallbacks.
    pub async fn analyze(&self, text: &str) -> ReviewSentiment {
        if text.trim().is_empty() {
            return self.sentiment_for(Polarity::NEUTRAL);
        }

        let english = match self.translator.translate_to_english(text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, "Translation failed, scoring original text");
                text.to_string()
            }
        };

        let polarity = match self.scorer.polarity(&english).await {
            Ok(raw) => Polarity::new(raw).unwrap_or_else(|e| {
                warn!(error = %e, "Sentiment scorer returned invalid polarity");
                Polarity::NEUTRAL
            }),
            Err(e) => {
                warn!(error = %e, "Sentiment scoring failed, treating review as neutral");
                Polarity::NEUTRAL
            }
        };

        let sentiment = self.sentiment_for(polarity);
        debug!(
            label = sentiment.label.as_str(),
            polarity = sentiment.polarity,
            suggested = sentiment.suggested_rating,
            "Analyzed review"
        );
        sentiment
    }

    /// Analyze many reviews with up to `concurrency` in flight. Results are
    /// in input order.
    pub async fn analyze_batch(&self, texts: &[String], concurrency: usize) -> Vec<ReviewSentiment> {
        stream::iter(texts)
            .map(|text| self.analyze(text))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
