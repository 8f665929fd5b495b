// Polarity -> rating suggestion.
//
//   suggested = round(5.5 + polarity * 4.5), clamped to 1..=10
//
// Half-integers round to even, so a perfectly neutral review (5.5) suggests
// 6. Polarity outside [-1, 1] (or NaN) is rejected at construction of
// `Polarity`, never clamped.

use std::fmt;

use serde::Serialize;

/// Polarity beyond +/- this value gets a Positive/Negative label.
pub const LABEL_THRESHOLD: f64 = 0.2;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SentimentError {
    #[error("Polarity {0} is outside [-1, 1]")]
    PolarityOutOfRange(f64),
}

/// A sentiment polarity guaranteed to lie in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Polarity(f64);

impl Polarity {
    pub const NEUTRAL: Polarity = Polarity(0.0);

    pub fn new(value: f64) -> Result<Self, SentimentError> {
        if (-1.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SentimentError::PolarityOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Coarse sentiment label for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: Polarity) -> Self {
        match polarity.value() {
            p if p > LABEL_THRESHOLD => SentimentLabel::Positive,
            p if p < -LABEL_THRESHOLD => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constants of the suggestion formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionParams {
    /// Rating for polarity 0 before rounding (default 5.5)
    pub midpoint: f64,
    /// Rating change per unit of polarity (default 4.5)
    pub scale: f64,
    pub min_rating: u8,
    pub max_rating: u8,
}

impl Default for SuggestionParams {
    fn default() -> Self {
        Self {
            midpoint: 5.5,
            scale: 4.5,
            min_rating: 1,
            max_rating: 10,
        }
    }
}

/// Suggested 1-10 rating for a polarity, with the default constants.
pub fn suggested_rating(polarity: Polarity) -> u8 {
    suggested_rating_with(polarity, &SuggestionParams::default())
}

pub fn suggested_rating_with(polarity: Polarity, params: &SuggestionParams) -> u8 {
    let raw = (params.midpoint + polarity.value() * params.scale).round_ties_even();
    raw.clamp(params.min_rating as f64, params.max_rating as f64) as u8
}

/// Boundary entry point: validate a raw polarity, then suggest.
pub fn suggest_rating(polarity: f64) -> Result<u8, SentimentError> {
    Polarity::new(polarity).map(suggested_rating)
}
