// Tag tokenizer: lowercases, splits on anything that isn't a letter, and
// drops English stop words.
//
// "Action, Adventure, Sci-Fi" -> ["action", "adventure", "sci", "fi"]
// (minus whichever of those the stop word list contains).
//
// The English list flags "fi", which is half of the "Sci-Fi" genre, so the
// genre fragments below are always kept.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Tag fragments that must survive tokenization even if a stop word list
/// contains them.
pub const KEPT_GENRE_FRAGMENTS: &[&str] = &["sci", "fi"];

/// Tokenizer for free-text tag lists.
#[derive(Debug, Clone)]
pub struct TagTokenizer {
    stop_words: HashSet<String>,
}

impl Default for TagTokenizer {
    fn default() -> Self {
        Self::english()
    }
}

impl TagTokenizer {
    /// Tokenizer using the English list from the `stop-words` crate, minus
    /// `KEPT_GENRE_FRAGMENTS`.
    pub fn english() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(
            stop_words
                .into_iter()
                .filter(|w| !KEPT_GENRE_FRAGMENTS.contains(&w.to_lowercase().as_str())),
        )
    }

    /// Tokenizer with a caller-supplied stop word list (matched lowercase).
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Split tag text into tokens, in order of appearance. Repeated tokens
    /// are kept (they are the term frequency).
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| !t.is_empty() && !self.is_stop_word(t))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_non_alphabetic() {
        let tokenizer = TagTokenizer::with_stop_words(Vec::<String>::new());
        assert_eq!(
            tokenizer.tokenize("Action, Adventure, Sci-Fi"),
            vec!["action", "adventure", "sci", "fi"]
        );
    }

    #[test]
    fn test_drops_stop_words_and_digits() {
        let tokenizer = TagTokenizer::with_stop_words(["and", "the"]);
        assert_eq!(
            tokenizer.tokenize("The Crime AND 1990s drama"),
            vec!["crime", "s", "drama"]
        );
    }

    #[test]
    fn test_keeps_repeats() {
        let tokenizer = TagTokenizer::with_stop_words(Vec::<String>::new());
        assert_eq!(tokenizer.tokenize("drama drama"), vec!["drama", "drama"]);
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = TagTokenizer::english();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" ,;- 42").is_empty());
    }

    #[test]
    fn test_english_list_filters_function_words() {
        let tokenizer = TagTokenizer::english();
        assert!(tokenizer.is_stop_word("the"));
        assert!(tokenizer.is_stop_word("and"));
        assert_eq!(tokenizer.tokenize("the drama"), vec!["drama"]);
    }

    #[test]
    fn test_english_list_keeps_sci_fi() {
        let tokenizer = TagTokenizer::english();
        assert!(!tokenizer.is_stop_word("fi"));
        assert!(!tokenizer.is_stop_word("sci"));
        assert_eq!(
            tokenizer.tokenize("Action, Sci-Fi"),
            vec!["action", "sci", "fi"]
        );
    }
}
