use crate::analysis::stopwords::DEFAULT_STOP_WORDS;
use crate::config::AnalysisConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Anything that is not a letter, a number or whitespace.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("non-word pattern is valid"));

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Nd}+").expect("digit pattern is valid"));

/// Turns raw post text into tokens for frequency counting
///
/// Cleaning replaces punctuation and digit runs with spaces, splits on
/// whitespace, then drops short tokens, stop words and anything numeric.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    stop_words: HashSet<String>,
    min_token_length: usize,
}

impl TextCleaner {
    pub fn new<I, S>(stop_words: I, min_token_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            min_token_length,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        let mut stop_words: HashSet<String> = if config.replace_stop_words {
            HashSet::new()
        } else {
            DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
        };
        stop_words.extend(config.extra_stop_words.iter().map(|w| w.trim().to_string()));

        Self {
            stop_words,
            min_token_length: config.min_token_length,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Returns the surviving tokens of `text`, in order
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let text = NON_WORD.replace_all(text, " ");
        let text = DIGIT_RUN.replace_all(&text, " ");

        text.split_whitespace()
            .filter(|word| self.keeps(word))
            .map(str::to_string)
            .collect()
    }

    fn keeps(&self, word: &str) -> bool {
        word.chars().count() >= self.min_token_length
            && !self.is_stop_word(word)
            && !word.chars().any(char::is_numeric)
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}
