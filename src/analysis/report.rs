//! Corpus statistics over a scrape result

use crate::analysis::cleaner::TextCleaner;
use crate::config::AnalysisConfig;
use crate::post::Post;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Statistics derived from a non-empty post collection
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub total_posts: usize,

    /// Earliest and latest post timestamps
    pub date_range: (DateTime<FixedOffset>, DateTime<FixedOffset>),

    /// Mean length of the raw text, in characters
    pub avg_post_length: f64,

    /// Most frequent tokens, count descending, ties in first-seen order
    pub top_words: Vec<(String, usize)>,

    /// Post count per calendar date, ascending
    pub posts_per_day: Vec<(NaiveDate, usize)>,
}

/// Computes reports with a fixed cleaner and top-words size
#[derive(Debug, Clone)]
pub struct Analyzer {
    cleaner: TextCleaner,
    top_words: usize,
}

impl Analyzer {
    pub fn new(cleaner: TextCleaner, top_words: usize) -> Self {
        Self { cleaner, top_words }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(TextCleaner::from_config(config), config.top_words)
    }

    /// Builds a report, or `None` when there are no posts
    pub fn analyze(&self, posts: &[Post]) -> Option<AnalysisReport> {
        let first = posts.first()?;

        let mut earliest = first.timestamp;
        let mut latest = first.timestamp;
        let mut total_chars = 0usize;
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

        for post in posts {
            earliest = earliest.min(post.timestamp);
            latest = latest.max(post.timestamp);
            total_chars += post.text.chars().count();
            *per_day.entry(post.date()).or_insert(0) += 1;
        }

        Some(AnalysisReport {
            total_posts: posts.len(),
            date_range: (earliest, latest),
            avg_post_length: total_chars as f64 / posts.len() as f64,
            top_words: self.word_frequencies(posts),
            posts_per_day: per_day.into_iter().collect(),
        })
    }

    fn word_frequencies(&self, posts: &[Post]) -> Vec<(String, usize)> {
        // Insertion order doubles as the tie-breaker for the stable sort below.
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for token in posts.iter().flat_map(|p| self.cleaner.tokens(&p.text)) {
            match index.get(&token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.top_words);
        counts
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

/// Analyzes posts with the default cleaner and a top-20 word table
pub fn analyze(posts: &[Post]) -> Option<AnalysisReport> {
    Analyzer::default().analyze(posts)
}
