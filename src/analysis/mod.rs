//! Text analysis over scraped posts
//!
//! This module handles:
//! - Cleaning post text into frequency tokens
//! - Word frequency, per-day counts and summary scalars

mod cleaner;
mod report;
mod stopwords;

pub use cleaner::TextCleaner;
pub use report::{analyze, AnalysisReport, Analyzer};
pub use stopwords::DEFAULT_STOP_WORDS;
