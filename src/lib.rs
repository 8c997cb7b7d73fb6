//! tg-channel-stats: date-bounded scraping and text statistics for public channel previews
//!
//! This crate walks the paginated web preview of a public channel, keeps the posts
//! that fall inside a caller-supplied date window (up to a post ceiling), and turns
//! the collected text into frequency and time-series statistics.

pub mod analysis;
pub mod channel;
pub mod config;
pub mod output;
pub mod post;
pub mod scraper;

use thiserror::Error;

/// Main error type for scraping operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid scrape request: {0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP client error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Reasons a scrape request is rejected before any network activity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("channel URL must look like https://t.me/s/<channel>, got '{0}'")]
    InvalidChannelUrl(String),

    #[error("start date {start} is after end date {end}")]
    StartAfterEnd {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("end date {end} is in the future (today is {today})")]
    EndInFuture {
        end: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },

    #[error("max posts must be at least 1")]
    ZeroMaxPosts,
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use self::analysis::{analyze, AnalysisReport, TextCleaner};
pub use self::channel::{is_valid_channel_url, ScrapeRequest};
pub use self::config::Config;
pub use self::post::Post;
pub use self::scraper::{scrape_channel, ScrapeObserver, ScrapeRun, StopReason};
