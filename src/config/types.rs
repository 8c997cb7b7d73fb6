use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Page fetching behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site address prefixed to relative next-page references
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value of the User-Agent header sent with each request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Pause between consecutive page fetches (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl ScraperConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://t.me".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            politeness_delay_ms: 5000,
            request_timeout_secs: 30,
        }
    }
}

/// Token cleaning and frequency report settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Shortest token kept by the cleaner (in characters)
    #[serde(rename = "min-token-length")]
    pub min_token_length: usize,

    /// Number of entries in the top-words table
    #[serde(rename = "top-words")]
    pub top_words: usize,

    /// Stop words added to the built-in set
    #[serde(rename = "extra-stop-words")]
    pub extra_stop_words: Vec<String>,

    /// Use only `extra-stop-words`, dropping the built-in set
    #[serde(rename = "replace-stop-words")]
    pub replace_stop_words: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_token_length: 3,
            top_words: 20,
            extra_stop_words: Vec::new(),
            replace_stop_words: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file holding the scraped posts
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path of the Markdown report; empty disables it
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "telegram_data.csv".to_string(),
            summary_path: String::new(),
        }
    }
}
