use crate::config::types::{AnalysisConfig, Config, OutputConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_analysis_config(&config.analysis)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates page fetching configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "https" && base.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates analysis configuration
fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.min_token_length < 1 {
        return Err(ConfigError::Validation(format!(
            "min-token-length must be >= 1, got {}",
            config.min_token_length
        )));
    }

    if config.top_words < 1 {
        return Err(ConfigError::Validation(format!(
            "top-words must be >= 1, got {}",
            config.top_words
        )));
    }

    if let Some(word) = config
        .extra_stop_words
        .iter()
        .find(|w| w.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "extra-stop-words cannot contain blank entries, got '{}'",
            word
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
