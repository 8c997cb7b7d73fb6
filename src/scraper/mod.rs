//! Scraper module for channel preview pages
//!
//! This module contains the scraping logic, including:
//! - HTTP fetching of single pages
//! - Message extraction from page markup
//! - The date-bounded, paginated scrape controller
//! - The observer interface for progress, warnings and cancellation

mod controller;
mod extractor;
mod fetcher;
mod observer;

pub use controller::{ScrapeRun, ScrapeSettings, Scraper, StopReason};
pub use extractor::{extract_messages, ExtractWarning, ExtractedPage, WarningKind};
pub use fetcher::{
    build_http_client, fetch_page, FetchFailure, HttpFetcher, PageFetchOutcome, PageFetcher,
};
pub use observer::{progress_percent, ScrapeObserver, TracingObserver};

use crate::channel::ScrapeRequest;
use crate::config::ScraperConfig;
use crate::ScrapeError;
use chrono::NaiveDate;

/// Validates a request and scrapes it over HTTP
///
/// This is the main entry point for a scrape. It will:
/// 1. Reject an invalid request before any network activity
/// 2. Build the HTTP client from the scraper configuration
/// 3. Walk the channel pages until a stop condition is met
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `request` - Channel URL, date window and post ceiling
/// * `today` - Reference date for the "end date not in the future" rule
/// * `observer` - Receives progress, warnings and is polled for cancellation
///
/// # Returns
///
/// * `Ok(ScrapeRun)` - The run finished; fetch failures are reported in its stop reason
/// * `Err(ScrapeError)` - The request was invalid or the client could not be built
pub async fn scrape_channel(
    config: &ScraperConfig,
    request: &ScrapeRequest,
    today: NaiveDate,
    observer: &mut dyn ScrapeObserver,
) -> crate::Result<ScrapeRun> {
    request.validate(today)?;

    let fetcher = HttpFetcher::from_config(config).map_err(|source| ScrapeError::Http {
        url: request.source_url.clone(),
        source,
    })?;

    let scraper = Scraper::new(fetcher, ScrapeSettings::from(config));
    Ok(scraper.run(request, observer).await)
}
