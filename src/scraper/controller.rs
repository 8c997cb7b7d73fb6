//! Scrape controller - the paginated, date-bounded run
//!
//! This module walks the channel preview newest-first:
//! - Fetching one page at a time and extracting its posts
//! - Filtering each post against the request's date window
//! - Stopping on the first post older than the window, at the post ceiling,
//!   at the end of content, or on a fetch failure
//! - Pausing for the politeness interval between consecutive fetches

use crate::channel::ScrapeRequest;
use crate::config::ScraperConfig;
use crate::post::Post;
use crate::scraper::extractor::extract_messages;
use crate::scraper::fetcher::{FetchFailure, PageFetchOutcome, PageFetcher};
use crate::scraper::observer::ScrapeObserver;
use chrono::NaiveDate;
use std::time::Duration;

/// Why a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A fetched page contained no message blocks
    NoMoreMessages,

    /// The accepted count reached the request ceiling
    MaxPostsReached,

    /// A post dated before the window was met; it is not part of the result
    PastStartDate { date: NaiveDate },

    /// The last page had no "load more" reference
    NoNextPage,

    /// The fetcher reported a failure for `url`
    FetchFailed { url: String, failure: FetchFailure },

    /// The observer asked the run to stop between pages
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMoreMessages => write!(f, "no more messages"),
            Self::MaxPostsReached => write!(f, "maximum post count reached"),
            Self::PastStartDate { date } => write!(f, "reached {} before the start date", date),
            Self::NoNextPage => write!(f, "no 'load more' link"),
            Self::FetchFailed { url, failure } => write!(f, "failed to fetch {}: {}", url, failure),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of one scrape run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRun {
    /// Accepted posts in discovery order (newest first)
    pub posts: Vec<Post>,

    pub stop_reason: StopReason,

    /// Number of page fetches attempted, failed ones included
    pub pages_fetched: usize,

    /// Number of message blocks skipped as malformed
    pub skipped_blocks: usize,
}

/// Per-run knobs taken from the scraper configuration
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Prefix for relative next-page references
    pub base_url: String,

    /// Pause between consecutive page fetches
    pub politeness_delay: Duration,
}

impl From<&ScraperConfig> for ScrapeSettings {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            politeness_delay: config.politeness_delay(),
        }
    }
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self::from(&ScraperConfig::default())
    }
}

/// Drives a `PageFetcher` across pages for one request at a time
pub struct Scraper<F> {
    fetcher: F,
    settings: ScrapeSettings,
}

impl<F: PageFetcher> Scraper<F> {
    pub fn new(fetcher: F, settings: ScrapeSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Runs one scrape to completion
    ///
    /// Never fails: a fetch failure ends the run and whatever was accepted so
    /// far is returned together with `StopReason::FetchFailed`.
    ///
    /// Pages must list posts newest-first. The first post dated before
    /// `start_date` ends the run without being included, and no further page
    /// is fetched. Posts dated after `end_date` are skipped without stopping.
    pub async fn run(
        &self,
        request: &ScrapeRequest,
        observer: &mut dyn ScrapeObserver,
    ) -> ScrapeRun {
        tracing::info!(
            "Starting scrape of {} ({} to {}, at most {} posts)",
            request.source_url,
            request.start_date,
            request.end_date,
            request.max_posts
        );

        let mut posts = Vec::new();
        let mut pages_fetched = 0;
        let mut skipped_blocks = 0;
        let mut current_url = request.source_url.clone();

        let stop_reason = loop {
            if posts.len() >= request.max_posts {
                break StopReason::MaxPostsReached;
            }

            if observer.is_cancelled() {
                break StopReason::Cancelled;
            }

            tracing::info!("Fetching page: {}", current_url);
            pages_fetched += 1;

            let markup = match self.fetcher.fetch(&current_url).await {
                PageFetchOutcome::Success(markup) => markup,
                PageFetchOutcome::NetworkFailure(failure) => {
                    tracing::error!("Error fetching {}: {}", current_url, failure);
                    break StopReason::FetchFailed {
                        url: current_url,
                        failure,
                    };
                }
            };

            let page = extract_messages(&markup, &self.settings.base_url);

            if page.is_end_of_content() {
                break StopReason::NoMoreMessages;
            }

            for warning in &page.warnings {
                observer.on_warning(&current_url, warning);
            }
            skipped_blocks += page.warnings.len();

            if let Some(reason) = filter_page(&mut posts, page.posts, request, observer) {
                break reason;
            }

            tracing::info!("Collected {} posts so far", posts.len());

            let Some(next) = page.next_page_ref else {
                break StopReason::NoNextPage;
            };

            if !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }

            current_url = next;
        };

        tracing::info!(
            "Scrape finished after {} pages with {} posts: {}",
            pages_fetched,
            posts.len(),
            stop_reason
        );

        ScrapeRun {
            posts,
            stop_reason,
            pages_fetched,
            skipped_blocks,
        }
    }
}

/// Applies the date window to one page's candidates, in document order
///
/// Returns the stop reason if the page ended the run.
fn filter_page(
    accepted: &mut Vec<Post>,
    candidates: Vec<Post>,
    request: &ScrapeRequest,
    observer: &mut dyn ScrapeObserver,
) -> Option<StopReason> {
    for post in candidates {
        let date = post.date();

        if request.in_range(date) {
            accepted.push(post);
            observer.on_progress(accepted.len(), request.max_posts);

            if accepted.len() >= request.max_posts {
                tracing::info!("Reached the post limit ({})", request.max_posts);
                return Some(StopReason::MaxPostsReached);
            }
        } else if date < request.start_date {
            tracing::info!("Reached {} before the start date, stopping", date);
            return Some(StopReason::PastStartDate { date });
        } else {
            tracing::debug!("Skipping post dated {} after the end date", date);
        }
    }

    None
}
