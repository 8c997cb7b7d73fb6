//! Progress, warning and cancellation sink injected into a scrape run

use crate::scraper::extractor::ExtractWarning;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives run events synchronously; implementations must not block
pub trait ScrapeObserver {
    /// Called once per accepted post with the running count and the ceiling
    fn on_progress(&mut self, accepted: usize, max_posts: usize);

    /// Called for every message block skipped by the extractor
    fn on_warning(&mut self, page_url: &str, warning: &ExtractWarning) {
        let _ = (page_url, warning);
    }

    /// Polled before each page fetch; returning true ends the run
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that reports through `tracing`
///
/// Optionally shares a cancellation flag with a signal handler.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    cancel: Option<Arc<AtomicBool>>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_flag(cancel: Arc<AtomicBool>) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }
}

impl ScrapeObserver for TracingObserver {
    fn on_progress(&mut self, accepted: usize, max_posts: usize) {
        tracing::info!(
            "Processed {} posts ({}%)",
            accepted,
            progress_percent(accepted, max_posts)
        );
    }

    fn on_warning(&mut self, page_url: &str, warning: &ExtractWarning) {
        tracing::warn!("Skipping message on {}: {}", page_url, warning);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Completion percentage clamped to 0..=100
pub fn progress_percent(current: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((current.saturating_mul(100) / total).min(100)) as u8
}
