//! HTTP page fetcher
//!
//! This module handles the single network retrieval of one preview page:
//! - Building the HTTP client with a browser-like User-Agent
//! - One GET per call, no retries
//! - Classifying failures into `PageFetchOutcome::NetworkFailure`

use crate::config::ScraperConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetchOutcome {
    /// Any 2xx response, carrying the raw body
    Success(String),

    /// Transport error or non-2xx status
    NetworkFailure(FetchFailure),
}

/// Why a page could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,

    /// Error description
    pub message: String,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "HTTP {}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Source of page markup for the scrape controller
///
/// The controller only ever awaits one fetch at a time.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = PageFetchOutcome> + Send;
}

/// Builds an HTTP client from the scraper configuration
///
/// # Arguments
///
/// * `config` - The scraper configuration (user agent, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = PageFetchOutcome> + Send {
        fetch_page(&self.client, url)
    }
}

/// Performs one GET for `url`
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx | `Success(body)`, whatever the content |
/// | Other status | `NetworkFailure` with the status code |
/// | Timeout / connect / body read error | `NetworkFailure` without a status |
pub async fn fetch_page(client: &Client, url: &str) -> PageFetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let message = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return PageFetchOutcome::NetworkFailure(FetchFailure {
                status_code: None,
                message,
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        return PageFetchOutcome::NetworkFailure(FetchFailure {
            status_code: Some(status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        });
    }

    match response.text().await {
        Ok(body) => PageFetchOutcome::Success(body),
        Err(e) => PageFetchOutcome::NetworkFailure(FetchFailure {
            status_code: Some(status.as_u16()),
            message: format!("Failed to read body: {}", e),
        }),
    }
}
