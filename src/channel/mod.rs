//! Channel reference handling
//!
//! This module provides the channel URL shape check and the validated
//! scrape request handed to the scraper.

mod request;
mod validate;

pub use request::ScrapeRequest;
pub use validate::{channel_name, is_valid_channel_url};
