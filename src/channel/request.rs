use crate::channel::is_valid_channel_url;
use crate::ValidationError;
use chrono::NaiveDate;

/// Caller-owned description of one scrape run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    /// First page to fetch (`https://t.me/s/<channel>`)
    pub source_url: String,

    /// Earliest accepted post date (inclusive)
    pub start_date: NaiveDate,

    /// Latest accepted post date (inclusive)
    pub end_date: NaiveDate,

    /// Ceiling on the number of accepted posts
    pub max_posts: usize,
}

impl ScrapeRequest {
    pub fn new(
        source_url: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_posts: usize,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            start_date,
            end_date,
            max_posts,
        }
    }

    /// Returns true if `date` lies inside `[start_date, end_date]`
    pub fn in_range(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Validates the request against the rules checked before any fetch
    ///
    /// Checks, in order: the date window is ordered, the end date is not after
    /// `today`, the ceiling is positive, and the URL has the channel preview shape.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::StartAfterEnd {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if self.end_date > today {
            return Err(ValidationError::EndInFuture {
                end: self.end_date,
                today,
            });
        }

        if self.max_posts == 0 {
            return Err(ValidationError::ZeroMaxPosts);
        }

        if !is_valid_channel_url(&self.source_url) {
            return Err(ValidationError::InvalidChannelUrl(self.source_url.clone()));
        }

        Ok(())
    }
}
