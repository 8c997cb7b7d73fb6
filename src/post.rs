//! The post record shared by the scraper, the analyzer and the CSV persister.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// A single public post extracted from a channel page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Message text as rendered on the page, its text runs trimmed and joined by single spaces
    pub text: String,

    /// Publication time, keeping the offset the page reported
    pub timestamp: DateTime<FixedOffset>,
}

impl Post {
    pub fn new(text: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }

    /// Calendar date of the post in its own offset
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Parses an ISO-8601 timestamp, treating a trailing `Z` as `+00:00`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%:z"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2024-01-01T10:30:00+03:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_timestamp_trailing_z() {
        let ts = parse_timestamp("2024-01-01T23:59:59Z").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.to_rfc3339(), "2024-01-01T23:59:59+00:00");
    }

    #[test]
    fn test_parse_timestamp_space_separator() {
        assert!(parse_timestamp("2024-01-01 10:00:00+00:00").is_some());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-01-01").is_none());
    }

    #[test]
    fn test_post_date_uses_own_offset() {
        let ts = parse_timestamp("2024-01-01T23:30:00-05:00").unwrap();
        let post = Post::new("late post", ts);
        assert_eq!(post.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
