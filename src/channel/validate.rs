use once_cell::sync::Lazy;
use regex::Regex;

static CHANNEL_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://t\.me/s/([A-Za-z0-9_]+)$").expect("channel URL pattern is valid")
});

/// Returns true iff `url` is exactly `https://t.me/s/<channel>`
///
/// `<channel>` is one or more ASCII letters, digits or underscores. Anything
/// else (other schemes, trailing slashes, query strings, whitespace) is rejected.
///
/// # Examples
///
/// ```
/// use tg_channel_stats::channel::is_valid_channel_url;
///
/// assert!(is_valid_channel_url("https://t.me/s/news1"));
/// assert!(!is_valid_channel_url("http://t.me/s/news1"));
/// ```
pub fn is_valid_channel_url(url: &str) -> bool {
    CHANNEL_URL.is_match(url)
}

/// Extracts the channel name from a valid channel URL
pub fn channel_name(url: &str) -> Option<&str> {
    CHANNEL_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_channel() {
        assert!(is_valid_channel_url("https://t.me/s/news1"));
        assert!(is_valid_channel_url("https://t.me/s/AjaNews"));
        assert!(is_valid_channel_url("https://t.me/s/some_channel_2"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_valid_channel_url("http://t.me/s/news1"));
        assert!(!is_valid_channel_url("ftp://t.me/s/news1"));
        assert!(!is_valid_channel_url("t.me/s/news1"));
    }

    #[test]
    fn test_rejects_bad_channel_names() {
        assert!(!is_valid_channel_url("https://t.me/s/news 1"));
        assert!(!is_valid_channel_url("https://t.me/s/"));
        assert!(!is_valid_channel_url("https://t.me/s/news-1"));
        assert!(!is_valid_channel_url("https://t.me/s/أخبار"));
    }

    #[test]
    fn test_rejects_trailing_content() {
        assert!(!is_valid_channel_url("https://t.me/s/news1/"));
        assert!(!is_valid_channel_url("https://t.me/s/news1?before=10"));
        assert!(!is_valid_channel_url("https://t.me/s/news1\n"));
        assert!(!is_valid_channel_url(" https://t.me/s/news1"));
    }

    #[test]
    fn test_rejects_empty_and_non_preview_urls() {
        assert!(!is_valid_channel_url(""));
        assert!(!is_valid_channel_url("https://t.me/news1"));
        assert!(!is_valid_channel_url("https://t.me.evil.com/s/news1"));
    }

    #[test]
    fn test_channel_name() {
        assert_eq!(channel_name("https://t.me/s/news1"), Some("news1"));
        assert_eq!(channel_name("https://t.me/s/news1/"), None);
    }
}
