//! Message extraction from channel preview markup
//!
//! This module parses one page of the channel preview and extracts:
//! - One `Post` per message block carrying both a text node and a timestamp
//! - A warning for every block missing either of them
//! - The "load more" reference, resolved against the site base address
//!   (relative hrefs are joined onto it, absolute ones kept as-is)

use crate::post::{parse_timestamp, Post};
use once_cell::sync::Lazy;
use ::scraper::{ElementRef, Html, Selector};
use url::Url;

static MESSAGE_BLOCK: Lazy<Selector> = Lazy::new(|| selector(".tgme_widget_message_wrap"));
static MESSAGE_TEXT: Lazy<Selector> = Lazy::new(|| selector(".tgme_widget_message_text"));
static MESSAGE_TIME: Lazy<Selector> = Lazy::new(|| selector(".tgme_widget_message_date time"));
static LOAD_MORE: Lazy<Selector> = Lazy::new(|| selector("a.tme_messages_more"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Well-formed posts, in document order
    pub posts: Vec<Post>,

    /// Absolute address of the next (older) page, if the page links one
    pub next_page_ref: Option<String>,

    /// Number of message blocks on the page, well-formed or not
    pub block_count: usize,

    /// Blocks that were skipped
    pub warnings: Vec<ExtractWarning>,
}

impl ExtractedPage {
    /// A page without any message block marks the end of the channel
    pub fn is_end_of_content(&self) -> bool {
        self.block_count == 0
    }
}

/// A message block that could not be turned into a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    /// Zero-based position of the block on its page
    pub block_index: usize,

    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    MissingText,
    MissingTimestamp,
    InvalidTimestamp(String),
}

impl std::fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::MissingText => {
                write!(f, "message block {} has no text", self.block_index)
            }
            WarningKind::MissingTimestamp => {
                write!(f, "message block {} has no timestamp", self.block_index)
            }
            WarningKind::InvalidTimestamp(raw) => write!(
                f,
                "message block {} has an unparseable timestamp '{}'",
                self.block_index, raw
            ),
        }
    }
}

/// Parses a preview page into posts and a next-page reference
///
/// # Arguments
///
/// * `html` - Raw page markup
/// * `base_url` - Site address prefixed to the relative "load more" href
///
/// # Example
///
/// ```
/// use tg_channel_stats::scraper::extract_messages;
///
/// let html = r#"
///   <div class="tgme_widget_message_wrap">
///     <div class="tgme_widget_message_text">Hello</div>
///     <a class="tgme_widget_message_date"><time datetime="2024-01-01T10:00:00+00:00"></time></a>
///   </div>
///   <a class="tme_messages_more" href="/s/news1?before=42"></a>"#;
/// let page = extract_messages(html, "https://t.me");
/// assert_eq!(page.posts.len(), 1);
/// assert_eq!(page.next_page_ref.as_deref(), Some("https://t.me/s/news1?before=42"));
/// ```
pub fn extract_messages(html: &str, base_url: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let mut page = ExtractedPage::default();

    for (index, block) in document.select(&MESSAGE_BLOCK).enumerate() {
        page.block_count += 1;
        match extract_post(block) {
            Ok(post) => page.posts.push(post),
            Err(kind) => page.warnings.push(ExtractWarning {
                block_index: index,
                kind,
            }),
        }
    }

    page.next_page_ref = extract_next_page(&document, base_url);
    page
}

/// Turns one message block into a post
fn extract_post(block: ElementRef<'_>) -> Result<Post, WarningKind> {
    let text_node = block
        .select(&MESSAGE_TEXT)
        .next()
        .ok_or(WarningKind::MissingText)?;
    let time_node = block
        .select(&MESSAGE_TIME)
        .next()
        .ok_or(WarningKind::MissingTimestamp)?;

    let raw = time_node
        .value()
        .attr("datetime")
        .ok_or(WarningKind::MissingTimestamp)?;
    let timestamp =
        parse_timestamp(raw).ok_or_else(|| WarningKind::InvalidTimestamp(raw.to_string()))?;

    Ok(Post::new(element_text(text_node), timestamp))
}

/// Visible text of an element: trimmed text runs joined by single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_next_page(document: &Html, base_url: &str) -> Option<String> {
    let href = document
        .select(&LOAD_MORE)
        .next()?
        .value()
        .attr("href")?
        .trim();

    if href.is_empty() {
        return None;
    }

    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(String::from)
}
