//! Integration tests for the scraper
//!
//! These tests use wiremock to serve channel preview pages and run the
//! full fetch → extract → filter → persist → analyze cycle end-to-end.

use chrono::NaiveDate;
use std::time::Duration;
use tempfile::TempDir;
use tg_channel_stats::analysis::Analyzer;
use tg_channel_stats::config::{AnalysisConfig, ScraperConfig};
use tg_channel_stats::output::{load_posts_csv, save_posts_csv};
use tg_channel_stats::scraper::{
    scrape_channel, ExtractWarning, HttpFetcher, ScrapeObserver, ScrapeSettings, Scraper,
};
use tg_channel_stats::{ScrapeError, ScrapeRequest, StopReason, ValidationError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Recorder {
    progress: Vec<(usize, usize)>,
    warnings: usize,
}

impl ScrapeObserver for Recorder {
    fn on_progress(&mut self, accepted: usize, max_posts: usize) {
        self.progress.push((accepted, max_posts));
    }

    fn on_warning(&mut self, _page_url: &str, _warning: &ExtractWarning) {
        self.warnings += 1;
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn message(text: &str, datetime: &str) -> String {
    format!(
        r#"<div class="tgme_widget_message_wrap js-widget_message_wrap">
             <div class="tgme_widget_message js-widget_message">
               <div class="tgme_widget_message_text js-message_text" dir="auto">{}</div>
               <div class="tgme_widget_message_footer">
                 <span class="tgme_widget_message_meta">
                   <a class="tgme_widget_message_date" href="https://t.me/news1/1"><time datetime="{}" class="time">10:00</time></a>
                 </span>
               </div>
             </div>
           </div>"#,
        text, datetime
    )
}

fn page(messages: &[(&str, &str)], more: Option<&str>) -> String {
    let more = more
        .map(|href| {
            format!(
                r#"<div class="tme_messages_more_wrap"><a href="{}" class="tme_messages_more js-messages_more" data-before="20"></a></div>"#,
                href
            )
        })
        .unwrap_or_default();
    let body: String = messages.iter().map(|(t, d)| message(t, d)).collect();
    format!(
        "<!DOCTYPE html><html><head><title>News</title></head><body><section class=\"tgme_channel_history js-message_history\">{}{}</section></body></html>",
        more, body
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn scraper_for(server: &MockServer) -> Scraper<HttpFetcher> {
    let fetcher = HttpFetcher::from_config(&ScraperConfig::default()).expect("client builds");
    Scraper::new(
        fetcher,
        ScrapeSettings {
            base_url: server.uri(),
            politeness_delay: Duration::from_millis(10),
        },
    )
}

#[tokio::test]
async fn test_multi_page_scrape_stops_before_start_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .respond_with(html(page(
            &[
                ("خبر عاجل عن الاقتصاد", "2024-01-05T10:00:00+00:00"),
                ("الاقتصاد ينمو بسرعة", "2024-01-04T09:00:00+00:00"),
            ],
            Some("/s/news1?before=20"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .and(query_param("before", "20"))
        .respond_with(html(page(
            &[
                ("تقرير الاقتصاد الأسبوعي", "2024-01-03T09:00:00Z"),
                ("old news", "2023-12-30T09:00:00+00:00"),
            ],
            Some("/s/news1?before=10"),
        )))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .and(query_param("before", "10"))
        .respond_with(html(page(&[("never", "2023-12-29T09:00:00+00:00")], None)))
        .with_priority(1)
        .expect(0)
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let request = ScrapeRequest::new(
        format!("{}/s/news1", mock_server.uri()),
        date(2024, 1, 1),
        date(2024, 1, 31),
        100,
    );
    let mut recorder = Recorder::default();

    let run = scraper.run(&request, &mut recorder).await;

    assert_eq!(run.posts.len(), 3);
    assert_eq!(
        run.stop_reason,
        StopReason::PastStartDate {
            date: date(2023, 12, 30)
        }
    );
    assert_eq!(run.pages_fetched, 2);
    assert_eq!(recorder.progress, vec![(1, 100), (2, 100), (3, 100)]);

    let report = Analyzer::from_config(&AnalysisConfig::default())
        .analyze(&run.posts)
        .expect("non-empty run has a report");
    assert_eq!(report.total_posts, 3);
    assert_eq!(report.top_words[0], ("الاقتصاد".to_string(), 3));
    assert_eq!(report.posts_per_day.len(), 3);
}

#[tokio::test]
async fn test_server_error_returns_partial_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .respond_with(html(page(
            &[("first page post", "2024-01-05T10:00:00+00:00")],
            Some("/s/news1?before=20"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .and(query_param("before", "20"))
        .respond_with(ResponseTemplate::new(503))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let request = ScrapeRequest::new(
        format!("{}/s/news1", mock_server.uri()),
        date(2024, 1, 1),
        date(2024, 1, 31),
        100,
    );

    let run = scraper.run(&request, &mut Recorder::default()).await;

    assert_eq!(run.posts.len(), 1);
    assert_eq!(run.posts[0].text, "first page post");
    match &run.stop_reason {
        StopReason::FetchFailed { url, failure } => {
            assert!(url.ends_with("/s/news1?before=20"));
            assert_eq!(failure.status_code, Some(503));
        }
        other => panic!("unexpected stop reason {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_messages_are_skipped() {
    let mock_server = MockServer::start().await;

    let body = format!(
        "<html><body>{}{}</body></html>",
        r#"<div class="tgme_widget_message_wrap"><div class="tgme_widget_message_photo_wrap"></div><a class="tgme_widget_message_date"><time datetime="2024-01-05T11:00:00+00:00"></time></a></div>"#,
        message("text survives", "2024-01-05T10:00:00+00:00")
    );
    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .respond_with(html(body))
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let request = ScrapeRequest::new(
        format!("{}/s/news1", mock_server.uri()),
        date(2024, 1, 1),
        date(2024, 1, 31),
        100,
    );
    let mut recorder = Recorder::default();

    let run = scraper.run(&request, &mut recorder).await;

    assert_eq!(run.posts.len(), 1);
    assert_eq!(run.skipped_blocks, 1);
    assert_eq!(recorder.warnings, 1);
    assert_eq!(run.stop_reason, StopReason::NoNextPage);
}

#[tokio::test]
async fn test_scrape_persist_reload_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/news1"))
        .respond_with(html(page(
            &[
                ("quote \"here\", and comma", "2024-01-05T10:00:00+03:00"),
                ("second post", "2024-01-04T10:00:00+00:00"),
            ],
            None,
        )))
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let request = ScrapeRequest::new(
        format!("{}/s/news1", mock_server.uri()),
        date(2024, 1, 1),
        date(2024, 1, 31),
        100,
    );
    let run = scraper.run(&request, &mut Recorder::default()).await;
    assert_eq!(run.posts.len(), 2);

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("posts.csv");
    save_posts_csv(&csv_path, &run.posts).unwrap();

    let reloaded = load_posts_csv(&csv_path).unwrap();
    assert_eq!(reloaded, run.posts);
    assert_eq!(reloaded[0].text, "quote \"here\", and comma");
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = ScraperConfig::default();
    config.base_url = mock_server.uri();

    // Not a t.me preview URL
    let request = ScrapeRequest::new(
        format!("{}/s/news1", mock_server.uri()),
        date(2024, 1, 1),
        date(2024, 1, 31),
        100,
    );
    let result = scrape_channel(&config, &request, date(2024, 2, 1), &mut Recorder::default()).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Validation(ValidationError::InvalidChannelUrl(_)))
    ));

    // End date in the future
    let request = ScrapeRequest::new(
        "https://t.me/s/news1",
        date(2024, 1, 1),
        date(2024, 3, 1),
        100,
    );
    let result = scrape_channel(&config, &request, date(2024, 2, 1), &mut Recorder::default()).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Validation(ValidationError::EndInFuture { .. }))
    ));
}
