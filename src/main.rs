//! tg-channel-stats main entry point
//!
//! This is the command-line interface for scraping a public channel preview
//! and printing statistics about its posts.

use anyhow::Context;
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tg_channel_stats::analysis::Analyzer;
use tg_channel_stats::config::{load_config_or_default, Config};
use tg_channel_stats::output::{
    generate_markdown_report, load_posts_csv, print_report, save_posts_csv,
};
use tg_channel_stats::scraper::{scrape_channel, TracingObserver};
use tg_channel_stats::{Post, ScrapeRequest, StopReason};
use tracing_subscriber::EnvFilter;

/// Scrape a public channel preview and analyze its posts
///
/// Walks https://t.me/s/<channel> from the newest post backwards, keeps posts
/// inside the date window, saves them to CSV and prints word and activity
/// statistics.
#[derive(Parser, Debug)]
#[command(name = "tg-channel-stats")]
#[command(version)]
#[command(about = "Scrape and analyze a public channel preview", long_about = None)]
struct Cli {
    /// Channel preview URL, e.g. https://t.me/s/AjaNews
    #[arg(value_name = "CHANNEL_URL", required_unless_present = "from_csv")]
    channel: Option<String>,

    /// First day to keep (YYYY-MM-DD); defaults to 365 days before today
    #[arg(long, value_name = "DATE")]
    start: Option<NaiveDate>,

    /// Last day to keep (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE")]
    end: Option<NaiveDate>,

    /// Maximum number of posts to collect
    #[arg(short = 'n', long, default_value_t = 1000)]
    max_posts: usize,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV output path (overrides the configuration)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Markdown report path (overrides the configuration)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Analyze a previously saved CSV instead of scraping
    #[arg(long, value_name = "PATH", conflicts_with_all = ["channel", "start", "end"])]
    from_csv: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        }
    })?;

    let summary_path = cli
        .summary
        .clone()
        .or_else(|| non_empty_path(&config.output.summary_path));

    if let Some(csv_path) = &cli.from_csv {
        let posts = load_posts_csv(csv_path)
            .with_context(|| format!("Failed to read {}", csv_path.display()))?;
        let label = csv_path.display().to_string();
        report_posts(&config, &posts, &label, summary_path.as_deref())?;
        return Ok(());
    }

    let channel = cli.channel.clone().context("a channel URL is required")?;
    handle_scrape(&cli, &config, channel, summary_path.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tg_channel_stats=info,warn"),
            1 => EnvFilter::new("tg_channel_stats=debug,info"),
            2 => EnvFilter::new("tg_channel_stats=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn non_empty_path(path: &str) -> Option<PathBuf> {
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Scrapes the channel, saves the posts and prints the report
async fn handle_scrape(
    cli: &Cli,
    config: &Config,
    channel: String,
    summary_path: Option<&Path>,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let end = cli.end.unwrap_or(today);
    let start = match cli.start {
        Some(start) => start,
        None => end
            .checked_sub_days(Days::new(365))
            .context("end date is out of range")?,
    };

    let request = ScrapeRequest::new(channel, start, end, cli.max_posts);

    let cancel = Arc::new(AtomicBool::new(false));
    let signal_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            signal_flag.store(true, Ordering::SeqCst);
        }
    });

    let mut observer = TracingObserver::with_cancel_flag(cancel);
    let run = scrape_channel(&config.scraper, &request, today, &mut observer).await?;

    if let StopReason::FetchFailed { url, failure } = &run.stop_reason {
        tracing::error!("Scrape stopped early, {} unreachable: {}", url, failure);
    }
    if run.skipped_blocks > 0 {
        tracing::warn!("Skipped {} malformed messages", run.skipped_blocks);
    }

    if run.posts.is_empty() {
        println!(
            "No posts found between {} and {}. Try a wider date range or check the channel URL.",
            request.start_date, request.end_date
        );
        return Ok(());
    }

    println!(
        "Collected {} posts between {} and {}.\n",
        run.posts.len(),
        request.start_date,
        request.end_date
    );

    let csv_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));
    // A failed save must not cost us the report.
    if let Err(e) = save_posts_csv(&csv_path, &run.posts) {
        tracing::error!("Failed to save posts to {}: {}", csv_path.display(), e);
    }

    report_posts(config, &run.posts, &request.source_url, summary_path)
}

/// Prints the analysis of `posts` and optionally exports it as Markdown
fn report_posts(
    config: &Config,
    posts: &[Post],
    label: &str,
    summary_path: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(report) = Analyzer::from_config(&config.analysis).analyze(posts) else {
        println!("No posts found in {}. Nothing to analyze.", label);
        return Ok(());
    };

    print_report(&report);

    if let Some(path) = summary_path {
        generate_markdown_report(&report, label, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("\n✓ Report exported to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_header_only_csv_reports_nothing_without_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"text,date\n").unwrap();
        file.flush().unwrap();

        let posts = load_posts_csv(file.path()).unwrap();
        assert!(posts.is_empty());

        let dir = TempDir::new().unwrap();
        let summary = dir.path().join("report.md");
        let result = report_posts(&Config::default(), &posts, "empty.csv", Some(&summary));

        assert!(result.is_ok());
        assert!(!summary.exists());
    }

    #[test]
    fn test_non_empty_posts_write_summary() {
        let posts = vec![Post::new(
            "markets rally",
            chrono::DateTime::parse_from_rfc3339("2024-01-01T10:00:00+00:00").unwrap(),
        )];
        let dir = TempDir::new().unwrap();
        let summary = dir.path().join("report.md");

        report_posts(&Config::default(), &posts, "posts.csv", Some(&summary)).unwrap();

        assert!(summary.exists());
    }
}
