//! Output module for scraped posts and analysis reports
//!
//! This module handles:
//! - Persisting posts to CSV and reading them back
//! - Printing an analysis report to the terminal
//! - Exporting an analysis report as Markdown

mod csv;
mod report;

pub use self::csv::{load_posts_csv, read_posts, save_posts_csv, write_posts};
pub use report::{format_markdown_report, generate_markdown_report, print_report};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Format(String),

    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: usize, value: String },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
