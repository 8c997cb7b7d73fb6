//! CSV persistence of scraped posts
//!
//! Layout: a `text,date` header, then one row per post in the order given.
//! Dates are RFC 3339 timestamps. Fields are quoted only when they contain
//! a comma, a quote or a line break.

use crate::output::{OutputError, OutputResult};
use crate::post::{parse_timestamp, Post};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::mem::take;
use std::path::Path;

const HEADER: [&str; 2] = ["text", "date"];
const SEP: char = ',';

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_field<W: Write>(w: &mut W, field: &str) -> io::Result<()> {
    if needs_quotes(field) {
        write!(w, "\"{}\"", field.replace('"', "\"\""))
    } else {
        write!(w, "{}", field)
    }
}

fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEP)?;
        }
        write_field(w, cell)?;
    }
    writeln!(w)
}

/// Writes the header and one row per post to any writer
pub fn write_posts<W: Write>(mut w: W, posts: &[Post]) -> io::Result<()> {
    write_row(&mut w, &HEADER)?;
    for post in posts {
        let date = post.timestamp.to_rfc3339();
        write_row(&mut w, &[post.text.as_str(), date.as_str()])?;
    }
    w.flush()
}

/// Saves posts to `path`, replacing any existing file
///
/// A failure leaves the caller's posts untouched; only the file is affected.
pub fn save_posts_csv(path: &Path, posts: &[Post]) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_posts(BufWriter::new(file), posts)?;

    tracing::info!("Saved {} posts to {}", posts.len(), path.display());
    Ok(())
}

/* ---------------- Reading ---------------- */

/// Splits CSV text into rows of fields (quotes + CRLF tolerant)
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == SEP && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if row.len() == 1 && row[0].is_empty() {
                    row.clear();
                } else {
                    rows.push(take(&mut row));
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Reads posts back from CSV produced by `write_posts`
pub fn read_posts<R: Read>(mut reader: R) -> OutputResult<Vec<Post>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut rows = parse_rows(text).into_iter();

    let header = rows
        .next()
        .ok_or_else(|| OutputError::Format("missing header row".to_string()))?;
    if header != HEADER {
        return Err(OutputError::Format(format!(
            "expected header 'text,date', got '{}'",
            header.join(",")
        )));
    }

    rows.enumerate()
        .map(|(i, row)| -> OutputResult<Post> {
            // Row 1 is the header.
            let line = i + 2;
            let [text, date]: [String; 2] = row.try_into().map_err(|row: Vec<String>| {
                OutputError::Format(format!("row {} has {} fields, expected 2", line, row.len()))
            })?;
            let timestamp = parse_timestamp(&date)
                .ok_or(OutputError::InvalidTimestamp { line, value: date })?;
            Ok(Post::new(text, timestamp))
        })
        .collect()
}

/// Loads posts from a CSV file written by `save_posts_csv`
pub fn load_posts_csv(path: &Path) -> OutputResult<Vec<Post>> {
    let posts = read_posts(File::open(path)?)?;
    tracing::info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}
