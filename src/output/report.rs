//! Terminal and Markdown rendering of an analysis report

use crate::analysis::AnalysisReport;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const BAR_WIDTH: usize = 40;

/// Prints a report to stdout in a formatted manner
pub fn print_report(report: &AnalysisReport) {
    println!("=== Channel Statistics ===\n");

    println!("Overview:");
    println!("  Total posts: {}", report.total_posts);
    println!(
        "  Date range: {} to {}",
        report.date_range.0, report.date_range.1
    );
    println!(
        "  Average post length: {:.2} characters",
        report.avg_post_length
    );
    println!();

    if !report.top_words.is_empty() {
        println!("Most Common Words:");
        let widest = report
            .top_words
            .iter()
            .map(|(w, _)| w.chars().count())
            .max()
            .unwrap_or(0);
        let highest = report.top_words[0].1;
        for (word, count) in &report.top_words {
            let pad = widest - word.chars().count();
            println!(
                "  {}{} {:>5} {}",
                word,
                " ".repeat(pad),
                count,
                bar(*count, highest)
            );
        }
        println!();
    }

    println!("Posts per Day:");
    let highest = report
        .posts_per_day
        .iter()
        .map(|(_, c)| *c)
        .max()
        .unwrap_or(0);
    for (date, count) in &report.posts_per_day {
        println!("  {} {:>5} {}", date, count, bar(*count, highest));
    }
}

fn bar(count: usize, highest: usize) -> String {
    if highest == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(highest))
}

/// Writes a Markdown report to `output_path`
///
/// # Arguments
///
/// * `report` - The analysis report
/// * `channel` - Channel URL shown in the title section
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_report(
    report: &AnalysisReport,
    channel: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(report, channel);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote report to {}", output_path.display());
    Ok(())
}

/// Formats a report as markdown
pub fn format_markdown_report(report: &AnalysisReport, channel: &str) -> String {
    let mut md = String::new();

    md.push_str("# Channel Statistics\n\n");
    md.push_str(&format!("- **Channel**: {}\n", channel));
    md.push_str(&format!("- **Total Posts**: {}\n", report.total_posts));
    md.push_str(&format!(
        "- **Date Range**: {} to {}\n",
        report.date_range.0.to_rfc3339(),
        report.date_range.1.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Average Post Length**: {:.2} characters\n\n",
        report.avg_post_length
    ));

    if !report.top_words.is_empty() {
        md.push_str(&format!(
            "## Top {} Words\n\n",
            report.top_words.len()
        ));
        md.push_str("| Word | Count |\n");
        md.push_str("|------|-------|\n");
        for (word, count) in &report.top_words {
            md.push_str(&format!("| {} | {} |\n", word, count));
        }
        md.push('\n');
    }

    md.push_str("## Posts per Day\n\n");
    md.push_str("| Date | Posts |\n");
    md.push_str("|------|-------|\n");
    for (date, count) in &report.posts_per_day {
        md.push_str(&format!("| {} | {} |\n", date, count));
    }

    md
}
