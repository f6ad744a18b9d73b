//! Output formatters for rankings

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::ranker::RankedJob;
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Trait for rendering a ranked batch
pub trait OutputFormatter {
    fn format_ranking(&self, ranked: &[RankedJob<'_>]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console table with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Dispatches to the formatter for a given format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    rank: usize,
    score: f64,
    company: &'a str,
    title: &'a str,
    location: Option<&'a str>,
    url: &'a str,
    posted_at: Option<String>,
    overlap: &'a [String],
    detail: &'a crate::processing::scorer::ScoreBreakdown,
}

fn posted_label(ranked: &RankedJob<'_>) -> String {
    ranked
        .posting
        .posted_at
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Truncate on grapheme boundaries, appending an ellipsis when cut.
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }
    let mut truncated: String = graphemes[..max_graphemes].concat();
    if let Some(last_space) = truncated.rfind(' ') {
        truncated.truncate(last_space);
    }
    format!("{}...", truncated.trim_end())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_color(score: f64) -> Color {
        if score >= 10.0 {
            Color::Green
        } else if score >= 5.0 {
            Color::Yellow
        } else if score >= 0.0 {
            Color::White
        } else {
            Color::Red
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_ranking(&self, ranked: &[RankedJob<'_>]) -> Result<String> {
        let rule = "-".repeat(100);
        let mut output = String::new();

        let heading = format!("Top {} matches:", ranked.len());
        if self.use_colors {
            output.push_str(&format!("\n{}\n", heading.bold()));
        } else {
            output.push_str(&format!("\n{}\n", heading));
        }
        output.push_str(&rule);
        output.push('\n');

        for (i, entry) in ranked.iter().enumerate() {
            let posting = entry.posting;
            let score = format!("{:>6.2}", entry.score);
            output.push_str(&format!(
                "{:2}. [{}] {} - {} ({})\n",
                i + 1,
                self.colorize(&score, Self::score_color(entry.score)),
                posting.display_company(),
                truncate_text(&posting.title, 70),
                posting.location.as_deref().unwrap_or("N/A"),
            ));
            output.push_str(&format!(
                "     Posted: {}  Overlap: {}\n",
                posted_label(entry),
                entry.breakdown.overlap_joined()
            ));
            output.push_str(&format!("     URL: {}\n", posting.url));

            if self.detailed {
                let b = &entry.breakdown;
                output.push_str(&format!(
                    "     skills {:.2} | title {:+.1} | senior {:+.1} | remote {:+.1} | recency {:.2}\n",
                    b.skill_score, b.title_boost, b.senior_penalty, b.remote_boost, b.recency_bonus
                ));
                if let Some(contact) = &posting.contact_email {
                    output.push_str(&format!("     Contact: {}\n", contact));
                }
            }
        }

        output.push_str(&rule);
        output.push('\n');
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_ranking(&self, ranked: &[RankedJob<'_>]) -> Result<String> {
        let entries: Vec<JsonEntry<'_>> = ranked
            .iter()
            .enumerate()
            .map(|(i, entry)| JsonEntry {
                rank: i + 1,
                score: entry.score,
                company: entry.posting.display_company(),
                title: &entry.posting.title,
                location: entry.posting.location.as_deref(),
                url: &entry.posting.url,
                posted_at: entry.posting.posted_at.map(|ts| ts.to_rfc3339()),
                overlap: &entry.breakdown.overlap,
                detail: &entry.breakdown,
            })
            .collect();

        if self.pretty {
            Ok(serde_json::to_string_pretty(&entries)?)
        } else {
            Ok(serde_json::to_string(&entries)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_ranking(&self, ranked: &[RankedJob<'_>]) -> Result<String> {
        let mut output = String::from("# Ranked jobs\n\n");
        output.push_str("| # | Score | Company | Title | Location | Posted | Overlap |\n");
        output.push_str("|---|------:|---------|-------|----------|--------|---------|\n");

        for (i, entry) in ranked.iter().enumerate() {
            let posting = entry.posting;
            let title = if posting.url.is_empty() {
                Self::escape_cell(&posting.title)
            } else {
                format!("[{}]({})", Self::escape_cell(&posting.title), posting.url)
            };
            output.push_str(&format!(
                "| {} | {:.2} | {} | {} | {} | {} | {} |\n",
                i + 1,
                entry.score,
                Self::escape_cell(posting.display_company()),
                title,
                Self::escape_cell(posting.location.as_deref().unwrap_or("")),
                posted_label(entry),
                Self::escape_cell(&entry.breakdown.overlap_joined()),
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, ranked: &[RankedJob<'_>], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_ranking(ranked),
            OutputFormat::Json => self.json_formatter.format_ranking(ranked),
            OutputFormat::Markdown => self.markdown_formatter.format_ranking(ranked),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}
