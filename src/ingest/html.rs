//! Flatten ATS HTML descriptions to plain text

use crate::error::{JobRankerError, Result};
use html_escape::decode_html_entities;
use regex::Regex;

/// Turns board HTML into single-line plain text.
pub struct HtmlCleaner {
    block_tag: Regex,
    any_tag: Regex,
    dashes: Regex,
    hyphen_run: Regex,
    whitespace: Regex,
}

fn build(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| JobRankerError::Ingest(format!("Failed to build HTML pattern '{}': {}", pattern, e)))
}

impl HtmlCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            block_tag: build(r"(?i)</?(div|p|li|h[1-6]|br|ul|ol)\b[^>]*>")?,
            any_tag: build(r"<[^>]+>")?,
            dashes: build(r"[\x{2014}\x{2013}\x{2212}]")?,
            hyphen_run: build(r"-{2,}")?,
            whitespace: build(r"\s+")?,
        })
    }

    /// Unescape entities until stable, drop tags, normalise dashes and whitespace.
    ///
    /// Greenhouse double-escapes its `content` field, hence the fixed-point loop.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut current = text.to_string();
        loop {
            let next = decode_html_entities(&current).into_owned();
            if next == current {
                break;
            }
            current = next;
        }

        let text = self.block_tag.replace_all(&current, " ");
        let text = self.any_tag.replace_all(&text, " ");
        let text = self.dashes.replace_all(&text, "-");
        let text = self.hyphen_run.replace_all(&text, "-");
        let text = self.whitespace.replace_all(&text, " ");

        text.trim().to_string()
    }
}
