//! Posting filters: junior-level detection and contact address extraction

use crate::error::{JobRankerError, Result};
use crate::ingest::html::HtmlCleaner;
use aho_corasick::AhoCorasick;
use regex::Regex;
use std::collections::BTreeSet;

const JUNIOR_POSTING_PATTERN: &str =
    r"(?i)\b(entry|junior|new\s*grad|intern(ship)?|0\s*[-\x{2013}]?\s*2\s*years|1[-\x{2013}]2\s*years)\b";
const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

/// Keeps postings that read as junior, intern or new-grad roles.
pub struct JuniorFilter {
    pattern: Regex,
    cleaner: HtmlCleaner,
}

impl JuniorFilter {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(JUNIOR_POSTING_PATTERN)
            .map_err(|e| JobRankerError::Ingest(format!("Failed to build junior filter: {}", e)))?;
        Ok(Self {
            pattern,
            cleaner: HtmlCleaner::new()?,
        })
    }

    /// Checks cleaned title and description together.
    pub fn is_junior(&self, title: &str, description_html: &str) -> bool {
        let text = format!(
            "{}\n{}",
            self.cleaner.clean(title),
            self.cleaner.clean(description_html)
        );
        self.pattern.is_match(&text)
    }
}

/// Pulls recruiter-style contact addresses out of posting text.
pub struct ContactExtractor {
    email: Regex,
    excluded: AhoCorasick,
}

impl ContactExtractor {
    pub fn new<S: AsRef<str>>(exclude_terms: &[S]) -> Result<Self> {
        let email = Regex::new(EMAIL_PATTERN)
            .map_err(|e| JobRankerError::Ingest(format!("Failed to build email pattern: {}", e)))?;
        let excluded = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(exclude_terms.iter().map(|t| t.as_ref()))
            .map_err(|e| JobRankerError::Ingest(format!("Failed to build exclusion matcher: {}", e)))?;
        Ok(Self { email, excluded })
    }

    fn collect_into(&self, text: &str, found: &mut BTreeSet<String>) {
        for m in self.email.find_iter(text) {
            let address = m.as_str().trim();
            if !self.excluded.is_match(address) {
                found.insert(address.to_string());
            }
        }
    }

    /// Addresses from the description and the record's top-level string
    /// fields, deduplicated, sorted and comma-joined.
    pub fn extract(&self, description: &str, raw: &serde_json::Value) -> Option<String> {
        let mut found = BTreeSet::new();
        self.collect_into(description, &mut found);

        if let Some(fields) = raw.as_object() {
            for value in fields.values() {
                if let Some(text) = value.as_str() {
                    self.collect_into(text, &mut found);
                }
            }
        }

        if found.is_empty() {
            None
        } else {
            Some(found.into_iter().collect::<Vec<_>>().join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_junior_titles() {
        let filter = JuniorFilter::new().unwrap();
        assert!(filter.is_junior("Software Engineer Intern", ""));
        assert!(filter.is_junior("Software Engineering Internship", ""));
        assert!(filter.is_junior("New Grad Backend Engineer", ""));
        assert!(filter.is_junior("Junior Developer", ""));
        assert!(!filter.is_junior("Senior Platform Engineer", "<p>8+ years</p>"));
    }

    #[test]
    fn test_junior_from_description() {
        let filter = JuniorFilter::new().unwrap();
        assert!(filter.is_junior("Software Engineer", "<p>We want 0&ndash;2 years of experience</p>"));
        assert!(filter.is_junior("Software Engineer", "1-2 years building web apps"));
        assert!(filter.is_junior("Software Engineer", "An entry level role"));
        assert!(!filter.is_junior("Software Engineer", "International travel required"));
    }

    #[test]
    fn test_contact_extraction_filters_and_sorts() {
        let extractor = ContactExtractor::new(&["support", "accommodat"]).unwrap();
        let description = "Questions? jobs@acme.io or Support@acme.io. Accommodations: accommodations@acme.io";
        let raw = json!({
            "title": "Intern",
            "contact": "hiring@acme.io",
            "nested": { "email": "ignored@acme.io" },
            "id": 42
        });

        let found = extractor.extract(description, &raw);
        assert_eq!(found.as_deref(), Some("hiring@acme.io,jobs@acme.io"));
    }

    #[test]
    fn test_contact_extraction_none() {
        let extractor = ContactExtractor::new::<&str>(&[]).unwrap();
        assert_eq!(extractor.extract("no addresses here", &serde_json::Value::Null), None);
    }
}
