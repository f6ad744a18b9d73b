//! Stored entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicant tracking systems we know how to pull postings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtsType {
    Greenhouse,
    Lever,
}

impl AtsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtsType::Greenhouse => "greenhouse",
            AtsType::Lever => "lever",
        }
    }
}

impl fmt::Display for AtsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub ats_type: Option<AtsType>,
    #[serde(default)]
    pub ats_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A job posting as held by the store.
///
/// Every field except `url` may be blank or absent; scoring treats gaps as
/// neutral rather than rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    /// Where the posting came from, e.g. "greenhouse"
    #[serde(default)]
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            company: String::new(),
            title: title.into(),
            description: description.into(),
            location: None,
            posted_at: None,
            source: String::new(),
            url: String::new(),
            contact_email: None,
            applied_at: None,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = Some(posted_at);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Company name, falling back to the source label.
    pub fn display_company(&self) -> &str {
        if self.company.trim().is_empty() {
            &self.source
        } else {
            &self.company
        }
    }

    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// One submitted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub applied_at: DateTime<Utc>,
    pub job_url: String,
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub response_received: bool,
    #[serde(default)]
    pub note: Option<String>,
}
