//! Greenhouse job board API

use crate::error::{JobRankerError, Result};
use crate::ingest::FetchedPosting;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct GreenhouseJob {
    title: String,
    #[serde(default)]
    content: Option<String>,
    absolute_url: String,
    #[serde(default)]
    location: Option<GreenhouseLocation>,
    #[serde(default)]
    updated_at: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GreenhouseLocation {
    #[serde(default)]
    name: Option<String>,
}

pub fn board_url(slug: &str) -> String {
    format!("https://boards-api.greenhouse.io/v1/boards/{}/jobs?content=true", slug)
}

/// RFC 3339 string to UTC; anything else is logged and dropped.
fn parse_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Null => None,
        Value::String(text) => match DateTime::parse_from_rfc3339(text) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(e) => {
                warn!("Unparseable Greenhouse timestamp '{}': {}", text, e);
                None
            }
        },
        other => {
            warn!("Unparseable Greenhouse timestamp {}", other);
            None
        }
    }
}

/// Postings from a `{"jobs": [...]}` board response. Malformed entries are skipped.
pub fn parse_postings(body: &Value) -> Result<Vec<FetchedPosting>> {
    let jobs = body
        .get("jobs")
        .and_then(Value::as_array)
        .ok_or_else(|| JobRankerError::Ingest("Greenhouse response has no jobs array".to_string()))?;

    let mut postings = Vec::with_capacity(jobs.len());
    for raw in jobs {
        let job: GreenhouseJob = match serde_json::from_value(raw.clone()) {
            Ok(job) => job,
            Err(e) => {
                warn!("Skipping malformed Greenhouse posting: {}", e);
                continue;
            }
        };

        postings.push(FetchedPosting {
            title: job.title,
            description_html: job.content.unwrap_or_default(),
            url: job.absolute_url,
            location: job.location.and_then(|l| l.name),
            posted_at: job.updated_at.as_ref().and_then(parse_timestamp),
            raw: raw.clone(),
        });
    }
    Ok(postings)
}
