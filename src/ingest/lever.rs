//! Lever postings API

use crate::error::{JobRankerError, Result};
use crate::ingest::FetchedPosting;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeverPosting {
    #[serde(default)]
    text: String,
    #[serde(default)]
    description: Option<String>,
    hosted_url: String,
    #[serde(default)]
    categories: Option<LeverCategories>,
    #[serde(default)]
    created_at: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct LeverCategories {
    #[serde(default)]
    location: Option<String>,
}

pub fn board_url(slug: &str) -> String {
    format!("https://api.lever.co/v0/postings/{}?mode=json", slug)
}

/// Lever answers with either a bare list or an object wrapping one.
fn posting_list(body: &Value) -> Option<&Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(fields) => fields
            .get("postings")
            .or_else(|| fields.get("jobs"))
            .and_then(Value::as_array),
        _ => None,
    }
}

/// Epoch milliseconds, as a number or numeric string; anything else is logged and dropped.
fn parse_created_at(raw: &Value) -> Option<DateTime<Utc>> {
    let millis = match raw {
        Value::Null => return None,
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    let ts = millis.and_then(DateTime::<Utc>::from_timestamp_millis);
    if ts.is_none() {
        warn!("Unparseable Lever createdAt: {}", raw);
    }
    ts
}

pub fn parse_postings(body: &Value) -> Result<Vec<FetchedPosting>> {
    let items = posting_list(body)
        .ok_or_else(|| JobRankerError::Ingest("Unexpected Lever response format".to_string()))?;

    let mut postings = Vec::with_capacity(items.len());
    for raw in items {
        let posting: LeverPosting = match serde_json::from_value(raw.clone()) {
            Ok(posting) => posting,
            Err(e) => {
                warn!("Skipping malformed Lever posting: {}", e);
                continue;
            }
        };

        postings.push(FetchedPosting {
            title: posting.text,
            description_html: posting.description.unwrap_or_default(),
            url: posting.hosted_url,
            location: posting.categories.and_then(|c| c.location),
            posted_at: posting.created_at.as_ref().and_then(parse_created_at),
            raw: raw.clone(),
        });
    }
    Ok(postings)
}
