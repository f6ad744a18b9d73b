//! HTTP client for ATS board APIs

use crate::config::IngestConfig;
use crate::error::{JobRankerError, Result};
use crate::store::models::AtsType;
use crate::ingest::{greenhouse, lever};
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Source of raw board responses.
pub trait BoardSource {
    fn fetch_board(&self, ats_type: AtsType, slug: &str) -> impl Future<Output = Result<Value>> + Send;
}

pub struct AtsClient {
    client: Client,
}

impl AtsClient {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JobRankerError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn board_url(ats_type: AtsType, slug: &str) -> String {
        match ats_type {
            AtsType::Greenhouse => greenhouse::board_url(slug),
            AtsType::Lever => lever::board_url(slug),
        }
    }
}

impl BoardSource for AtsClient {
    /// Fetch a board's raw JSON body.
    async fn fetch_board(&self, ats_type: AtsType, slug: &str) -> Result<Value> {
        let url = Self::board_url(ats_type, slug);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(JobRankerError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }
}
