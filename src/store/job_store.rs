//! JSON-file backed job store

use crate::error::{JobRankerError, Result};
use crate::store::models::{Application, Company, JobPosting};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    companies: Vec<Company>,
    #[serde(default)]
    jobs: Vec<JobPosting>,
    #[serde(default)]
    applications: Vec<Application>,
}

pub struct JobStore {
    path: PathBuf,
    data: StoreData,
}

impl JobStore {
    /// Open the store at `path`; a missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                StoreData::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            debug!("No job store at {}, starting empty", path.display());
            StoreData::default()
        };

        Ok(Self { path, data })
    }

    /// Persist via a sibling temp file and rename.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        info!(
            "Saved {} jobs, {} companies to {}",
            self.data.jobs.len(),
            self.data.companies.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert the company unless one with the same name exists.
    pub fn upsert_company(&mut self, company: Company) -> &Company {
        let index = match self.data.companies.iter().position(|c| c.name == company.name) {
            Some(index) => index,
            None => {
                self.data.companies.push(company);
                self.data.companies.len() - 1
            }
        };
        &self.data.companies[index]
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.data.jobs.iter().any(|j| j.url == url)
    }

    /// Add a posting; returns false if its URL is already stored.
    pub fn insert_job(&mut self, job: JobPosting) -> bool {
        if self.contains_url(&job.url) {
            return false;
        }
        self.data.jobs.push(job);
        true
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.data.jobs
    }

    pub fn companies(&self) -> &[Company] {
        &self.data.companies
    }

    pub fn applications(&self) -> &[Application] {
        &self.data.applications
    }

    /// Jobs ordered newest first, undated postings last.
    pub fn jobs_by_recency(&self) -> Vec<&JobPosting> {
        let mut jobs: Vec<&JobPosting> = self.data.jobs.iter().collect();
        jobs.sort_by(|a, b| match (a.posted_at, b.posted_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        jobs
    }

    /// Record an application against the job at `url`.
    pub fn mark_applied(&mut self, url: &str, note: Option<String>, at: DateTime<Utc>) -> Result<&JobPosting> {
        let index = self
            .data
            .jobs
            .iter()
            .position(|j| j.url == url)
            .ok_or_else(|| JobRankerError::InvalidInput(format!("No stored job with URL: {}", url)))?;

        let job = &mut self.data.jobs[index];
        job.applied_at = Some(at);
        self.data.applications.push(Application {
            applied_at: at,
            job_url: job.url.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            response_received: false,
            note,
        });

        Ok(&self.data.jobs[index])
    }
}
