//! Pull junior postings from company ATS boards into the job store

pub mod client;
pub mod filters;
pub mod greenhouse;
pub mod html;
pub mod lever;

use crate::config::{CompanyConfig, IngestConfig};
use crate::error::Result;
use crate::store::models::{AtsType, Company, JobPosting};
use crate::store::JobStore;
use chrono::{DateTime, Utc};
use client::BoardSource;
use filters::{ContactExtractor, JuniorFilter};
use html::HtmlCleaner;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde_json::Value;

/// A posting as returned by a board, before filtering and cleaning.
#[derive(Debug, Clone)]
pub struct FetchedPosting {
    pub title: String,
    pub description_html: String,
    pub url: String,
    pub location: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub raw: Value,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IngestSummary {
    pub companies: usize,
    pub fetched: usize,
    pub junior: usize,
    pub inserted: usize,
    pub failed_companies: Vec<String>,
}

/// Turns board responses into stored postings.
pub struct Ingestor {
    junior: JuniorFilter,
    contacts: ContactExtractor,
    cleaner: HtmlCleaner,
}

impl Ingestor {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        Ok(Self {
            junior: JuniorFilter::new()?,
            contacts: ContactExtractor::new(&config.contact_exclude_terms)?,
            cleaner: HtmlCleaner::new()?,
        })
    }

    pub fn parse_board(ats_type: AtsType, body: &Value) -> Result<Vec<FetchedPosting>> {
        match ats_type {
            AtsType::Greenhouse => greenhouse::parse_postings(body),
            AtsType::Lever => lever::parse_postings(body),
        }
    }

    /// Filter, clean and store one company's postings. Returns (junior, inserted).
    pub fn absorb(
        &self,
        store: &mut JobStore,
        company: &CompanyConfig,
        postings: Vec<FetchedPosting>,
    ) -> (usize, usize) {
        let mut junior = 0;
        let mut inserted = 0;

        for posting in postings {
            if !self.junior.is_junior(&posting.title, &posting.description_html) {
                continue;
            }
            junior += 1;

            if store.contains_url(&posting.url) {
                debug!("Already stored: {}", posting.url);
                continue;
            }

            let contact_email = self.contacts.extract(&posting.description_html, &posting.raw);
            let job = JobPosting {
                company: company.name.clone(),
                title: self.cleaner.clean(&posting.title),
                description: self.cleaner.clean(&posting.description_html),
                location: posting.location,
                posted_at: posting.posted_at,
                source: company.ats_type.as_str().to_string(),
                url: posting.url,
                contact_email,
                applied_at: None,
            };
            info!("Found junior job: {} ({})", job.title, company.name);
            if store.insert_job(job) {
                inserted += 1;
            }
        }

        (junior, inserted)
    }

    /// Fetch every configured company; one failing board never stops the run.
    ///
    /// The store is saved after each company, so an interrupted run keeps
    /// the boards already fetched. Only a failed save aborts.
    pub async fn run<S: BoardSource>(
        &self,
        source: &S,
        store: &mut JobStore,
        companies: &[CompanyConfig],
        now: DateTime<Utc>,
    ) -> Result<IngestSummary> {
        let mut summary = IngestSummary {
            companies: companies.len(),
            ..Default::default()
        };

        let progress = ProgressBar::new(companies.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for company in companies {
            progress.set_message(company.name.clone());
            store.upsert_company(Company {
                name: company.name.clone(),
                website: company.website.clone(),
                ats_type: Some(company.ats_type),
                ats_slug: Some(company.ats_slug.clone()),
                created_at: now,
            });

            let postings = source
                .fetch_board(company.ats_type, &company.ats_slug)
                .await
                .and_then(|body| Self::parse_board(company.ats_type, &body));

            match postings {
                Ok(postings) => {
                    summary.fetched += postings.len();
                    let (junior, inserted) = self.absorb(store, company, postings);
                    summary.junior += junior;
                    summary.inserted += inserted;
                }
                Err(e) => {
                    warn!("Error fetching jobs from {}: {}", company.name, e);
                    summary.failed_companies.push(company.name.clone());
                }
            }
            store.save()?;
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobRankerError;
    use chrono::TimeZone;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Serves canned boards and records how many jobs were on disk at each fetch.
    struct CannedBoards {
        store_path: PathBuf,
        jobs_on_disk: Mutex<Vec<usize>>,
    }

    impl BoardSource for CannedBoards {
        async fn fetch_board(&self, _ats_type: AtsType, slug: &str) -> Result<Value> {
            let on_disk = JobStore::open(&self.store_path)?.jobs().len();
            self.jobs_on_disk.lock().unwrap().push(on_disk);
            match slug {
                "acme" | "globex" => Ok(json!({
                    "jobs": [{
                        "title": "Junior Engineer",
                        "content": "Python",
                        "absolute_url": format!("https://boards.greenhouse.io/{}/jobs/1", slug)
                    }]
                })),
                _ => Err(JobRankerError::Network(format!("HTTP 404 for {}", slug))),
            }
        }
    }

    fn company(name: &str, ats_type: AtsType, slug: &str) -> CompanyConfig {
        CompanyConfig {
            name: name.to_string(),
            website: None,
            ats_type,
            ats_slug: slug.to_string(),
        }
    }

    fn acme() -> CompanyConfig {
        CompanyConfig {
            name: "Acme".to_string(),
            website: None,
            ats_type: AtsType::Greenhouse,
            ats_slug: "acme".to_string(),
        }
    }

    #[test]
    fn test_absorb_filters_and_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JobStore::open(dir.path().join("jobs.json")).unwrap();
        let ingestor = Ingestor::new(&IngestConfig::default()).unwrap();

        let body = json!({
            "jobs": [
                {
                    "title": "Software Engineer, New Grad",
                    "content": "&lt;p&gt;Python &amp;amp; SQL. Reach us at grad-hiring@acme.io&lt;/p&gt;",
                    "absolute_url": "https://boards.greenhouse.io/acme/jobs/1",
                    "location": { "name": "Remote" }
                },
                {
                    "title": "Staff Engineer",
                    "content": "10+ years",
                    "absolute_url": "https://boards.greenhouse.io/acme/jobs/2"
                }
            ]
        });

        let postings = Ingestor::parse_board(AtsType::Greenhouse, &body).unwrap();
        let (junior, inserted) = ingestor.absorb(&mut store, &acme(), postings.clone());
        assert_eq!((junior, inserted), (1, 1));

        let job = &store.jobs()[0];
        assert_eq!(job.company, "Acme");
        assert_eq!(job.source, "greenhouse");
        assert_eq!(job.description, "Python & SQL. Reach us at grad-hiring@acme.io");
        assert_eq!(job.contact_email.as_deref(), Some("grad-hiring@acme.io"));

        let (junior, inserted) = ingestor.absorb(&mut store, &acme(), postings);
        assert_eq!((junior, inserted), (1, 0));
        assert_eq!(store.jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_run_saves_after_each_company() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("jobs.json");
        let source = CannedBoards {
            store_path: store_path.clone(),
            jobs_on_disk: Mutex::new(Vec::new()),
        };
        let companies = vec![
            company("Acme", AtsType::Greenhouse, "acme"),
            company("Broken", AtsType::Lever, "broken"),
            company("Globex", AtsType::Greenhouse, "globex"),
        ];
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let ingestor = Ingestor::new(&IngestConfig::default()).unwrap();
        let mut store = JobStore::open(&store_path).unwrap();
        let summary = ingestor.run(&source, &mut store, &companies, now).await.unwrap();

        assert_eq!(*source.jobs_on_disk.lock().unwrap(), vec![0, 1, 1]);
        assert_eq!(summary.companies, 3);
        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.failed_companies, vec!["Broken".to_string()]);

        let reopened = JobStore::open(&store_path).unwrap();
        assert_eq!(reopened.jobs().len(), 2);
        assert_eq!(reopened.companies().len(), 3);
    }
}
