//! CSV export of rankings and of the job store

use crate::error::Result;
use crate::processing::ranker::RankedJob;
use crate::store::models::JobPosting;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// One row of a ranking export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub score: f64,
    pub company: String,
    pub title: String,
    pub location: String,
    pub posted_at: String,
    pub overlap: String,
    /// JSON-encoded score breakdown
    pub detail: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRow {
    pub company: String,
    pub title: String,
    pub location: String,
    pub posted_at: String,
    pub url: String,
}

impl RankingRow {
    pub fn from_ranked(entry: &RankedJob<'_>) -> Result<Self> {
        let posting = entry.posting;
        Ok(Self {
            score: entry.score,
            company: posting.display_company().to_string(),
            title: posting.title.clone(),
            location: posting.location.clone().unwrap_or_default(),
            posted_at: posting.posted_at.map(|ts| ts.to_rfc3339()).unwrap_or_default(),
            overlap: entry.breakdown.overlap_joined(),
            detail: serde_json::to_string(&entry.breakdown)?,
            url: posting.url.clone(),
        })
    }
}

impl From<&JobPosting> for JobRow {
    fn from(job: &JobPosting) -> Self {
        Self {
            company: job.display_company().to_string(),
            title: job.title.clone(),
            location: job.location.clone().unwrap_or_default(),
            posted_at: job.posted_at.map(|ts| ts.to_rfc3339()).unwrap_or_default(),
            url: job.url.clone(),
        }
    }
}

/// Write a ranking in rank order, header first.
pub fn write_ranking_csv<W: Write>(writer: W, ranked: &[RankedJob<'_>]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for entry in ranked {
        wtr.serialize(RankingRow::from_ranked(entry)?)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_ranking_csv<R: Read>(reader: R) -> Result<Vec<RankingRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn save_ranking_csv(path: &Path, ranked: &[RankedJob<'_>]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_ranking_csv(file, ranked)
}

pub fn write_jobs_csv<'j, W, I>(writer: W, jobs: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'j JobPosting>,
{
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    let mut count = 0;
    for job in jobs {
        wtr.serialize(JobRow::from(job))?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::processing::{rank, ScoreBreakdown, Scorer, SkillCatalog};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_ranking_round_trip() {
        let catalog = SkillCatalog::builtin().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let scorer = Scorer::new(&catalog, ScoringConfig::default(), now).unwrap();
        let resume = catalog.detect("Python, SQL, Docker, Git, React");
        let jobs = vec![
            JobPosting::new("Senior Staff Engineer", "Go")
                .with_company("Initech")
                .with_url("https://initech.example/9"),
            JobPosting::new("Junior Engineer, \"Platform\"", "Python, SQL, Docker\nremote, team, fun")
                .with_company("Acme, Inc.")
                .with_location("Remote")
                .with_posted_at(now - Duration::days(3))
                .with_url("https://acme.example/1"),
            JobPosting::new("Frontend Intern", "React and Git")
                .with_source("lever")
                .with_url("https://globex.example/2"),
        ];
        let ranked = rank(&scorer, &resume, &jobs);

        let mut buffer = Vec::new();
        write_ranking_csv(&mut buffer, &ranked).unwrap();
        let rows = read_ranking_csv(buffer.as_slice()).unwrap();

        assert_eq!(rows.len(), ranked.len());
        assert!(rows.windows(2).all(|w| w[0].score >= w[1].score));
        for (row, entry) in rows.iter().zip(&ranked) {
            assert_eq!(row, &RankingRow::from_ranked(entry).unwrap());
            assert_eq!(row.score, entry.score);
            let detail: ScoreBreakdown = serde_json::from_str(&row.detail).unwrap();
            assert_eq!(detail, entry.breakdown);
        }
        assert_eq!(rows[0].company, "Acme, Inc.");
        assert_eq!(rows[0].overlap, "python, sql, docker");
        assert_eq!(rows[1].company, "lever");
    }

    #[test]
    fn test_jobs_csv_header_and_rows() {
        let jobs = vec![
            JobPosting::new("Intern", "").with_company("Acme").with_url("u1"),
            JobPosting::new("New Grad", "").with_company("Globex").with_location("NYC").with_url("u2"),
        ];
        let mut buffer = Vec::new();
        let count = write_jobs_csv(&mut buffer, &jobs).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(count, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "company,title,location,posted_at,url");
        assert_eq!(lines[2], "Globex,New Grad,NYC,,u2");
    }
}
