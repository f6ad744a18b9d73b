//! Relevance scoring of one job posting against one resume

use crate::config::ScoringConfig;
use crate::error::{JobRankerError, Result};
use crate::processing::skill_catalog::{SkillCatalog, SkillWeights};
use crate::store::models::JobPosting;
use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

const JUNIOR_TITLE_PATTERN: &str = r"\b(intern|new grad|junior|entry|graduate)\b";
const SENIOR_TITLE_PATTERN: &str = r"\b(senior|sr\.?|staff|principal|lead)\b";
const REMOTE_PATTERN: &str = r"\bremote\b";

/// Itemised explanation of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Shared skills, highest catalog weight first
    pub overlap: Vec<String>,
    pub skill_score: f64,
    pub title_boost: f64,
    pub senior_penalty: f64,
    pub remote_boost: f64,
    pub recency_bonus: f64,
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores postings against resume skills.
///
/// The reference time is fixed at construction, so scoring the same inputs
/// twice gives identical results.
pub struct Scorer<'a> {
    catalog: &'a SkillCatalog,
    config: ScoringConfig,
    now: DateTime<Utc>,
    junior_title: Regex,
    senior_title: Regex,
    remote: Regex,
}

fn case_insensitive(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| JobRankerError::Configuration(format!("invalid scoring pattern '{}': {}", pattern, e)))
}

impl ScoreBreakdown {
    pub fn overlap_joined(&self) -> String {
        self.overlap.join(", ")
    }
}

impl<'a> Scorer<'a> {
    pub fn new(catalog: &'a SkillCatalog, config: ScoringConfig, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            catalog,
            config,
            now,
            junior_title: case_insensitive(JUNIOR_TITLE_PATTERN)?,
            senior_title: case_insensitive(SENIOR_TITLE_PATTERN)?,
            remote: case_insensitive(REMOTE_PATTERN)?,
        })
    }

    /// Score one posting. Never fails: absent fields contribute nothing.
    pub fn score(&self, resume_skills: &SkillWeights, job: &JobPosting) -> ScoreResult {
        let job_text = format!("{}\n{}", job.title, job.description);
        let job_skills = self.catalog.detect(&job_text);

        // Catalog order keeps the float summation order fixed.
        let mut overlap: Vec<(&str, f64)> = self
            .catalog
            .iter()
            .filter(|(name, _)| resume_skills.contains_key(*name) && job_skills.contains_key(*name))
            .map(|(name, def)| (name, def.weight()))
            .collect();

        let skill_score: f64 = overlap.iter().map(|(_, weight)| weight).sum();
        overlap.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let title_boost = if self.junior_title.is_match(&job.title) {
            self.config.junior_title_boost
        } else {
            0.0
        };
        let senior_penalty = if self.senior_title.is_match(&job.title) {
            self.config.senior_title_penalty
        } else {
            0.0
        };

        let location = job.location.as_deref().unwrap_or("");
        let remote_boost = if self.remote.is_match(location) || self.remote.is_match(&job.description) {
            self.config.remote_boost
        } else {
            0.0
        };

        let recency_bonus = self.recency_bonus(job.posted_at);
        let total = skill_score + title_boost + senior_penalty + remote_boost + recency_bonus;

        ScoreResult {
            total,
            breakdown: ScoreBreakdown {
                overlap: overlap.into_iter().map(|(name, _)| name.to_string()).collect(),
                skill_score,
                title_boost,
                senior_penalty,
                remote_boost,
                recency_bonus,
                posted_at: job.posted_at,
            },
        }
    }

    /// Linear decay from the maximum on the posting day to zero at the horizon.
    pub fn recency_bonus(&self, posted_at: Option<DateTime<Utc>>) -> f64 {
        let Some(posted_at) = posted_at else {
            return 0.0;
        };
        let horizon = self.config.recency_horizon_days as f64;
        if horizon <= 0.0 {
            return 0.0;
        }

        let days = (self.now - posted_at).num_days().max(0) as f64;
        let fraction = ((horizon - days) / horizon).max(0.0);
        fraction * self.config.recency_max_bonus
    }
}
