//! Batch ranking of postings

use crate::processing::scorer::{ScoreBreakdown, Scorer};
use crate::processing::skill_catalog::SkillWeights;
use crate::store::models::JobPosting;
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct RankedJob<'j> {
    pub score: f64,
    pub posting: &'j JobPosting,
    pub breakdown: ScoreBreakdown,
}

/// Score every posting and order by descending score.
///
/// Equal scores keep their input order.
pub fn rank<'j, I>(scorer: &Scorer<'_>, resume_skills: &SkillWeights, postings: I) -> Vec<RankedJob<'j>>
where
    I: IntoIterator<Item = &'j JobPosting>,
{
    let mut ranked: Vec<RankedJob<'j>> = postings
        .into_iter()
        .map(|posting| {
            let result = scorer.score(resume_skills, posting);
            RankedJob {
                score: result.total,
                posting,
                breakdown: result.breakdown,
            }
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    debug!("Ranked {} postings", ranked.len());
    ranked
}

/// First `n` entries of a ranking.
pub fn top_n<'r, 'j>(ranked: &'r [RankedJob<'j>], n: usize) -> &'r [RankedJob<'j>] {
    &ranked[..n.min(ranked.len())]
}
