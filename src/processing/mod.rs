//! Skill detection, resume profiles, scoring and ranking

pub mod skill_catalog;
pub mod resume_profile;
pub mod scorer;
pub mod ranker;

pub use ranker::{rank, RankedJob};
pub use resume_profile::{ProfileBuilder, ProfileRecord, ResumeProfile};
pub use scorer::{ScoreBreakdown, ScoreResult, Scorer};
pub use skill_catalog::{SkillCatalog, SkillDefinition, SkillEntry, SkillWeights};
