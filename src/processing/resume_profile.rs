//! Resume profiles: the skills a resume mentions, and their on-disk record

use crate::error::{JobRankerError, Result};
use crate::input::manager::InputManager;
use crate::processing::skill_catalog::{SkillCatalog, SkillWeights};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strsim::jaro_winkler;

/// Resume text plus the catalog skills detected in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeProfile {
    pub text: String,
    pub skills: SkillWeights,
}

/// Compact record of a profile, reused across ranking runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub skills: SkillWeights,
    pub char_count: usize,
}

impl ResumeProfile {
    /// Run catalog detection once over the resume text.
    ///
    /// Text with nothing but whitespace is a read failure, not a resume
    /// without skills.
    pub fn build(text: &str, catalog: &SkillCatalog) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(JobRankerError::DocumentRead(
                "resume yielded no extractable text".to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            skills: catalog.detect(text),
        })
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Skills sorted by descending weight, ties alphabetical.
    pub fn ranked_skills(&self) -> Vec<(&str, f64)> {
        let mut skills: Vec<(&str, f64)> = self.skills.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        skills.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        skills
    }

    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            skills: self.skills.clone(),
            char_count: self.char_count(),
        }
    }
}

/// Builds profiles from resume files on disk.
pub struct ProfileBuilder<'a> {
    catalog: &'a SkillCatalog,
    input: InputManager,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(catalog: &'a SkillCatalog) -> Self {
        Self {
            catalog,
            input: InputManager::new(),
        }
    }

    pub async fn from_path(&mut self, path: &Path) -> Result<ResumeProfile> {
        let text = self.input.extract_text(path).await?;
        let profile = ResumeProfile::build(&text, self.catalog).map_err(|_| {
            JobRankerError::DocumentRead(format!("no extractable text in {}", path.display()))
        })?;
        info!(
            "Extracted {} skills from {} chars of {}",
            profile.skills.len(),
            profile.char_count(),
            path.display()
        );
        Ok(profile)
    }
}

impl ProfileRecord {
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobRankerError::DocumentRead(format!("cannot read profile {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Skills usable against `catalog`; unknown names are dropped with a warning.
    pub fn resume_skills(&self, catalog: &SkillCatalog) -> SkillWeights {
        let mut skills = SkillWeights::new();
        for (name, weight) in &self.skills {
            match catalog.weight(name) {
                Some(catalog_weight) => {
                    skills.insert(name.clone(), catalog_weight);
                }
                None => match closest_skill(name, catalog) {
                    Some(suggestion) => warn!(
                        "Profile skill '{}' (weight {}) is not in the catalog; did you mean '{}'?",
                        name, weight, suggestion
                    ),
                    None => warn!("Profile skill '{}' is not in the catalog, ignoring", name),
                },
            }
        }
        skills
    }
}

fn closest_skill<'c>(name: &str, catalog: &'c SkillCatalog) -> Option<&'c str> {
    let needle = name.to_lowercase();
    catalog
        .names()
        .map(|candidate| (candidate, jaro_winkler(&needle, candidate)))
        .filter(|(_, similarity)| *similarity >= 0.85)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(candidate, _)| candidate)
}
