//! Configuration management for the job ranker

use crate::error::{JobRankerError, Result};
use crate::store::models::AtsType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub ingest: IngestConfig,
    pub output: OutputConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<CompanyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub jobs_path: PathBuf,
    pub profile_path: PathBuf,
    /// Optional TOML file replacing the builtin skill catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

/// Constants of the relevance heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub junior_title_boost: f64,
    pub senior_title_penalty: f64,
    pub remote_boost: f64,
    pub recency_max_bonus: f64,
    pub recency_horizon_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub default_top: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Contact addresses containing any of these terms are ignored
    pub contact_exclude_terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    pub ats_type: AtsType,
    pub ats_slug: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            junior_title_boost: 3.0,
            senior_title_penalty: -4.0,
            remote_boost: 1.5,
            recency_max_bonus: 3.0,
            recency_horizon_days: 90,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("job-ranker/{}", env!("CARGO_PKG_VERSION")),
            contact_exclude_terms: [
                "accommodat",
                "access",
                "compliance",
                "dpo",
                "security",
                "humans",
                "people-team",
                "support",
                "benefit",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-ranker");

        Self {
            storage: StorageConfig {
                jobs_path: data_dir.join("jobs.json"),
                profile_path: data_dir.join("resume_profile.json"),
                catalog_path: None,
            },
            scoring: ScoringConfig::default(),
            ranking: RankingConfig { default_top: 20 },
            ingest: IngestConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
            companies: Vec::new(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = Self::from_toml_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| JobRankerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        if scoring.recency_horizon_days == 0 {
            return Err(JobRankerError::Configuration(
                "scoring.recency_horizon_days must be at least 1".to_string(),
            ));
        }
        let non_negative = [
            ("junior_title_boost", scoring.junior_title_boost),
            ("remote_boost", scoring.remote_boost),
            ("recency_max_bonus", scoring.recency_max_bonus),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(JobRankerError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !scoring.senior_title_penalty.is_finite() || scoring.senior_title_penalty > 0.0 {
            return Err(JobRankerError::Configuration(format!(
                "scoring.senior_title_penalty must be zero or negative, got {}",
                scoring.senior_title_penalty
            )));
        }
        if self.ingest.timeout_secs == 0 {
            return Err(JobRankerError::Configuration(
                "ingest.timeout_secs must be at least 1".to_string(),
            ));
        }
        for company in &self.companies {
            if company.name.trim().is_empty() || company.ats_slug.trim().is_empty() {
                return Err(JobRankerError::Configuration(format!(
                    "company entries need a name and an ats_slug: {:?}",
                    company
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();

        assert_eq!(parsed.scoring, ScoringConfig::default());
        assert_eq!(parsed.ranking.default_top, 20);
        assert_eq!(parsed.output.format, OutputFormat::Console);
        assert!(parsed.companies.is_empty());
    }

    #[test]
    fn test_companies_parse() {
        let mut text = toml::to_string_pretty(&Config::default()).unwrap();
        text.push_str(
            r#"
[[companies]]
name = "Acme"
website = "https://acme.example"
ats_type = "greenhouse"
ats_slug = "acme"

[[companies]]
name = "Globex"
ats_type = "lever"
ats_slug = "globex"
"#,
        );

        let config = Config::from_toml_str(&text).unwrap();
        assert_eq!(config.companies.len(), 2);
        assert_eq!(config.companies[0].ats_type, AtsType::Greenhouse);
        assert_eq!(config.companies[1].ats_type, AtsType::Lever);
        assert_eq!(config.companies[1].website, None);
    }

    #[test]
    fn test_validation_rejects_positive_penalty() {
        let mut config = Config::default();
        config.scoring.senior_title_penalty = 2.0;
        assert!(matches!(config.validate(), Err(JobRankerError::Configuration(_))));
    }

    #[test]
    fn test_validation_rejects_zero_horizon() {
        let mut config = Config::default();
        config.scoring.recency_horizon_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.storage.jobs_path, config.storage.jobs_path);
    }
}
