//! Canonical skill vocabulary and pattern-based detection

use crate::error::{JobRankerError, Result};
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Canonical skill name to catalog weight.
pub type SkillWeights = BTreeMap<String, f64>;

/// How one canonical skill is recognised and how much it counts.
#[derive(Debug, Clone)]
pub struct SkillDefinition {
    weight: f64,
    patterns: Vec<Regex>,
}

/// Serializable form of a catalog entry, as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub weight: f64,
    pub patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: Vec<SkillEntry>,
}

/// Immutable, insertion-ordered skill catalog.
///
/// Build it once at startup and hand the same reference to the profile
/// builder and the scorer so both sides of a comparison agree on the
/// vocabulary.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    skills: Vec<(String, SkillDefinition)>,
    index: HashMap<String, usize>,
}

impl SkillDefinition {
    pub fn new<S: AsRef<str>>(weight: f64, patterns: &[S]) -> Result<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(JobRankerError::Catalog(format!(
                "skill weight must be a positive number, got {}",
                weight
            )));
        }
        if patterns.is_empty() {
            return Err(JobRankerError::Catalog("skill needs at least one pattern".to_string()));
        }

        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| JobRankerError::Catalog(format!("invalid pattern '{}': {}", p.as_ref(), e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { weight, patterns })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// True as soon as any pattern matches.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

impl SkillCatalog {
    /// The hand-tuned default vocabulary.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(default_entries())
    }

    pub fn from_entries(entries: Vec<SkillEntry>) -> Result<Self> {
        let mut skills = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            let name = entry.name.trim().to_lowercase();
            if name.is_empty() {
                return Err(JobRankerError::Catalog("skill name must not be empty".to_string()));
            }
            if index.contains_key(&name) {
                return Err(JobRankerError::Catalog(format!("duplicate skill: {}", name)));
            }
            let definition = SkillDefinition::new(entry.weight, &entry.patterns)
                .map_err(|e| JobRankerError::Catalog(format!("{}: {}", name, e)))?;
            index.insert(name.clone(), skills.len());
            skills.push((name, definition));
        }

        debug!("Skill catalog ready with {} skills", skills.len());
        Ok(Self { skills, index })
    }

    /// Parse a catalog from TOML (`[[skills]]` tables).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| JobRankerError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Self::from_entries(file.skills)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Skills present in `text`, each mapped to its catalog weight.
    pub fn detect(&self, text: &str) -> SkillWeights {
        self.skills
            .iter()
            .filter(|(_, def)| def.matches(text))
            .map(|(name, def)| (name.clone(), def.weight))
            .collect()
    }

    pub fn weight(&self, name: &str) -> Option<f64> {
        self.get(name).map(SkillDefinition::weight)
    }

    pub fn get(&self, name: &str) -> Option<&SkillDefinition> {
        self.index.get(name).map(|&i| &self.skills[i].1)
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillDefinition)> {
        self.skills.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

fn entry(name: &str, weight: f64, patterns: &[&str]) -> SkillEntry {
    SkillEntry {
        name: name.to_string(),
        weight,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

// Symbol-terminated skills (c++, c#) cannot end in \b, so they require a
// following non-word character or end of text instead.
fn default_entries() -> Vec<SkillEntry> {
    vec![
        entry("python", 3.0, &[r"\bpython\b"]),
        entry("java", 2.5, &[r"\bjava\b"]),
        entry("c++", 2.5, &[r"\bc\+\+(?:[^\w+]|$)", r"\bcpp\b"]),
        entry("c#", 2.2, &[r"\bc#(?:[^\w#]|$)", r"\.net\b"]),
        entry("javascript", 2.8, &[r"\bjavascript\b", r"\bjs\b"]),
        entry("typescript", 2.4, &[r"\btypescript\b", r"\bts\b"]),
        entry("react", 2.3, &[r"\breact(\.js)?\b"]),
        entry("node", 2.2, &[r"\bnode(\.js)?\b"]),
        entry("sql", 2.6, &[r"\bsql\b", r"\bpostgres(q|ql)?\b", r"\bmysql\b"]),
        entry("mongodb", 1.6, &[r"\bmongo(db)?\b"]),
        entry("git", 1.8, &[r"\bgit\b", r"\bversion control\b"]),
        entry("linux", 1.7, &[r"\blinux\b", r"\bbash\b", r"\bshell\b"]),
        entry("docker", 1.9, &[r"\bdocker\b"]),
        entry("kubernetes", 1.7, &[r"\bkubernetes\b", r"\bk8s\b"]),
        entry("aws", 2.0, &[r"\baws\b", r"\bamazon web services\b"]),
        entry("gcp", 1.6, &[r"\bgcp\b", r"\bgoogle cloud\b"]),
        entry("azure", 1.6, &[r"\bazure\b"]),
        entry("pandas", 1.9, &[r"\bpandas\b"]),
        entry("numpy", 1.6, &[r"\bnumpy\b"]),
        entry("pytorch", 2.0, &[r"\bpytorch\b"]),
        entry("tensorflow", 1.8, &[r"\btensorflow\b"]),
        entry("sklearn", 1.7, &[r"\bscikit[- ]?learn\b", r"\bsklearn\b"]),
        entry("flask", 1.6, &[r"\bflask\b"]),
        entry("django", 1.8, &[r"\bdjango\b"]),
        entry("fastapi", 1.6, &[r"\bfastapi\b"]),
        entry("rest", 1.6, &[r"\brest(\s*api)?\b"]),
        entry("graphql", 1.5, &[r"\bgraphql\b"]),
        entry("redis", 1.2, &[r"\bredis\b"]),
        entry("kafka", 1.2, &[r"\bkafka\b"]),
        entry("data structures", 2.2, &[r"\bdata structures?\b"]),
        entry("algorithms", 2.2, &[r"\balgorithms?\b"]),
        entry("oop", 1.3, &[r"\boop\b", r"\bobject[- ]oriented\b"]),
    ]
}
