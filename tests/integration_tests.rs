//! Integration tests for the job ranker

use chrono::{Duration, TimeZone, Utc};
use job_ranker::config::{Config, ScoringConfig};
use job_ranker::error::JobRankerError;
use job_ranker::input::manager::InputManager;
use job_ranker::output::export::{read_ranking_csv, save_ranking_csv, write_jobs_csv};
use job_ranker::processing::{rank, ranker::top_n, ProfileBuilder, ProfileRecord, Scorer, SkillCatalog};
use job_ranker::store::{JobPosting, JobStore};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(JobRankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_pdf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, b"%PDF-1.4\n").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(JobRankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(JobRankerError::DocumentRead(_))));
}

#[tokio::test]
async fn test_blank_resume_is_read_error() {
    let catalog = SkillCatalog::builtin().unwrap();
    let mut builder = ProfileBuilder::new(&catalog);
    let result = builder.from_path(Path::new("tests/fixtures/blank_resume.txt")).await;
    assert!(matches!(result, Err(JobRankerError::DocumentRead(_))));
}

#[tokio::test]
async fn test_profile_from_fixtures() {
    let catalog = SkillCatalog::builtin().unwrap();
    let mut builder = ProfileBuilder::new(&catalog);

    let txt = builder.from_path(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let md = builder.from_path(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();

    let names: Vec<&str> = txt.skills.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["docker", "git", "javascript", "node", "python", "react", "sql"]);
    assert_eq!(txt.skills, md.skills);
    assert_eq!(txt.skills["python"], 3.0);
    assert!(!txt.skills.contains_key("java"));
}

#[tokio::test]
async fn test_profile_to_ranking_csv() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = SkillCatalog::builtin().unwrap();

    let mut builder = ProfileBuilder::new(&catalog);
    let profile = builder.from_path(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let profile_path = dir.path().join("resume_profile.json");
    profile.to_record().save(&profile_path).unwrap();

    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let jobs_path = dir.path().join("jobs.json");
    {
        let mut store = JobStore::open(&jobs_path).unwrap();
        store.insert_job(
            JobPosting::new("Senior Software Engineer", "Python, SQL, Docker, Kubernetes")
                .with_company("Initech")
                .with_posted_at(now - Duration::days(1))
                .with_url("https://initech.example/jobs/1"),
        );
        store.insert_job(
            JobPosting::new("Junior Full Stack Engineer", "React, Node.js and SQL. Fully remote.")
                .with_company("Acme")
                .with_posted_at(now - Duration::days(10))
                .with_url("https://acme.example/jobs/7"),
        );
        store.insert_job(
            JobPosting::new("Software Engineer", "Go and Rust")
                .with_company("Globex")
                .with_url("https://globex.example/jobs/3"),
        );
        store.save().unwrap();
    }

    let record = ProfileRecord::load(&profile_path).unwrap();
    let resume_skills = record.resume_skills(&catalog);
    let store = JobStore::open(&jobs_path).unwrap();
    assert_eq!(store.jobs().len(), 3);

    let scorer = Scorer::new(&catalog, ScoringConfig::default(), now).unwrap();
    let ranked = rank(&scorer, &resume_skills, store.jobs());

    let titles: Vec<&str> = ranked.iter().map(|r| r.posting.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Junior Full Stack Engineer", "Senior Software Engineer", "Software Engineer"]
    );
    // "Node.js" also reads as javascript
    assert_eq!(
        ranked[0].breakdown.overlap,
        vec!["javascript", "sql", "react", "node"]
    );
    assert_eq!(ranked[2].score, 0.0);
    assert_eq!(top_n(&ranked, 2).len(), 2);

    let csv_path = dir.path().join("ranking.csv");
    save_ranking_csv(&csv_path, &ranked).unwrap();
    let rows = read_ranking_csv(std::fs::File::open(&csv_path).unwrap()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].company, "Acme");
    assert_eq!(rows[0].overlap, "javascript, sql, react, node");
    assert_eq!(rows[0].score, ranked[0].score);
    assert_eq!(rows[2].posted_at, "");
}

#[test]
fn test_applied_jobs_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    let at = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();

    let mut store = JobStore::open(&path).unwrap();
    store.insert_job(JobPosting::new("Intern", "").with_company("Acme").with_url("u1"));
    store.insert_job(
        JobPosting::new("New Grad", "")
            .with_company("Globex")
            .with_posted_at(at)
            .with_url("u2"),
    );
    store.mark_applied("u1", Some("sent cover letter".to_string()), at).unwrap();
    assert!(store.mark_applied("missing", None, at).is_err());
    store.save().unwrap();

    let store = JobStore::open(&path).unwrap();
    assert_eq!(store.applications().len(), 1);
    assert_eq!(store.applications()[0].note.as_deref(), Some("sent cover letter"));
    let unapplied: Vec<&str> = store
        .jobs()
        .iter()
        .filter(|j| !j.is_applied())
        .map(|j| j.url.as_str())
        .collect();
    assert_eq!(unapplied, vec!["u2"]);

    let mut buffer = Vec::new();
    write_jobs_csv(&mut buffer, store.jobs_by_recency()).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let urls: Vec<&str> = text.lines().skip(1).filter_map(|l| l.rsplit(',').next()).collect();
    assert_eq!(urls, vec!["u2", "u1"]);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let created = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created.scoring, ScoringConfig::default());

    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str(
        "\n[[companies]]\nname = \"Acme\"\nats_type = \"lever\"\nats_slug = \"acme\"\n",
    );
    std::fs::write(&path, content).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.companies.len(), 1);
    assert_eq!(loaded.companies[0].ats_slug, "acme");
}
