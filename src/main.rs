//! Job ranker: discover junior postings and rank them against a resume

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use job_ranker::cli::{self, Cli, Commands, ConfigAction};
use job_ranker::config::{CompanyConfig, Config};
use job_ranker::error::{JobRankerError, Result};
use job_ranker::ingest::{client::AtsClient, Ingestor};
use job_ranker::output::export::{save_ranking_csv, write_jobs_csv};
use job_ranker::output::formatter::save_report_to_file;
use job_ranker::output::ReportGenerator;
use job_ranker::processing::{rank, ranker::top_n, ProfileBuilder, ProfileRecord, Scorer, SkillCatalog};
use job_ranker::store::JobStore;
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_catalog(config: &Config) -> Result<SkillCatalog> {
    match &config.storage.catalog_path {
        Some(path) => {
            info!("Loading skill catalog from {}", path.display());
            SkillCatalog::load(path)
        }
        None => SkillCatalog::builtin(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Profile { resume, out } => {
            cli::validate_file_extension(&resume, &["txt", "md"])
                .map_err(|e| JobRankerError::InvalidInput(format!("Resume file: {}", e)))?;

            println!("📄 Resume: {}", resume.display());
            let catalog = load_catalog(&config)?;
            let mut builder = ProfileBuilder::new(&catalog);
            let profile = builder.from_path(&resume).await?;

            let out_path = out.unwrap_or_else(|| config.storage.profile_path.clone());
            profile.to_record().save(&out_path)?;

            println!("\n🧠 Detected {} skills:", profile.skills.len());
            for (name, weight) in profile.ranked_skills() {
                println!("  • {:<16} {:.1}", name, weight);
            }
            println!("\n✅ Profile saved to {}", out_path.display());
        }

        Commands::Rank {
            profile,
            top,
            output,
            csv,
            save,
            detailed,
            unapplied,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(JobRankerError::InvalidInput)?,
                None => config.output.format,
            };
            let profile_path = profile.unwrap_or_else(|| config.storage.profile_path.clone());
            let top = top.unwrap_or(config.ranking.default_top);

            let catalog = load_catalog(&config)?;
            let record = ProfileRecord::load(&profile_path)?;
            let resume_skills = record.resume_skills(&catalog);
            if resume_skills.is_empty() {
                println!("⚠️  Profile has no catalog skills; ranking on title, remote and recency only");
            }

            let store = JobStore::open(&config.storage.jobs_path)?;
            let scorer = Scorer::new(&catalog, config.scoring, Utc::now())?;
            let candidates = store.jobs().iter().filter(|job| !(unapplied && job.is_applied()));
            let ranked = rank(&scorer, &resume_skills, candidates);
            info!("Ranked {} jobs", ranked.len());

            if let Some(csv_path) = &csv {
                save_ranking_csv(csv_path, &ranked)?;
                println!("💾 Wrote {} ranked jobs to {}", ranked.len(), csv_path.display());
            }

            if ranked.is_empty() {
                println!("No jobs to rank. Run `job-ranker ingest` first.");
                return Ok(());
            }

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true);
            let report = generator.generate_report(top_n(&ranked, top), &output_format)?;
            match save {
                Some(path) => {
                    save_report_to_file(&report, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", report),
            }
        }

        Commands::Ingest { company } => {
            let companies: Vec<CompanyConfig> = if company.is_empty() {
                config.companies.clone()
            } else {
                config
                    .companies
                    .iter()
                    .filter(|c| company.iter().any(|name| name.eq_ignore_ascii_case(&c.name)))
                    .cloned()
                    .collect()
            };
            if companies.is_empty() {
                return Err(JobRankerError::Configuration(format!(
                    "No companies to ingest; add [[companies]] entries to {}",
                    config_path.display()
                )));
            }

            println!("🌐 Fetching postings from {} companies...", companies.len());
            let client = AtsClient::new(&config.ingest)?;
            let ingestor = Ingestor::new(&config.ingest)?;
            let mut store = JobStore::open(&config.storage.jobs_path)?;
            let summary = ingestor.run(&client, &mut store, &companies, Utc::now()).await?;

            println!("\n📊 Ingest summary");
            println!("  Companies:  {}", summary.companies);
            println!("  Fetched:    {}", summary.fetched);
            println!("  Junior:     {}", summary.junior);
            println!("  New:        {}", summary.inserted.to_string().green());
            if !summary.failed_companies.is_empty() {
                println!(
                    "  Failed:     {}",
                    summary.failed_companies.join(", ").red()
                );
            }
        }

        Commands::Export { path } => {
            let store = JobStore::open(&config.storage.jobs_path)?;
            let file = std::fs::File::create(&path)?;
            let count = write_jobs_csv(file, store.jobs_by_recency())?;
            println!("💾 Exported {} jobs to {}", count, path.display());
        }

        Commands::Applied { url, note } => {
            let mut store = JobStore::open(&config.storage.jobs_path)?;
            let job = store.mark_applied(&url, note, Utc::now())?;
            println!("✅ Marked applied: {} at {}", job.title, job.display_company());
            store.save()?;
        }

        Commands::Skills => {
            let catalog = load_catalog(&config)?;
            println!("🧠 Skill catalog ({} skills)\n", catalog.len());
            for (name, definition) in catalog.iter() {
                println!("  • {:<16} {:.1}", name, definition.weight());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Jobs store: {}", config.storage.jobs_path.display());
                println!("Profile: {}", config.storage.profile_path.display());
                match &config.storage.catalog_path {
                    Some(path) => println!("Skill catalog: {}", path.display()),
                    None => println!("Skill catalog: builtin"),
                }
                let scoring = &config.scoring;
                println!("\nScoring:");
                println!("  Junior title boost:   {:+.1}", scoring.junior_title_boost);
                println!("  Senior title penalty: {:+.1}", scoring.senior_title_penalty);
                println!("  Remote boost:         {:+.1}", scoring.remote_boost);
                println!(
                    "  Recency bonus:        up to {:.1} over {} days",
                    scoring.recency_max_bonus, scoring.recency_horizon_days
                );
                println!("\nCompanies: {}", config.companies.len());
                for company in &config.companies {
                    println!("  • {} ({} / {})", company.name, company.ats_type, company.ats_slug);
                }
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
