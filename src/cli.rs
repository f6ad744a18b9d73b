//! CLI interface for the job ranker

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-ranker")]
#[command(about = "Discover junior software-engineering postings and rank them against your resume")]
#[command(long_about = "Pull postings from Greenhouse and Lever boards, build a skill profile from your resume, and rank stored jobs by skill overlap, title level, remote availability and freshness")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a skill profile from a resume
    Profile {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Where to write the profile record (defaults to the configured path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Rank stored jobs against the resume profile
    Rank {
        /// Profile record to rank against
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// How many to display
        #[arg(short, long)]
        top: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Also export the full ranking as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Save formatted output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show per-term score breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Skip jobs already applied to
        #[arg(long)]
        unapplied: bool,
    },

    /// Fetch postings from the configured company boards
    Ingest {
        /// Only ingest these companies (by name)
        #[arg(long)]
        company: Vec<String>,
    },

    /// Export stored jobs as CSV, newest first
    Export {
        /// Output path
        #[arg(short, long, default_value = "junior_jobs.csv")]
        path: PathBuf,
    },

    /// Record that you applied to a stored job
    Applied {
        /// Posting URL
        url: String,

        /// Free-form note, e.g. which cover letter was sent
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List the skill catalog
    Skills,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
