//! Error handling for the job ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document read error: {0}")]
    DocumentRead(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill catalog error: {0}")]
    Catalog(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, JobRankerError>;

/// Convert HTTP client errors to our custom error type
impl From<reqwest::Error> for JobRankerError {
    fn from(err: reqwest::Error) -> Self {
        JobRankerError::Network(err.to_string())
    }
}
