//! Job ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod input;
pub mod output;
pub mod processing;
pub mod store;

pub use config::Config;
pub use error::{JobRankerError, Result};
