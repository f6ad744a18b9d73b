//! Job persistence: companies, postings and application records

pub mod models;
pub mod job_store;

pub use job_store::JobStore;
pub use models::{AtsType, Company, JobPosting};
