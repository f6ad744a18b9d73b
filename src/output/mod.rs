//! Rendering and export of rankings

pub mod export;
pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};
