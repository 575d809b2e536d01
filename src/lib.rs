//! PDF Grab Core Library
//!
//! This library fetches a single listing page, extracts the links that point
//! at PDF files, filters them by keyword, and downloads the survivors into a
//! local folder, one at a time.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`matcher`] - Case-insensitive keyword pattern matching
//! - [`links`] - PDF anchor extraction and URL resolution
//! - [`filter`] - Keyword filtering of extracted links
//! - [`download`] - HTTP client and the sequential download stage
//! - [`pipeline`] - Orchestration of a whole run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod filter;
pub mod links;
pub mod matcher;
pub mod pipeline;
pub mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use download::{
    ClientSettings, DownloadError, DownloadOutcome, DownloadStats, HttpClient, download_all,
};
pub use filter::filter_links;
pub use links::{CandidateLink, extract_pdf_links};
pub use matcher::{KeywordSet, PatternError};
pub use pipeline::{
    DEFAULT_OUTPUT_DIR, Pipeline, PipelineError, RunRequest, RunStatus, RunSummary,
};
pub use user_agent::DEFAULT_BROWSER_USER_AGENT;
