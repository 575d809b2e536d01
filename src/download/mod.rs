//! HTTP fetching and the sequential PDF download stage.
//!
//! # Features
//!
//! - One shared client per run carrying the identifying User-Agent
//! - Streaming downloads (memory-efficient for large files)
//! - Configurable timeouts (30s connect, 5min overall by default)
//! - Structured error types with full context
//! - Per-link failure isolation: one failed PDF never aborts the batch
//!
//! # Example
//!
//! ```no_run
//! use pdfgrab_core::download::{HttpClient, download_all};
//! use pdfgrab_core::links::extract_pdf_links;
//! use std::path::Path;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let base = Url::parse("https://example.com/course/")?;
//! let html = client.fetch_page(&base).await?;
//! let links = extract_pdf_links(&html, &base);
//! let outcomes = download_all(&client, &links, Path::new("./downloads"), |_| {}).await;
//! println!("{} attempted", outcomes.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub(crate) mod constants;
mod engine;
mod error;

pub use client::{ClientSettings, HttpClient};
pub use constants::{CONNECT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use engine::{DownloadOutcome, DownloadStats, download_all};
pub use error::DownloadError;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
