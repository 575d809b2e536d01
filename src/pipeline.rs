//! Fetch, extract, filter and download for one listing page.
//!
//! [`Pipeline::run`] never returns an error: every failure is logged where it
//! happens and folded into the returned [`RunSummary`]. Fatal problems end the
//! run early; a failed PDF only marks its own outcome.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::download::{DownloadError, DownloadOutcome, DownloadStats, HttpClient, download_all};
use crate::filter::filter_links;
use crate::links::extract_pdf_links;
use crate::matcher::{KeywordSet, PatternError};

/// Destination folder used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// Inputs for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Listing page to scan for PDF links.
    pub url: String,
    /// Keyword patterns; empty downloads every PDF link.
    pub keywords: Vec<String>,
    /// Destination folder, created if missing.
    pub output_dir: PathBuf,
}

impl RunRequest {
    /// Request with no keywords and the default destination folder.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            keywords: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Sets the keyword patterns.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the destination folder.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

/// Problems that end a run before any PDF is attempted.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A keyword pattern did not compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The destination folder is not a directory or could not be created.
    #[error("cannot use output folder {path}: {source}")]
    Folder {
        /// Folder that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The listing page could not be retrieved.
    #[error("cannot access page {url}: {source}")]
    PageFetch {
        /// The listing page URL.
        url: String,
        /// Why the fetch failed.
        #[source]
        source: DownloadError,
    },
}

/// How a run ended.
#[derive(Debug)]
pub enum RunStatus {
    /// Every matching link was attempted; individual outcomes may still be failures.
    Completed,
    /// The page had no PDF links that survived filtering.
    NoMatches,
    /// A fatal error ended the run before any download.
    Aborted(PipelineError),
}

/// What happened during a run.
#[derive(Debug)]
pub struct RunSummary {
    /// Terminal status.
    pub status: RunStatus,
    /// Whether this run created the destination folder.
    pub folder_created: bool,
    /// PDF links found on the page before filtering.
    pub links_found: usize,
    /// Links that survived keyword filtering.
    pub links_matched: usize,
    /// Per-link outcomes, in download order.
    pub outcomes: Vec<DownloadOutcome>,
}

impl RunSummary {
    fn aborted(error: PipelineError, folder_created: bool) -> Self {
        Self {
            status: RunStatus::Aborted(error),
            folder_created,
            links_found: 0,
            links_matched: 0,
            outcomes: Vec::new(),
        }
    }

    /// Saved/failed counts for the outcomes.
    #[must_use]
    pub fn stats(&self) -> DownloadStats {
        DownloadStats::from_outcomes(&self.outcomes)
    }

    /// The fatal error, if the run was aborted.
    #[must_use]
    pub fn fatal_error(&self) -> Option<&PipelineError> {
        match &self.status {
            RunStatus::Aborted(error) => Some(error),
            RunStatus::Completed | RunStatus::NoMatches => None,
        }
    }
}

/// Runs the fetch-filter-download sequence with a shared HTTP client.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    client: HttpClient,
}

impl Pipeline {
    /// Creates a pipeline that issues every request through `client`.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Executes one run, reporting progress through `tracing` as it goes.
    ///
    /// Order: compile keywords, ensure the folder exists, fetch the page,
    /// extract and filter links, then download them one by one. Invalid
    /// keywords stop the run before any file system or network activity.
    #[instrument(skip(self, request), fields(url = %request.url, folder = %request.output_dir.display()))]
    pub async fn run(&self, request: &RunRequest) -> RunSummary {
        let keywords = match KeywordSet::compile(&request.keywords) {
            Ok(keywords) => keywords,
            Err(e) => {
                error!(pattern = %e.pattern, "{e}");
                return RunSummary::aborted(e.into(), false);
            }
        };

        let folder_created = match ensure_folder(&request.output_dir).await {
            Ok(created) => created,
            Err(e) => {
                error!("{e}");
                return RunSummary::aborted(e, false);
            }
        };

        let (base_url, html) = match self.fetch_listing(&request.url).await {
            Ok(page) => page,
            Err(e) => {
                error!("{e}");
                return RunSummary::aborted(e, folder_created);
            }
        };

        let links = extract_pdf_links(&html, &base_url);
        let links_found = links.len();
        let links = filter_links(links, &keywords);
        let links_matched = links.len();

        if links.is_empty() {
            info!(links_found, "no PDF files matched the given keywords");
            return RunSummary {
                status: RunStatus::NoMatches,
                folder_created,
                links_found,
                links_matched,
                outcomes: Vec::new(),
            };
        }

        info!(
            links_found,
            links_matched,
            keywords = keywords.len(),
            "found matching PDF files, starting downloads"
        );

        let outcomes = download_all(&self.client, &links, &request.output_dir, |_| {}).await;
        let stats = DownloadStats::from_outcomes(&outcomes);
        info!(
            saved = stats.saved(),
            failed = stats.failed(),
            total = stats.total(),
            "run complete"
        );
        for outcome in &outcomes {
            if let Some(reason) = outcome.reason() {
                warn!(url = %outcome.url(), %reason, "not downloaded");
            }
        }

        RunSummary {
            status: RunStatus::Completed,
            folder_created,
            links_found,
            links_matched,
            outcomes,
        }
    }

    async fn fetch_listing(&self, url: &str) -> Result<(Url, String), PipelineError> {
        let page_error = |source: DownloadError| PipelineError::PageFetch {
            url: url.to_string(),
            source,
        };
        let base_url = Url::parse(url).map_err(|_| page_error(DownloadError::invalid_url(url)))?;
        debug!(user_agent = self.client.user_agent(), "fetching listing page");
        let html = self.client.fetch_page(&base_url).await.map_err(page_error)?;
        Ok((base_url, html))
    }
}

/// Creates `folder` (and parents) if missing. Returns true when it was created.
///
/// An existing path that is not a directory is a `Folder` error.
async fn ensure_folder(folder: &Path) -> Result<bool, PipelineError> {
    let folder_error = |source: std::io::Error| PipelineError::Folder {
        path: folder.to_path_buf(),
        source,
    };
    match tokio::fs::metadata(folder).await {
        Ok(meta) if meta.is_dir() => return Ok(false),
        Ok(_) => {
            return Err(folder_error(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            )));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(folder_error(e)),
    }
    tokio::fs::create_dir_all(folder).await.map_err(folder_error)?;
    info!(folder = %folder.display(), "created output folder");
    Ok(true)
}
