//! Sequential download stage.
//!
//! Links are fetched strictly one after another in the order given. Every
//! link gets exactly one attempt; a failure is recorded and the batch moves
//! on to the next link.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};
use url::Url;

use super::{DownloadError, HttpClient};
use crate::links::CandidateLink;

/// Result of attempting one link.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The body was written to `path`.
    Saved {
        /// Source URL.
        url: Url,
        /// Destination file.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The link could not be fetched or written.
    Failed {
        /// Source URL.
        url: Url,
        /// Why the attempt failed.
        error: DownloadError,
    },
}

impl DownloadOutcome {
    /// True for [`DownloadOutcome::Saved`].
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Source URL of the attempt.
    #[must_use]
    pub fn url(&self) -> &Url {
        match self {
            Self::Saved { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    /// Destination path for saved downloads.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Saved { path, .. } => Some(path),
            Self::Failed { .. } => None,
        }
    }

    /// Human-readable failure reason, if the attempt failed.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Saved { .. } => None,
            Self::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

/// Counts of saved and failed downloads for a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    saved: usize,
    failed: usize,
}

impl DownloadStats {
    /// Tallies a slice of outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: &[DownloadOutcome]) -> Self {
        let saved = outcomes.iter().filter(|o| o.is_saved()).count();
        Self {
            saved,
            failed: outcomes.len() - saved,
        }
    }

    /// Returns the number of files written.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.saved
    }

    /// Returns the number of failed links.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the total number of links attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.saved + self.failed
    }
}

/// Downloads every link into `folder`, one at a time.
///
/// `on_outcome` is invoked with each outcome as soon as it is known, before
/// the next link is attempted. Files are named after each link's
/// `file_name` and overwrite any existing file of the same name.
///
/// The folder must already exist.
#[instrument(skip(client, links, on_outcome), fields(count = links.len(), folder = %folder.display()))]
pub async fn download_all<F>(
    client: &HttpClient,
    links: &[CandidateLink],
    folder: &Path,
    mut on_outcome: F,
) -> Vec<DownloadOutcome>
where
    F: FnMut(&DownloadOutcome),
{
    let mut outcomes = Vec::with_capacity(links.len());

    for (index, link) in links.iter().enumerate() {
        info!(
            position = index + 1,
            total = links.len(),
            file = %link.file_name,
            "downloading"
        );
        let outcome = download_one(client, link, folder).await;
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    outcomes
}

async fn download_one(client: &HttpClient, link: &CandidateLink, folder: &Path) -> DownloadOutcome {
    let path = folder.join(&link.file_name);
    match client.download_to_path(&link.absolute_url, &path).await {
        Ok(bytes) => {
            info!(path = %path.display(), bytes, "saved");
            DownloadOutcome::Saved {
                url: link.absolute_url.clone(),
                path,
                bytes,
            }
        }
        Err(error) => {
            warn!(url = %link.absolute_url, error = %error, "download failed");
            DownloadOutcome::Failed {
                url: link.absolute_url.clone(),
                error,
            }
        }
    }
}
