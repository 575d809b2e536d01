//! HTTP client wrapper for the listing page fetch and PDF downloads.
//!
//! A single `HttpClient` serves a whole run. It carries the identifying
//! User-Agent and the timeouts, so the page fetch and every PDF request
//! present themselves identically.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::user_agent::DEFAULT_BROWSER_USER_AGENT;

/// Transport settings shared by every request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// User-Agent header value.
    pub user_agent: String,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall per-request timeout in seconds, body included.
    pub read_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for fetching pages and streaming files to disk.
///
/// # Example
///
/// ```no_run
/// use pdfgrab_core::download::HttpClient;
/// use std::path::Path;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let page = Url::parse("https://example.com/course/")?;
/// let html = client.fetch_page(&page).await?;
/// let pdf = Url::parse("https://example.com/course/hw1.pdf")?;
/// let bytes = client.download_to_path(&pdf, Path::new("./downloads/hw1.pdf")).await?;
/// println!("{} bytes of HTML, {bytes} bytes of PDF", html.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default browser User-Agent and timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_settings(&ClientSettings::default())
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the User-Agent is not a
    /// valid header value or the TLS backend cannot be initialised.
    #[instrument(level = "debug", skip(settings), fields(ua = %settings.user_agent))]
    pub fn with_settings(settings: &ClientSettings) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.read_timeout_secs))
            .gzip(true)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self {
            client,
            user_agent: settings.user_agent.clone(),
        })
    }

    /// The User-Agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetches a page and returns its decoded body text.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the request fails, the server answers with
    /// a non-success status, or the body cannot be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_page(&self, url: &Url) -> Result<String, DownloadError> {
        let response = self.send_get(url.as_str()).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::from_transport(url.as_str(), e))?;

        debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }

    /// Downloads `url` into `file_path`, truncating any existing file.
    ///
    /// The file is only created once the server has answered with a success
    /// status, so a failed request never clobbers an earlier download. A body
    /// that fails mid-stream removes the partial file.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` on network failure, timeout, non-success status,
    /// or a file system error while writing.
    #[must_use = "download result contains the number of bytes written"]
    #[instrument(skip(self), fields(url = %url, path = %file_path.display()))]
    pub async fn download_to_path(&self, url: &Url, file_path: &Path) -> Result<u64, DownloadError> {
        let response = self.send_get(url.as_str()).await?;

        let mut file = File::create(file_path)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        let stream_result = stream_to_file(&mut file, response, url.as_str(), file_path).await;
        if stream_result.is_err() {
            drop(file);
            debug!("cleaning up partial file after error");
            let _ = tokio::fs::remove_file(file_path).await;
        }
        let bytes_written = stream_result?;

        debug!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::from_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

/// Streams response body to file, returning bytes written.
///
/// Split out so the caller can clean up on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_transport(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}
