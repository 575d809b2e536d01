//! PDF anchor extraction from a listing page.
//!
//! Parsing is lenient: malformed markup never fails, the parser recovers
//! whatever anchors it can. Anchors are reported in document order and are
//! never deduplicated.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

/// Literal suffix an `href` must end with to be considered a PDF link.
///
/// The comparison is case-sensitive: `report.PDF` is skipped.
pub const PDF_SUFFIX: &str = ".pdf";

#[allow(clippy::expect_used)]
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector is valid")); // Static selector, safe to panic

/// A PDF link discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// The anchor's `href` resolved against the page URL.
    pub absolute_url: Url,
    /// Trimmed text content of the anchor (may be empty).
    pub visible_text: String,
    /// Final path segment of `absolute_url`.
    pub file_name: String,
}

impl CandidateLink {
    /// Builds a link from an already-resolved URL, deriving the file name.
    ///
    /// Returns `None` when the URL has no non-empty final path segment.
    #[must_use]
    pub fn new(absolute_url: Url, visible_text: impl Into<String>) -> Option<Self> {
        let file_name = last_path_segment(&absolute_url)?;
        Some(Self {
            absolute_url,
            visible_text: visible_text.into(),
            file_name,
        })
    }
}

/// Extracts every anchor whose `href` ends in `.pdf`, resolved against `base_url`.
///
/// # Example
///
/// ```
/// use pdfgrab_core::links::extract_pdf_links;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/course/").unwrap();
/// let links = extract_pdf_links(r#"<a href="hw1.pdf"> HW 1 </a>"#, &base);
/// assert_eq!(links[0].absolute_url.as_str(), "https://example.com/course/hw1.pdf");
/// assert_eq!(links[0].visible_text, "HW 1");
/// assert_eq!(links[0].file_name, "hw1.pdf");
/// ```
#[tracing::instrument(skip(html, base_url), fields(html_len = html.len(), base = %base_url))]
#[must_use]
pub fn extract_pdf_links(html: &str, base_url: &Url) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.ends_with(PDF_SUFFIX) {
            trace!(href, "skipping non-PDF anchor");
            continue;
        }

        let resolved = match base_url.join(href) {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!(href, error = %e, "skipping unresolvable href");
                continue;
            }
        };
        if !resolved.as_str().ends_with(PDF_SUFFIX) {
            debug!(href, resolved = %resolved, "resolved URL lost the .pdf suffix, skipping");
            continue;
        }

        match CandidateLink::new(resolved, anchor_text(anchor)) {
            Some(link) => {
                trace!(url = %link.absolute_url, "found PDF link");
                links.push(link);
            }
            None => debug!(href, "resolved URL has no file name, skipping"),
        }
    }

    debug!(count = links.len(), "extracted PDF links");
    links
}

fn anchor_text(anchor: ElementRef<'_>) -> String {
    anchor.text().collect::<String>().trim().to_string()
}

fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
