//! Keyword filtering of candidate links.

use tracing::{debug, trace};

use crate::links::CandidateLink;
use crate::matcher::KeywordSet;

/// Keeps links whose visible text or file name matches any keyword.
///
/// Input order is preserved. An empty keyword set returns the input unchanged.
#[must_use]
pub fn filter_links(links: Vec<CandidateLink>, keywords: &KeywordSet) -> Vec<CandidateLink> {
    if keywords.is_empty() {
        return links;
    }

    let before = links.len();
    let kept: Vec<CandidateLink> = links
        .into_iter()
        .filter(|link| {
            let keep = keywords.matches(&link.visible_text) || keywords.matches(&link.file_name);
            trace!(url = %link.absolute_url, keep, "keyword filter");
            keep
        })
        .collect();

    debug!(before, after = kept.len(), "filtered links by keyword");
    kept
}
