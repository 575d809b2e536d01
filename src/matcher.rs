//! Keyword pattern matching for link filtering.
//!
//! Every keyword is a regular expression compiled case-insensitively and
//! searched anywhere in the subject (unanchored). An empty keyword set matches
//! everything.

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

/// A keyword could not be compiled as a regular expression.
#[derive(Debug, Clone, Error)]
#[error("invalid keyword pattern '{pattern}': {reason}\n  Suggestion: escape regex metacharacters or fix the pattern syntax")]
pub struct PatternError {
    /// The pattern exactly as supplied.
    pub pattern: String,
    /// Compiler diagnostic for the pattern.
    pub reason: String,
}

impl PatternError {
    fn from_regex(pattern: &str, source: &regex::Error) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason: source.to_string(),
        }
    }
}

/// Compiled, ordered set of case-insensitive keyword patterns.
///
/// # Example
///
/// ```
/// use pdfgrab_core::KeywordSet;
///
/// let keywords = KeywordSet::compile(&["hw", r"dis\d+"]).unwrap();
/// assert!(keywords.matches("HW1"));
/// assert!(keywords.matches("dis03.pdf"));
/// assert!(!keywords.matches("notes.pdf"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    patterns: Vec<Regex>,
}

impl KeywordSet {
    /// Compiles every pattern, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] naming the first pattern that does not compile.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| PatternError::from_regex(pattern, &e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = patterns.len(), "compiled keyword patterns");
        Ok(Self { patterns })
    }

    /// Returns an empty set that matches every subject.
    #[must_use]
    pub fn match_all() -> Self {
        Self::default()
    }

    /// True when no patterns were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if the set is empty or any pattern is found within `subject`.
    #[must_use]
    pub fn matches(&self, subject: &str) -> bool {
        self.is_empty() || self.patterns.iter().any(|re| re.is_match(subject))
    }
}

/// One-shot form of [`KeywordSet::matches`] over raw pattern strings.
///
/// # Errors
///
/// Returns [`PatternError`] if any pattern is invalid, even when an earlier
/// pattern would already have matched.
pub fn matches<S: AsRef<str>>(patterns: &[S], subject: &str) -> Result<bool, PatternError> {
    Ok(KeywordSet::compile(patterns)?.matches(subject))
}
