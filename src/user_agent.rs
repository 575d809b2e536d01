//! Default User-Agent for page and PDF requests.
//!
//! Some course and document hosts reject requests that do not look like they
//! come from a desktop browser, so the default impersonates one.

/// Desktop-browser User-Agent sent with every request unless overridden.
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Returns the User-Agent to use, falling back to the browser default for blank overrides.
#[must_use]
pub fn resolve_user_agent(override_value: Option<&str>) -> String {
    override_value
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .unwrap_or(DEFAULT_BROWSER_USER_AGENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_like_desktop_browser() {
        assert!(DEFAULT_BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(DEFAULT_BROWSER_USER_AGENT.contains("Chrome/"));
        assert!(!DEFAULT_BROWSER_USER_AGENT.contains("  "));
    }

    #[test]
    fn test_resolve_user_agent_prefers_non_blank_override() {
        assert_eq!(resolve_user_agent(Some("custom/1.0")), "custom/1.0");
        assert_eq!(resolve_user_agent(Some("   ")), DEFAULT_BROWSER_USER_AGENT);
        assert_eq!(resolve_user_agent(None), DEFAULT_BROWSER_USER_AGENT);
    }
}
