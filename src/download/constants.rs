//! Constants for the download module (timeouts).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default overall request timeout (5 minutes for large files).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Largest timeout accepted from CLI or config (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;
