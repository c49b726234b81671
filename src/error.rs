//! Error types for the page analyzer.
//!
//! This module provides structured error handling with:
//! - `AppError`: failures that abort an analysis (or never let it start)
//! - `Result<T>`: Type alias for Results using AppError
//!
//! Malformed markup and unreachable links are not errors here. The former is
//! recorded as an [`AnalysisWarning`](crate::domain::models::AnalysisWarning),
//! the latter as `false` in the link reachability sample.

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Failures surfaced to the caller of an analysis.
#[derive(Debug, Error)]
pub enum AppError {
    /// The analysis input is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The primary page could not be fetched (network, timeout, DNS)
    #[error("Fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis was cancelled
    #[error("Analysis cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a fetch failure for `url`
    pub fn fetch_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this failure came from the primary page fetch.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
