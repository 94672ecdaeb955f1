// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for csp-recon
//!
//! Two kinds of failure matter to a run: fatal setup errors (missing target,
//! navigation failure) that abort it, and per-resource errors (a single script
//! fetch) that are logged and dropped from the result.

use thiserror::Error;

/// Result type alias for csp-recon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// No target URL was supplied
    #[error("no target URL given")]
    MissingTarget,

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// The page loader could not load the target
    #[error("Navigation failed to {url}: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// Malformed network event payload
    #[error("Malformed network event: {0}")]
    MalformedEvent(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a navigation error
    pub fn navigation_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::NavigationFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed event error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedEvent(msg.into())
    }

    /// Whether this error aborts a whole run rather than a single resource
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::MissingTarget
                | Error::Url(_)
                | Error::NavigationFailed { .. }
                | Error::Config(_)
        )
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { url, .. } => Some(url),
            Error::NavigationFailed { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error() {
        let err = Error::navigation_failed("https://example.com", "connection refused");

        assert!(err.is_fatal());
        assert_eq!(err.url(), Some("https://example.com"));
        assert_eq!(
            err.to_string(),
            "Navigation failed to https://example.com: connection refused"
        );
    }

    #[test]
    fn test_status_error_is_per_resource() {
        let err = Error::HttpStatus {
            url: "https://cdn.example.com/app.js".to_string(),
            status: 404,
        };

        assert!(!err.is_fatal());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.url(), Some("https://cdn.example.com/app.js"));
    }

    #[test]
    fn test_malformed_event_is_not_fatal() {
        let err = Error::malformed("responseReceived without response");
        assert!(!err.is_fatal());
        assert!(err.url().is_none());
    }

    #[test]
    fn test_missing_target() {
        assert!(Error::MissingTarget.is_fatal());
        assert_eq!(Error::MissingTarget.to_string(), "no target URL given");
    }
}
