// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser configuration

use std::time::Duration;

use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// User agent string
    pub user_agent: String,
    /// Timeout for each request the browser makes
    pub timeout: Duration,
    /// Accept invalid TLS certificates
    pub ignore_https_errors: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Load `<iframe>` documents referenced by the page (one level deep)
    pub load_frames: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            ignore_https_errors: false,
            proxy: None,
            load_frames: true,
        }
    }
}

impl BrowserConfig {
    /// Create a new browser config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignore HTTPS errors
    pub fn ignore_https_errors(mut self, ignore: bool) -> Self {
        self.ignore_https_errors = ignore;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enable/disable frame loading
    pub fn load_frames(mut self, load: bool) -> Self {
        self.load_frames = load;
        self
    }

    /// HTTP client settings matching this browser
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            user_agent: self.user_agent.clone(),
            timeout: Some(self.timeout),
            accept_invalid_certs: self.ignore_https_errors,
            proxy: self.proxy.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config() {
        let config = BrowserConfig::new()
            .user_agent("Custom Agent")
            .timeout(Duration::from_secs(60))
            .load_frames(false);

        assert_eq!(config.user_agent, "Custom Agent");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.load_frames);
    }

    #[test]
    fn test_http_config_follows_browser() {
        let http = BrowserConfig::new()
            .ignore_https_errors(true)
            .proxy("http://127.0.0.1:8080")
            .http_config();

        assert!(http.accept_invalid_certs);
        assert_eq!(http.proxy.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(http.timeout, Some(Duration::from_secs(30)));
    }
}
