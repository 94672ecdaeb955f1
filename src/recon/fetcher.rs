// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Script fetching and scanning

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::http::ResourceFetcher;
use crate::security::extract_domains;

/// Downloads a script and scans its body for domain references
#[derive(Clone)]
pub struct ScriptFetcher {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl ScriptFetcher {
    /// Create a script fetcher over any resource fetcher
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and return the domains referenced in its body.
    ///
    /// Transport errors and non-2xx statuses are returned to the caller;
    /// nothing is retried.
    pub async fn fetch_and_extract(&self, url: &str) -> Result<HashSet<String>> {
        info!("Fetching JS: {}", url);
        let body = self.fetcher.fetch(url).await?;
        Ok(extract_domains(&String::from_utf8_lossy(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use bytes::Bytes;

    struct StaticFetcher;

    #[async_trait]
    impl ResourceFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<Bytes> {
            match url {
                "https://ok.example.com/app.js" => Ok(Bytes::from_static(
                    br#"fetch("https://api.example.com/v1");fetch("https://api.example.com/v1");"#,
                )),
                _ => Err(Error::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_and_extract() {
        let fetcher = ScriptFetcher::new(Arc::new(StaticFetcher));
        let domains = fetcher
            .fetch_and_extract("https://ok.example.com/app.js")
            .await
            .unwrap();

        assert_eq!(domains.len(), 1);
        assert!(domains.contains("https://api.example.com/v1"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_returned() {
        let fetcher = ScriptFetcher::new(Arc::new(StaticFetcher));
        let err = fetcher
            .fetch_and_extract("https://missing.example.com/app.js")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(404));
    }
}
