// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::Request;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Fetches raw resource bytes over the network.
///
/// Implemented by [`HttpClient`]; anything that can answer a plain GET with a
/// body or an error can stand in for it.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// GET `url` and return the full body. Non-2xx statuses are errors.
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Client-wide timeout (`None` leaves requests bounded only by the caller)
    pub timeout: Option<Duration>,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(Duration::from_secs(30)),
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

/// HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::default())
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        // Only an explicitly configured proxy is used; proxy env vars are ignored.
        builder = match config.proxy {
            Some(ref proxy_url) => builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            ),
            None => builder.no_proxy(),
        };

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute a request
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body, final_url))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl ResourceFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let response = self.get(url).await?;

        if !response.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status_code(),
            });
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(client.config().timeout, Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_url() {
        let client = HttpClient::new().unwrap();
        let err = client.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }
}
