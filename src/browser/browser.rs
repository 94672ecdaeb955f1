// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Lightweight page loader
//!
//! Loads a document the way a browser would from the network's point of
//! view: the document, then the scripts and frames it references, reporting
//! every request and response. Scripts are not executed.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;

use super::config::BrowserConfig;
use super::html::{discover_subresources, Subresource};
use super::loader::PageLoader;
use crate::error::{Error, Result};
use crate::http::{headers, HttpClient, HttpClientConfig, Request, Response};
use crate::network::{EventSender, NetworkEvent, ResourceType};

/// Lightweight headless browser
#[derive(Clone)]
pub struct Browser {
    /// Browser configuration
    config: BrowserConfig,
    /// HTTP client
    client: HttpClient,
}

impl Browser {
    /// Create a new browser instance
    pub fn new(config: BrowserConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config())?;
        Ok(Self { config, client })
    }

    /// Get browser config
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Get HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Client for script fetches: same identity and proxy as the browser,
    /// without a per-request timeout. The run deadline bounds those fetches.
    pub fn script_fetcher(&self) -> Result<HttpClient> {
        HttpClient::with_config(HttpClientConfig {
            timeout: None,
            ..self.config.http_config()
        })
    }

    /// Request one resource, reporting the request and, if any, the response
    async fn request(
        &self,
        resource_type: ResourceType,
        url: &Url,
        events: &EventSender,
    ) -> Result<Response> {
        events
            .send(NetworkEvent::request(resource_type, url.as_str()))
            .await;

        let request =
            Request::get_url(url.clone()).header(headers::ACCEPT, accept_for(resource_type));
        let response = self.client.execute(request).await?;

        events
            .send(NetworkEvent::response(
                response.url.as_str(),
                response.status_code(),
                response.header_pairs(),
            ))
            .await;

        Ok(response)
    }

    /// Load subresources concurrently; failures are logged and skipped
    async fn load_all(
        &self,
        resources: &[Subresource],
        events: &EventSender,
    ) -> Vec<(ResourceType, Response)> {
        let loads = resources.iter().map(|res| async move {
            match self.request(res.resource_type, &res.url, events).await {
                Ok(response) => Some((res.resource_type, response)),
                Err(e) => {
                    warn!("failed to load {}: {}", res.url, e);
                    None
                }
            }
        });

        join_all(loads).await.into_iter().flatten().collect()
    }

    /// Subresources of an HTML response; anything unparsable has none
    fn subresources_of(&self, response: &Response, include_frames: bool) -> Vec<Subresource> {
        if !response.is_html() {
            return Vec::new();
        }

        match discover_subresources(&response.text_lossy(), &response.url) {
            Ok(resources) => resources
                .into_iter()
                .filter(|r| include_frames || r.resource_type != ResourceType::Document)
                .collect(),
            Err(e) => {
                debug!("could not parse {}: {}", response.url, e);
                Vec::new()
            }
        }
    }
}

/// `Accept` header a browser sends for each kind of request
fn accept_for(resource_type: ResourceType) -> &'static str {
    match resource_type {
        ResourceType::Document => {
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
        }
        _ => "*/*",
    }
}

#[async_trait]
impl PageLoader for Browser {
    async fn load(&self, url: &Url, events: EventSender) -> Result<()> {
        let document = self
            .request(ResourceType::Document, url, &events)
            .await
            .map_err(|e| Error::navigation_failed(url.as_str(), e.to_string()))?;

        if !document.is_success() {
            return Err(Error::navigation_failed(
                url.as_str(),
                format!("HTTP {}", document.status_code()),
            ));
        }

        let resources = self.subresources_of(&document, self.config.load_frames);
        debug!("{} references {} subresources", document.url, resources.len());

        let loaded = self.load_all(&resources, &events).await;

        // Frames are followed one level: their scripts load, their frames do not.
        let frame_scripts: Vec<Subresource> = loaded
            .iter()
            .filter(|(kind, _)| *kind == ResourceType::Document)
            .flat_map(|(_, frame)| self.subresources_of(frame, false))
            .collect();

        if !frame_scripts.is_empty() {
            self.load_all(&frame_scripts, &events).await;
        }

        Ok(())
    }
}
