// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Chrome-backed page loader (requires the `chrome` feature)
//!
//! Drives a real headless Chrome so requests made by scripts at runtime (tag
//! managers, loaders) are observed too. DevTools `Network` events are
//! forwarded as they arrive through [`EventSender::blocking_send_cdp`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::{Browser as Chrome, LaunchOptions};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use super::loader::PageLoader;
use crate::error::{Error, Result};
use crate::network::EventSender;

const REQUEST_WILL_BE_SENT: &str = "Network.requestWillBeSent";
const RESPONSE_RECEIVED: &str = "Network.responseReceived";

/// Chrome loader configuration
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Navigation timeout, also used as Chrome's idle timeout
    pub timeout: Duration,
    /// How long the tab stays open after navigation to catch late requests
    pub linger: Duration,
    /// Run without a visible window
    pub headless: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            linger: Duration::from_secs(2),
            headless: true,
        }
    }
}

impl ChromeConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set navigation timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the post-navigation linger window
    pub fn linger(mut self, linger: Duration) -> Self {
        self.linger = linger;
        self
    }

    /// Enable/disable headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

/// Page loader backed by a headless Chrome process
#[derive(Debug, Clone, Default)]
pub struct ChromeLoader {
    config: ChromeConfig,
}

impl ChromeLoader {
    /// Create a loader; Chrome itself starts on each [`load`](PageLoader::load)
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }

    /// Get loader config
    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    /// headless_chrome is synchronous; this runs on a blocking thread
    fn load_blocking(config: &ChromeConfig, url: &str, events: EventSender) -> Result<()> {
        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .idle_browser_timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Chrome launch options: {}", e)))?;

        let chrome = Chrome::new(options)
            .map_err(|e| Error::navigation_failed(url, format!("Chrome launch: {}", e)))?;
        let tab = chrome
            .new_tab()
            .map_err(|e| Error::navigation_failed(url, format!("new tab: {}", e)))?;
        tab.set_default_timeout(config.timeout);

        // Response handling also enables the Network domain on the tab.
        let responses = events.clone();
        tab.register_response_handling(
            "csp-recon",
            Box::new(move |params, _body| {
                forward(&responses, RESPONSE_RECEIVED, &params);
            }),
        )
        .map_err(|e| Error::navigation_failed(url, format!("network domain: {}", e)))?;

        let requests = events;
        tab.add_event_listener(Arc::new(move |event: &Event| {
            if let Event::NetworkRequestWillBeSent(sent) = event {
                forward(&requests, REQUEST_WILL_BE_SENT, &sent.params);
            }
        }))
        .map_err(|e| Error::navigation_failed(url, format!("event listener: {}", e)))?;

        tab.navigate_to(url)
            .map_err(|e| Error::navigation_failed(url, e.to_string()))?;
        tab.wait_until_navigated()
            .map_err(|e| Error::navigation_failed(url, e.to_string()))?;

        debug!("{} navigated, lingering {:?}", url, config.linger);
        std::thread::sleep(config.linger);

        let _ = tab.deregister_response_handling("csp-recon");
        Ok(())
    }
}

/// Re-encode typed DevTools params and hand them to the observer
fn forward<P: Serialize>(events: &EventSender, method: &str, params: &P) {
    match serde_json::to_value(params) {
        Ok(value) => {
            events.blocking_send_cdp(method, &value);
        }
        Err(e) => debug!("could not encode {}: {}", method, e),
    }
}

#[async_trait]
impl PageLoader for ChromeLoader {
    async fn load(&self, url: &Url, events: EventSender) -> Result<()> {
        info!("Launching Chrome for {}", url);

        let config = self.config.clone();
        let target = url.to_string();

        tokio::task::spawn_blocking(move || Self::load_blocking(&config, &target, events))
            .await
            .map_err(|e| Error::Other(format!("Chrome task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_config() {
        let loader = ChromeLoader::new(
            ChromeConfig::new()
                .timeout(Duration::from_secs(10))
                .linger(Duration::from_millis(500)),
        );

        assert_eq!(loader.config().timeout, Duration::from_secs(10));
        assert_eq!(loader.config().linger, Duration::from_millis(500));
        assert!(loader.config().headless);
    }

    #[test]
    fn test_forward_decodes_response_params() {
        let (tx, mut rx) = crate::network::event_channel(2);
        let params = serde_json::json!({
            "type": "Document",
            "response": {
                "url": "https://example.com/",
                "status": 200,
                "headers": { "Content-Security-Policy": "script-src https://cdn.example.com" }
            }
        });

        forward(&tx, RESPONSE_RECEIVED, &params);
        drop(tx);

        match rx.try_recv() {
            Some(crate::network::NetworkEvent::Response(resp)) => {
                assert_eq!(resp.url, "https://example.com/");
                assert_eq!(resp.headers.len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
