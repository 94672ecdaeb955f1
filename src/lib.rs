// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # csp-recon - CSP and Third-Party Surface Reconnaissance
//!
//! Loads a page, watches the network traffic it generates, and collects the
//! external domains it exposes. No Chrome/Chromium dependency.
//!
//! ## Features
//!
//! - Network observation: request/response events through a bounded channel
//! - CSP header detection: any header whose name contains "csp"
//! - Domain extraction: flat `http(s)://` scan of CSP text and script bodies
//! - Script fan-out: every observed or CSP-listed script fetched concurrently
//! - Single deadline: partial results instead of hangs
//! - Pluggable page loading: built-in lightweight browser, headless Chrome
//!   (`chrome` feature), or any [`PageLoader`] that can replay DevTools
//!   protocol events
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use csp_recon::{Browser, BrowserConfig, Recon, ReconConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let browser = Browser::new(BrowserConfig::default())?;
//!     let fetcher = Arc::new(browser.script_fetcher()?);
//!     let recon = Recon::new(Arc::new(browser), fetcher, ReconConfig::default());
//!
//!     let report = recon.run(Some("https://example.com")).await?;
//!     for domain in report.sorted_domains() {
//!         println!("{}", domain);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod error;
pub mod http;
pub mod network;
pub mod recon;
pub mod security;

// Re-exports for convenience

// Page loading
pub use browser::{Browser, BrowserConfig, PageLoader};
#[cfg(feature = "chrome")]
pub use browser::{ChromeConfig, ChromeLoader};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, ResourceFetcher};

// Network
pub use network::{event_channel, EventSender, NetworkEvent, NetworkObserver, ResourceType};

// Analysis
pub use security::{extract_domains, CspAnalyzer, CspFindings};

// Pipeline
pub use recon::{DomainSet, Recon, ReconConfig, ReconReport, ReconState, ScriptFetcher, SettleStrategy};

/// csp-recon version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
