// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! A thin reqwest wrapper used both by the built-in page loader and by the
//! script fetcher. The [`ResourceFetcher`] trait is the seam the rest of the
//! crate depends on, so tests and alternative transports can stand in for it.

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig, ResourceFetcher};
pub use request::Request;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
}
