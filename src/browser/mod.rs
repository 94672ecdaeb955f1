// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page loading
//!
//! The [`PageLoader`] trait is what the coordinator drives; [`Browser`] is
//! the built-in, Chrome-free implementation. With the `chrome` feature,
//! `ChromeLoader` drives a real headless Chrome instead.

mod browser;
#[cfg(feature = "chrome")]
mod chrome;
mod config;
mod html;
mod loader;

pub use browser::Browser;
#[cfg(feature = "chrome")]
pub use chrome::{ChromeConfig, ChromeLoader};
pub use config::BrowserConfig;
pub use html::{discover_subresources, Subresource};
pub use loader::PageLoader;
