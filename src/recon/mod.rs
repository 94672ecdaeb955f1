// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Reconnaissance pipeline
//!
//! Ties page loading, observation, CSP analysis and script scanning together
//! into one deduplicated set of domain references.

mod config;
mod coordinator;
mod domain_set;
mod fetcher;

pub use config::{ReconConfig, SettleStrategy};
pub use coordinator::{Recon, ReconReport, ReconState};
pub use domain_set::DomainSet;
pub use fetcher::ScriptFetcher;
