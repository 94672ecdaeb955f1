// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Text analysis
//!
//! - CSP header detection and extraction
//! - Domain reference scanning

mod csp;
mod domains;

pub use csp::{CspAnalyzer, CspFindings};
pub use domains::extract_domains;
