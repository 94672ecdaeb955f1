// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Domain reference extraction
//!
//! A flat text scan for absolute `http(s)://` references. It makes no
//! assumptions about the surrounding syntax, so the same scan serves CSP
//! header values and raw script bodies.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Scheme followed by anything up to whitespace, a quote, an angle
    /// bracket or a CSP directive separator.
    static ref DOMAIN_REGEX: Regex =
        Regex::new(r#"https?://[^\s"'<>;]+"#).unwrap();
}

/// Return every distinct domain reference in `text`
pub fn extract_domains(text: &str) -> HashSet<String> {
    DOMAIN_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
