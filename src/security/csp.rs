// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content Security Policy (CSP) header analysis
//!
//! Header detection is a deliberately loose heuristic: any header whose name
//! contains "csp" counts, which covers `Content-Security-Policy`, its
//! report-only variant and vendor headers such as `X-CSP-Report`. Policy text
//! is scanned, not parsed.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domains::extract_domains;

lazy_static! {
    /// Domain reference ending in a literal `.js`
    static ref SCRIPT_URL_REGEX: Regex =
        Regex::new(r#"https?://[^\s"'<>;]+\.js"#).unwrap();
}

/// What a single CSP header value contributes to a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CspFindings {
    /// Domain references found in the policy
    pub domains: HashSet<String>,
    /// Script URLs named in the policy, in order, duplicates kept
    pub script_urls: Vec<String>,
}

/// CSP analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct CspAnalyzer;

impl CspAnalyzer {
    /// Create new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Whether a header name marks a CSP-bearing header
    pub fn is_csp_header(name: &str) -> bool {
        name.to_lowercase().contains("csp")
    }

    /// Script URLs embedded in a policy
    pub fn extract_script_urls(&self, csp: &str) -> Vec<String> {
        SCRIPT_URL_REGEX
            .find_iter(csp)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Domain references in a policy
    pub fn extract_domains(&self, csp: &str) -> HashSet<String> {
        extract_domains(csp)
    }

    /// Run both extractions over one policy value
    pub fn analyze(&self, csp: &str) -> CspFindings {
        CspFindings {
            domains: self.extract_domains(csp),
            script_urls: self.extract_script_urls(csp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str =
        "default-src 'self' https://cdn.example.com; script-src https://scripts.example.com/app.js";

    #[test]
    fn test_csp_header_names() {
        assert!(CspAnalyzer::is_csp_header("Content-Security-Policy"));
        assert!(CspAnalyzer::is_csp_header("Content-Security-Policy-Report-Only"));
        assert!(CspAnalyzer::is_csp_header("X-CSP-Report"));
        assert!(CspAnalyzer::is_csp_header("csp"));
        assert!(!CspAnalyzer::is_csp_header("Content-Type"));
        assert!(!CspAnalyzer::is_csp_header("X-Frame-Options"));
    }

    #[test]
    fn test_extract_script_urls() {
        let analyzer = CspAnalyzer::new();
        assert_eq!(
            analyzer.extract_script_urls(POLICY),
            vec!["https://scripts.example.com/app.js".to_string()]
        );
    }

    #[test]
    fn test_extract_domains() {
        let analyzer = CspAnalyzer::new();
        let domains = analyzer.extract_domains(POLICY);

        let expected: HashSet<String> = [
            "https://cdn.example.com",
            "https://scripts.example.com/app.js",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(domains, expected);
    }

    #[test]
    fn test_script_urls_keep_duplicates() {
        let analyzer = CspAnalyzer::new();
        let csp = "script-src https://a.example.com/x.js; script-src-elem https://a.example.com/x.js";

        assert_eq!(analyzer.extract_script_urls(csp).len(), 2);
        assert_eq!(analyzer.extract_domains(csp).len(), 1);
    }

    #[test]
    fn test_policy_without_sources() {
        let findings = CspAnalyzer::new().analyze("default-src 'self'; object-src 'none'");
        assert_eq!(findings, CspFindings::default());
    }
}
