// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! csp-recon CLI
//!
//! Usage: `csp-recon <URL>`

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use csp_recon::{Browser, BrowserConfig, PageLoader, Recon, ReconConfig, ReconReport};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the result listing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("csp_recon=info"))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("csp-recon");

    let target = match args.get(1) {
        Some(target) => target,
        None => {
            eprintln!("Usage: {} <URL>", program);
            return ExitCode::from(1);
        }
    };

    let config = ReconConfig::default();

    let browser = match Browser::new(BrowserConfig::default().timeout(config.timeout)) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Failed to create browser: {}", e);
            return ExitCode::from(1);
        }
    };

    let fetcher = match browser.script_fetcher() {
        Ok(f) => Arc::new(f),
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };

    let recon = Recon::new(page_loader(browser, &config), fetcher, config);

    match recon.run(Some(target)).await {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_report(report: &ReconReport) {
    println!("\nDetected the following domains from CSP and Referenced JS:");
    for domain in &report.domains {
        println!("{}", domain);
    }
}

#[cfg(feature = "chrome")]
fn page_loader(_browser: Browser, config: &ReconConfig) -> Arc<dyn PageLoader> {
    use csp_recon::{ChromeConfig, ChromeLoader};

    Arc::new(ChromeLoader::new(ChromeConfig::default().timeout(config.timeout)))
}

#[cfg(not(feature = "chrome"))]
fn page_loader(browser: Browser, _config: &ReconConfig) -> Arc<dyn PageLoader> {
    Arc::new(browser)
}
