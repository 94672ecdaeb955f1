// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Reconnaissance run coordinator
//!
//! Drives one run through its states:
//!
//! ```text
//! Init -> Navigating -> Observing -> Draining -> FetchingScripts -> Done
//!   \________\____________________________________________________-> Failed
//! ```
//!
//! Navigation and observation share one task: the page loader produces
//! events while this task consumes them, so the event channel has exactly one
//! reader. Script fetches fan out into one task each and merge into a shared
//! [`DomainSet`]. The whole run is bounded by a single deadline; when it
//! passes, outstanding work is dropped and whatever was collected is returned.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, info, warn};
use url::Url;

use super::config::{ReconConfig, SettleStrategy};
use super::domain_set::DomainSet;
use super::fetcher::ScriptFetcher;
use crate::browser::PageLoader;
use crate::error::{Error, Result};
use crate::http::ResourceFetcher;
use crate::network::{event_channel, EventReceiver, EventSender, NetworkObserver};
use crate::security::CspAnalyzer;

/// Run states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconState {
    Init,
    Navigating,
    Observing,
    Draining,
    FetchingScripts,
    Done,
    Failed,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconReport {
    /// Target URL as given
    pub target: String,
    /// Final state (always `Done` for a returned report)
    pub state: ReconState,
    /// Unique domain references from CSP headers and fetched scripts
    pub domains: HashSet<String>,
    /// Unique CSP header values observed
    pub csp_headers: HashSet<String>,
    /// Every script URL that was fetched, page scripts first
    pub script_urls: Vec<String>,
    /// Script fetches that succeeded
    pub fetched: usize,
    /// Script fetches that failed
    pub failed: usize,
    /// Script fetches cut off by the deadline
    pub aborted: usize,
    /// Whether the deadline expired before the run finished its work
    pub timed_out: bool,
}

impl ReconReport {
    /// Domains in lexical order
    pub fn sorted_domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.domains.iter().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }
}

#[derive(Debug, Default)]
struct FetchOutcome {
    fetched: usize,
    failed: usize,
    aborted: usize,
}

/// Tracks the state machine of a single run
struct RunState {
    state: ReconState,
    deadline: Instant,
    timed_out: bool,
}

impl RunState {
    fn new(deadline: Instant) -> Self {
        Self {
            state: ReconState::Init,
            deadline,
            timed_out: false,
        }
    }

    fn enter(&mut self, next: ReconState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: Error) -> Error {
        warn!("run failed in {:?}: {}", self.state, error);
        self.state = ReconState::Failed;
        error
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Coordinates page loading, observation and script scanning
pub struct Recon {
    loader: Arc<dyn PageLoader>,
    scripts: ScriptFetcher,
    analyzer: CspAnalyzer,
    config: ReconConfig,
}

impl Recon {
    /// Create a coordinator from a page loader and a fetcher for scripts
    pub fn new(
        loader: Arc<dyn PageLoader>,
        fetcher: Arc<dyn ResourceFetcher>,
        config: ReconConfig,
    ) -> Self {
        Self {
            loader,
            scripts: ScriptFetcher::new(fetcher),
            analyzer: CspAnalyzer::new(),
            config,
        }
    }

    /// Get run configuration
    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Run against `target`.
    ///
    /// Errors are fatal setup failures only: a missing or invalid target, or a
    /// page that could not be loaded. Failed script fetches and an expired
    /// deadline still produce a report.
    pub async fn run(&self, target: Option<&str>) -> Result<ReconReport> {
        let mut run = RunState::new(Instant::now() + self.config.timeout);

        let target = match target.map(str::trim).filter(|t| !t.is_empty()) {
            Some(target) => target,
            None => return Err(run.fail(Error::MissingTarget)),
        };
        let url = Url::parse(target).map_err(|e| run.fail(e.into()))?;

        run.enter(ReconState::Navigating);
        let (tx, mut rx) = event_channel(self.config.channel_capacity);
        let mut observer = NetworkObserver::new();

        match self.navigate(&url, tx, &mut rx, &mut observer, run.deadline).await {
            Some(Ok(())) => {}
            Some(Err(e)) => return Err(run.fail(e)),
            None => {
                warn!("deadline expired while loading {}, continuing with partial data", url);
                run.timed_out = true;
            }
        }

        run.enter(ReconState::Observing);
        if !run.timed_out {
            self.settle(&mut rx, &mut observer, run.deadline).await;
            run.timed_out = run.expired();
        }
        rx.close();
        while let Some(event) = rx.try_recv() {
            observer.observe(event);
        }
        info!("observed {} events from {}", observer.events_seen(), url);

        run.enter(ReconState::Draining);
        let (csp_headers, mut script_urls) = observer.into_parts();
        let domains = DomainSet::new();
        for csp in &csp_headers {
            let findings = self.analyzer.analyze(csp);
            domains.merge(findings.domains);
            script_urls.extend(findings.script_urls);
        }

        run.enter(ReconState::FetchingScripts);
        let outcome = self.fetch_scripts(&script_urls, &domains, run.deadline).await;
        if outcome.aborted > 0 {
            warn!("deadline expired with {} script fetches outstanding", outcome.aborted);
            run.timed_out = true;
        }

        run.enter(ReconState::Done);
        info!(
            "{} domains, {} scripts fetched, {} failed",
            domains.len(),
            outcome.fetched,
            outcome.failed
        );

        Ok(ReconReport {
            target: target.to_string(),
            state: run.state,
            domains: domains.snapshot(),
            csp_headers,
            script_urls,
            fetched: outcome.fetched,
            failed: outcome.failed,
            aborted: outcome.aborted,
            timed_out: run.timed_out,
        })
    }

    /// Load the page while consuming its events.
    /// `None` means the deadline passed first.
    async fn navigate(
        &self,
        url: &Url,
        tx: EventSender,
        rx: &mut EventReceiver,
        observer: &mut NetworkObserver,
        deadline: Instant,
    ) -> Option<Result<()>> {
        let navigation = self.loader.load(url, tx);
        tokio::pin!(navigation);

        loop {
            tokio::select! {
                biased;
                _ = sleep_until(deadline) => return None,
                Some(event) = rx.recv() => observer.observe(event),
                result = &mut navigation => return Some(result),
            }
        }
    }

    /// Keep consuming events for the settle window
    async fn settle(&self, rx: &mut EventReceiver, observer: &mut NetworkObserver, deadline: Instant) {
        let (window, idle) = match self.config.settle {
            SettleStrategy::Fixed(window) => (window, None),
            SettleStrategy::NetworkIdle { idle, max } => (max, Some(idle)),
        };
        let until = deadline.min(Instant::now() + window);

        loop {
            let wake = match idle {
                Some(idle) => until.min(Instant::now() + idle),
                None => until,
            };

            tokio::select! {
                biased;
                _ = sleep_until(wake) => return,
                event = rx.recv() => match event {
                    Some(event) => observer.observe(event),
                    // Every sender is gone, nothing more can arrive
                    None => return,
                },
            }
        }
    }

    /// Fetch every script concurrently, merging results into `domains`
    async fn fetch_scripts(
        &self,
        urls: &[String],
        domains: &DomainSet,
        deadline: Instant,
    ) -> FetchOutcome {
        let mut tasks = JoinSet::new();

        for url in urls {
            let scripts = self.scripts.clone();
            let domains = domains.clone();
            let url = url.clone();

            tasks.spawn(async move {
                match scripts.fetch_and_extract(&url).await {
                    Ok(found) => {
                        domains.merge(found);
                        true
                    }
                    Err(e) => {
                        warn!("failed to fetch {}: {}", url, e);
                        false
                    }
                }
            });
        }

        let mut outcome = FetchOutcome::default();
        let barrier = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(true) => outcome.fetched += 1,
                    Ok(false) => outcome.failed += 1,
                    Err(e) => {
                        warn!("script task ended abnormally: {}", e);
                        outcome.failed += 1;
                    }
                }
            }
        };

        if timeout_at(deadline, barrier).await.is_err() {
            outcome.aborted = tasks.len();
            tasks.abort_all();
        }

        outcome
    }
}
