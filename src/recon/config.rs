// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Run configuration

use std::time::Duration;

/// How long to keep listening for network events after navigation returns.
///
/// Neither strategy knows when a page is really finished; late requests
/// fired after the window closes are missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStrategy {
    /// Listen for a fixed period
    Fixed(Duration),
    /// Stop once no event arrived for `idle`, but never listen longer than `max`
    NetworkIdle { idle: Duration, max: Duration },
}

impl Default for SettleStrategy {
    fn default() -> Self {
        SettleStrategy::Fixed(Duration::from_secs(2))
    }
}

/// Configuration for a reconnaissance run
#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// Deadline for the whole run, navigation and script fetches included
    pub timeout: Duration,
    /// Settle window after navigation
    pub settle: SettleStrategy,
    /// Capacity of the network event channel
    pub channel_capacity: usize,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            settle: SettleStrategy::default(),
            channel_capacity: 1024,
        }
    }
}

impl ReconConfig {
    /// Create a new run config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall deadline
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the settle strategy
    pub fn settle(mut self, settle: SettleStrategy) -> Self {
        self.settle = settle;
        self
    }

    /// Set the event channel capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.settle, SettleStrategy::Fixed(Duration::from_secs(2)));
        assert_eq!(config.channel_capacity, 1024);
    }

    #[test]
    fn test_builder() {
        let config = ReconConfig::new()
            .timeout(Duration::from_secs(5))
            .settle(SettleStrategy::NetworkIdle {
                idle: Duration::from_millis(500),
                max: Duration::from_secs(3),
            })
            .channel_capacity(16);

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(config.settle, SettleStrategy::NetworkIdle { .. }));
        assert_eq!(config.channel_capacity, 16);
    }
}
