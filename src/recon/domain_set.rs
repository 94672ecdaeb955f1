// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Thread-safe domain accumulator

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

/// Set of unique domain references, shared between concurrent fetch tasks.
///
/// Clones share the same underlying set. Membership is exact string
/// equality; nothing is normalized.
#[derive(Debug, Clone, Default)]
pub struct DomainSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl DomainSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one domain, returning whether it was new
    pub fn insert(&self, domain: impl Into<String>) -> bool {
        self.inner.lock().insert(domain.into())
    }

    /// Merge many domains under a single lock
    pub fn merge<I>(&self, domains: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.inner.lock().extend(domains);
    }

    /// Whether the set contains `domain`
    pub fn contains(&self, domain: &str) -> bool {
        self.inner.lock().contains(domain)
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> HashSet<String> {
        self.inner.lock().clone()
    }
}
