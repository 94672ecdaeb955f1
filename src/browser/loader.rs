// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page loader seam

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::network::EventSender;

/// Loads a page and reports its network activity.
///
/// Implementations push every request and response they observe into
/// `events`, in the order they happen, and return once the page has loaded.
/// An error means the page itself could not be loaded.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use csp_recon::browser::PageLoader;
/// use csp_recon::network::{EventSender, NetworkEvent, ResourceType};
/// use url::Url;
///
/// struct Replay(Vec<NetworkEvent>);
///
/// #[async_trait]
/// impl PageLoader for Replay {
///     async fn load(&self, _url: &Url, events: EventSender) -> csp_recon::Result<()> {
///         for event in &self.0 {
///             events.send(event.clone()).await;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Navigate to `url`, emitting network events as they occur
    async fn load(&self, url: &Url, events: EventSender) -> Result<()>;
}
