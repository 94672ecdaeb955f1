// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Event channel and network observer
//!
//! Page loaders push events into an [`EventSender`]; the coordinator owns the
//! single [`EventReceiver`] and feeds each event to a [`NetworkObserver`] in
//! delivery order.

use std::collections::HashSet;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::event::{NetworkEvent, ResourceType};
use crate::security::CspAnalyzer;

/// Create a bounded event channel
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender { tx }, EventReceiver { rx })
}

/// Sending half handed to page loaders
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<NetworkEvent>,
}

impl EventSender {
    /// Deliver an event. Waits while the channel is full.
    ///
    /// Returns `false` once observation has ended; loaders may keep going,
    /// their events are simply no longer recorded.
    pub async fn send(&self, event: NetworkEvent) -> bool {
        match self.tx.send(event).await {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                trace!("observation closed, dropping event for {}", event.url());
                false
            }
        }
    }

    /// Decode and deliver a DevTools protocol message.
    /// Malformed payloads are logged and dropped.
    pub async fn send_cdp(&self, method: &str, params: &Value) -> bool {
        match decode_cdp(method, params) {
            Some(event) => self.send(event).await,
            None => true,
        }
    }

    /// [`send_cdp`](Self::send_cdp) for callbacks running on plain threads.
    ///
    /// Blocks while the channel is full. Must not be called from inside an
    /// async runtime.
    pub fn blocking_send_cdp(&self, method: &str, params: &Value) -> bool {
        let Some(event) = decode_cdp(method, params) else {
            return true;
        };

        match self.tx.blocking_send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                trace!("observation closed, dropping event for {}", event.url());
                false
            }
        }
    }

    /// Whether the receiving side is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

fn decode_cdp(method: &str, params: &Value) -> Option<NetworkEvent> {
    match NetworkEvent::from_cdp(method, params) {
        Ok(event) => event,
        Err(e) => {
            debug!("ignoring {}: {}", method, e);
            None
        }
    }
}

/// Receiving half, owned by the coordinator
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::Receiver<NetworkEvent>,
}

impl EventReceiver {
    /// Next event, or `None` once every sender is dropped and the buffer is empty
    pub async fn recv(&mut self) -> Option<NetworkEvent> {
        self.rx.recv().await
    }

    /// Next event if one is already buffered
    pub fn try_recv(&mut self) -> Option<NetworkEvent> {
        self.rx.try_recv().ok()
    }

    /// Stop accepting new events; buffered ones can still be received
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Classifies network events into script requests and CSP header values
#[derive(Debug, Default)]
pub struct NetworkObserver {
    /// Unique CSP header values
    csp_headers: HashSet<String>,
    /// Script URLs in request order, duplicates kept
    script_urls: Vec<String>,
    /// Number of events seen
    events_seen: usize,
}

impl NetworkObserver {
    /// Create an empty observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one event
    pub fn observe(&mut self, event: NetworkEvent) {
        self.events_seen += 1;

        match event {
            NetworkEvent::Request(req) => {
                if req.resource_type == ResourceType::Script {
                    debug!("script request: {}", req.url);
                    self.script_urls.push(req.url);
                }
            }
            NetworkEvent::Response(resp) => {
                for (name, value) in resp.headers {
                    if CspAnalyzer::is_csp_header(&name) {
                        debug!("{} header on {}", name, resp.url);
                        self.csp_headers.insert(value);
                    }
                }
            }
        }
    }

    /// Unique CSP header values seen so far
    pub fn csp_headers(&self) -> &HashSet<String> {
        &self.csp_headers
    }

    /// Script URLs seen so far, in request order
    pub fn script_urls(&self) -> &[String] {
        &self.script_urls
    }

    /// Number of events processed
    pub fn events_seen(&self) -> usize {
        self.events_seen
    }

    /// Hand over the collected CSP headers and script URLs
    pub fn into_parts(self) -> (HashSet<String>, Vec<String>) {
        (self.csp_headers, self.script_urls)
    }
}
