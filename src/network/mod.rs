// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network observation
//!
//! Event types emitted by page loaders, the bounded channel they travel
//! through, and the observer that sorts them into script URLs and CSP headers.

mod event;
mod observer;

pub use event::{NetworkEvent, RequestEvent, ResourceType, ResponseEvent};
pub use observer::{event_channel, EventReceiver, EventSender, NetworkObserver};
