// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network event types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A network lifecycle event emitted by a page loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkEvent {
    /// A request is about to be sent
    Request(RequestEvent),
    /// Response headers were received
    Response(ResponseEvent),
}

/// Request-sent event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEvent {
    /// What kind of resource is being requested
    pub resource_type: ResourceType,
    /// Request URL
    pub url: String,
}

/// Response-received event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEvent {
    /// Response URL
    pub url: String,
    /// Status code
    pub status: u16,
    /// Headers as received. Names keep their original case; a name may repeat.
    pub headers: Vec<(String, String)>,
}

/// Resource types as reported by the rendering engine.
/// Names follow the DevTools protocol's `Network.ResourceType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Document,
    Stylesheet,
    Image,
    Media,
    Font,
    Script,
    TextTrack,
    XHR,
    Fetch,
    Prefetch,
    EventSource,
    WebSocket,
    Manifest,
    Ping,
    CSPViolationReport,
    Preflight,
    Other,
}

impl ResourceType {
    /// Parse a DevTools resource type name. Unknown names map to `Other`.
    pub fn from_cdp(name: &str) -> Self {
        match name {
            "Document" => ResourceType::Document,
            "Stylesheet" => ResourceType::Stylesheet,
            "Image" => ResourceType::Image,
            "Media" => ResourceType::Media,
            "Font" => ResourceType::Font,
            "Script" => ResourceType::Script,
            "TextTrack" => ResourceType::TextTrack,
            "XHR" => ResourceType::XHR,
            "Fetch" => ResourceType::Fetch,
            "Prefetch" => ResourceType::Prefetch,
            "EventSource" => ResourceType::EventSource,
            "WebSocket" => ResourceType::WebSocket,
            "Manifest" => ResourceType::Manifest,
            "Ping" => ResourceType::Ping,
            "CSPViolationReport" => ResourceType::CSPViolationReport,
            "Preflight" => ResourceType::Preflight,
            _ => ResourceType::Other,
        }
    }
}

impl NetworkEvent {
    /// Create a request event
    pub fn request(resource_type: ResourceType, url: impl Into<String>) -> Self {
        NetworkEvent::Request(RequestEvent {
            resource_type,
            url: url.into(),
        })
    }

    /// Create a response event
    pub fn response(url: impl Into<String>, status: u16, headers: Vec<(String, String)>) -> Self {
        NetworkEvent::Response(ResponseEvent {
            url: url.into(),
            status,
            headers,
        })
    }

    /// URL the event refers to
    pub fn url(&self) -> &str {
        match self {
            NetworkEvent::Request(req) => &req.url,
            NetworkEvent::Response(resp) => &resp.url,
        }
    }

    /// Decode a DevTools protocol `Network` domain message.
    ///
    /// Returns `Ok(None)` for methods that are not observed, and an error when
    /// an observed method carries a payload without the expected fields.
    pub fn from_cdp(method: &str, params: &Value) -> Result<Option<Self>> {
        match method {
            "Network.requestWillBeSent" => {
                let url = params
                    .pointer("/request/url")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::malformed("requestWillBeSent without request.url"))?;
                // `type` is optional in the protocol
                let resource_type = params
                    .get("type")
                    .and_then(Value::as_str)
                    .map(ResourceType::from_cdp)
                    .unwrap_or(ResourceType::Other);

                Ok(Some(NetworkEvent::request(resource_type, url)))
            }
            "Network.responseReceived" => {
                let response = params
                    .get("response")
                    .ok_or_else(|| Error::malformed("responseReceived without response"))?;
                let headers = response
                    .get("headers")
                    .and_then(Value::as_object)
                    .ok_or_else(|| Error::malformed("responseReceived without response.headers"))?;
                let url = response.get("url").and_then(Value::as_str).unwrap_or("");
                let status = response
                    .get("status")
                    .and_then(Value::as_u64)
                    .and_then(|s| u16::try_from(s).ok())
                    .unwrap_or(0);

                let mut pairs = Vec::with_capacity(headers.len());
                for (name, value) in headers {
                    // Repeated headers arrive newline-joined; non-string values are skipped.
                    if let Some(value) = value.as_str() {
                        for part in value.split('\n') {
                            pairs.push((name.clone(), part.to_string()));
                        }
                    }
                }

                Ok(Some(NetworkEvent::response(url, status, pairs)))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_script_request() {
        let params = json!({
            "requestId": "1000.1",
            "type": "Script",
            "request": { "url": "https://cdn.example.com/app.js", "method": "GET" }
        });

        let event = NetworkEvent::from_cdp("Network.requestWillBeSent", &params)
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            NetworkEvent::request(ResourceType::Script, "https://cdn.example.com/app.js")
        );
    }

    #[test]
    fn test_decode_request_without_type() {
        let params = json!({ "request": { "url": "https://example.com/" } });
        let event = NetworkEvent::from_cdp("Network.requestWillBeSent", &params)
            .unwrap()
            .unwrap();

        match event {
            NetworkEvent::Request(req) => assert_eq!(req.resource_type, ResourceType::Other),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_decode_response_headers() {
        let params = json!({
            "type": "Document",
            "response": {
                "url": "https://example.com/",
                "status": 200,
                "headers": {
                    "Content-Security-Policy": "default-src 'self'\nscript-src https://a.example.com",
                    "X-Weird": 42,
                    "Content-Type": "text/html"
                }
            }
        });

        let event = NetworkEvent::from_cdp("Network.responseReceived", &params)
            .unwrap()
            .unwrap();
        let NetworkEvent::Response(resp) = event else {
            panic!("expected response event");
        };

        assert_eq!(resp.status, 200);
        let csp: Vec<&str> = resp
            .headers
            .iter()
            .filter(|(name, _)| name == "Content-Security-Policy")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(
            csp,
            vec!["default-src 'self'", "script-src https://a.example.com"]
        );
        assert!(!resp.headers.iter().any(|(name, _)| name == "X-Weird"));
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(NetworkEvent::from_cdp("Network.requestWillBeSent", &json!({})).is_err());
        assert!(
            NetworkEvent::from_cdp("Network.responseReceived", &json!({ "response": {} }))
                .is_err()
        );
    }

    #[test]
    fn test_unobserved_method() {
        let event = NetworkEvent::from_cdp("Network.loadingFinished", &json!({})).unwrap();
        assert!(event.is_none());
    }

    #[test]
    fn test_resource_type_names() {
        assert_eq!(ResourceType::from_cdp("Script"), ResourceType::Script);
        assert_eq!(ResourceType::from_cdp("XHR"), ResourceType::XHR);
        assert_eq!(ResourceType::from_cdp("script"), ResourceType::Other);
    }
}
