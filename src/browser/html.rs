// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Subresource discovery using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use url::Url;

use crate::error::Result;
use crate::network::ResourceType;

/// A resource referenced by a document that a browser would request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subresource {
    /// How the browser would classify the request
    pub resource_type: ResourceType,
    /// Absolute URL
    pub url: Url,
}

/// Find the scripts and frames an HTML document loads.
///
/// Relative references resolve against the first `<base href>`, falling back
/// to `document_url`. Only http(s) URLs are returned, in document order.
pub fn discover_subresources(html: &str, document_url: &Url) -> Result<Vec<Subresource>> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut walker = Walker::default();
    walker.walk(&dom.document);

    let base = walker
        .base_href
        .as_deref()
        .and_then(|href| document_url.join(href).ok())
        .unwrap_or_else(|| document_url.clone());

    let resources = walker
        .references
        .into_iter()
        .filter_map(|(resource_type, reference)| {
            let url = base.join(reference.trim()).ok()?;
            matches!(url.scheme(), "http" | "https").then_some(Subresource { resource_type, url })
        })
        .collect();

    Ok(resources)
}

#[derive(Default)]
struct Walker {
    base_href: Option<String>,
    references: Vec<(ResourceType, String)>,
}

impl Walker {
    /// Pre-order walk over an explicit stack; page nesting depth is untrusted.
    fn walk(&mut self, root: &Handle) {
        let mut stack = vec![root.clone()];

        while let Some(handle) = stack.pop() {
            self.visit(&handle);

            let children = handle.children.borrow();
            stack.extend(children.iter().rev().cloned());
        }
    }

    fn visit(&mut self, handle: &Handle) {
        let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = handle.data
        else {
            return;
        };

        let attrs = attrs.borrow();
        let attr = |wanted: &str| {
            attrs
                .iter()
                .find(|a| &*a.name.local == wanted)
                .map(|a| a.value.to_string())
                .filter(|v| !v.trim().is_empty())
        };

        match &*name.local {
            "base" if self.base_href.is_none() => self.base_href = attr("href"),
            "script" => {
                if let Some(src) = attr("src") {
                    self.references.push((ResourceType::Script, src));
                }
            }
            "iframe" | "frame" => {
                if let Some(src) = attr("src") {
                    self.references.push((ResourceType::Document, src));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(resources: &[Subresource], kind: ResourceType) -> Vec<String> {
        resources
            .iter()
            .filter(|r| r.resource_type == kind)
            .map(|r| r.url.to_string())
            .collect()
    }

    #[test]
    fn test_scripts_and_frames() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script src="/static/app.js"></script>
                <script>var inline = "https://inline.example.com";</script>
                <script src="https://cdn.example.net/lib.js" async></script>
            </head>
            <body>
                <iframe src="https://widgets.example.org/embed"></iframe>
                <script src="javascript:void(0)"></script>
            </body>
            </html>
        "#;
        let page = Url::parse("https://example.com/index.html").unwrap();
        let resources = discover_subresources(html, &page).unwrap();

        assert_eq!(
            urls(&resources, ResourceType::Script),
            vec![
                "https://example.com/static/app.js",
                "https://cdn.example.net/lib.js",
            ]
        );
        assert_eq!(
            urls(&resources, ResourceType::Document),
            vec!["https://widgets.example.org/embed"]
        );
    }

    #[test]
    fn test_base_href() {
        let html = r#"<html><head><base href="https://assets.example.com/v2/"></head>
            <body><script src="main.js"></script></body></html>"#;
        let page = Url::parse("https://example.com/").unwrap();
        let resources = discover_subresources(html, &page).unwrap();

        assert_eq!(
            urls(&resources, ResourceType::Script),
            vec!["https://assets.example.com/v2/main.js"]
        );
    }

    #[test]
    fn test_no_subresources() {
        let page = Url::parse("https://example.com/").unwrap();
        assert!(discover_subresources("<p>plain</p>", &page).unwrap().is_empty());
        assert!(discover_subresources("", &page).unwrap().is_empty());
    }

    #[test]
    fn test_deeply_nested_document() {
        let depth = 200_000;
        let html = format!(
            "{}<script src=\"/deep.js\"></script>{}",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let page = Url::parse("https://example.com/").unwrap();
        let resources = discover_subresources(&html, &page).unwrap();

        assert_eq!(
            urls(&resources, ResourceType::Script),
            vec!["https://example.com/deep.js"]
        );
    }

    #[test]
    fn test_document_order_kept() {
        let html = r#"<div><script src="/a.js"></script><div><script src="/b.js"></script></div></div>
            <script src="/c.js"></script>"#;
        let page = Url::parse("https://example.com/").unwrap();
        let resources = discover_subresources(html, &page).unwrap();

        assert_eq!(
            urls(&resources, ResourceType::Script),
            vec![
                "https://example.com/a.js",
                "https://example.com/b.js",
                "https://example.com/c.js",
            ]
        );
    }
}
