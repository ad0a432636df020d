//! HTML serialization.
//!
//! # Responsibilities
//! - Serialize a markup tree with text and attribute escaping
//! - Resolve link active state against the current location
//! - Expand the developer-tooling overlay (or drop it when disabled)
//! - Wrap page markup into a full document

use std::fmt::Write as _;

use crate::routing::{Location, RouteId};

use super::devtools;
use super::node::{Link, Node};

/// Per-render inputs that the markup tree itself does not carry.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub location: &'a Location,
    /// Matched route ids, root first. Shown by the overlay.
    pub matches: &'a [RouteId],
    pub case_sensitive: bool,
    pub devtools: bool,
}

/// Serialize `node` to an HTML fragment.
pub fn to_html(node: &Node, ctx: &RenderContext<'_>) -> String {
    let mut out = String::with_capacity(1024);
    write_node(&mut out, node, ctx);
    out
}

/// Serialize `node` into a complete HTML document.
pub fn to_document(title: &str, node: &Node, ctx: &RenderContext<'_>) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str("<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    out.push_str("<title>");
    escape_text(&mut out, title);
    out.push_str("</title></head><body><div id=\"app\">");
    write_node(&mut out, node, ctx);
    out.push_str("</div></body></html>\n");
    out
}

fn write_node(out: &mut String, node: &Node, ctx: &RenderContext<'_>) {
    match node {
        Node::Text(text) => escape_text(out, text),
        Node::Element(e) => {
            out.push('<');
            out.push_str(e.tag);
            for (name, value) in &e.attrs {
                write_attr(out, name, value);
            }
            out.push('>');
            for child in &e.children {
                write_node(out, child, ctx);
            }
            let _ = write!(out, "</{}>", e.tag);
        }
        Node::Link(link) => write_link(out, link, ctx),
        Node::Fragment(nodes) => {
            for child in nodes {
                write_node(out, child, ctx);
            }
        }
        // An unfilled slot renders nothing.
        Node::Outlet => {}
        Node::Devtools(position) => {
            if ctx.devtools {
                devtools::write_overlay(out, *position, ctx);
            }
        }
    }
}

fn write_link(out: &mut String, link: &Link, ctx: &RenderContext<'_>) {
    let active = ctx.location.is_active(link.to, ctx.case_sensitive);

    out.push_str("<a");
    write_attr(out, "href", link.to);
    let class = match (link.class.is_empty(), active) {
        (true, true) => "active".to_string(),
        (false, true) => format!("{} active", link.class),
        (_, false) => link.class.to_string(),
    };
    if !class.is_empty() {
        write_attr(out, "class", &class);
    }
    if active {
        write_attr(out, "aria-current", "page");
        write_attr(out, "data-status", "active");
    }
    out.push('>');
    escape_text(out, link.label);
    out.push_str("</a>");
}

pub(super) fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out.push('"');
}

pub(super) fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{el, DevtoolsPosition};

    fn ctx<'a>(location: &'a Location, matches: &'a [RouteId]) -> RenderContext<'a> {
        RenderContext {
            location,
            matches,
            case_sensitive: false,
            devtools: false,
        }
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let loc = Location::default();
        let node: Node = el("p")
            .attr("title", "a \"quoted\" <b>")
            .text("Hello \"/settings/payment\"! & <more>")
            .into();
        assert_eq!(
            to_html(&node, &ctx(&loc, &[])),
            "<p title=\"a &quot;quoted&quot; &lt;b&gt;\">Hello \"/settings/payment\"! &amp; &lt;more&gt;</p>"
        );
    }

    #[test]
    fn test_link_active_state() {
        let loc = Location::parse("/about");
        let node: Node = el("div")
            .child(Link::new("/", "Home").with_class("[&.active]:font-bold"))
            .child(Link::new("/about", "About"))
            .into();
        assert_eq!(
            to_html(&node, &ctx(&loc, &[])),
            "<div><a href=\"/\" class=\"[&amp;.active]:font-bold\">Home</a>\
             <a href=\"/about\" class=\"active\" aria-current=\"page\" data-status=\"active\">About</a></div>"
        );
    }

    #[test]
    fn test_unfilled_outlet_and_disabled_devtools_render_nothing() {
        let loc = Location::default();
        let node: Node = el("div")
            .child(Node::Outlet)
            .child(Node::Devtools(DevtoolsPosition::TopRight))
            .into();
        assert_eq!(to_html(&node, &ctx(&loc, &[])), "<div></div>");
    }

    #[test]
    fn test_document_wrapper() {
        let loc = Location::default();
        let doc = to_document("Site & Co", &el("main").into(), &ctx(&loc, &[]));
        assert!(doc.starts_with("<!doctype html>"));
        assert!(doc.contains("<title>Site &amp; Co</title>"));
        assert!(doc.contains("<div id=\"app\"><main></main></div>"));
    }
}
