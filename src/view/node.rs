//! Markup tree produced by route components.
//!
//! # Responsibilities
//! - Represent rendered output as a typed tree (elements, text, links)
//! - Mark the content slot where a layout's matched child is inserted
//! - Mark the developer-tooling overlay position
//! - Provide lookup helpers used by composition and tests
//!
//! # Design Decisions
//! - Trees are location-independent: link active state and the overlay
//!   contents are resolved at serialization time, so a layout's shell can be
//!   rendered once and reused across navigations
//! - Slot filling clones; cached shells are never mutated

use std::borrow::Cow;

/// Viewport corner the developer-tooling overlay is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevtoolsPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DevtoolsPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevtoolsPosition::TopLeft => "top-left",
            DevtoolsPosition::TopRight => "top-right",
            DevtoolsPosition::BottomLeft => "bottom-left",
            DevtoolsPosition::BottomRight => "bottom-right",
        }
    }
}

/// A node in the rendered markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Cow<'static, str>),
    Link(Link),
    /// Content slot of a layout.
    Outlet,
    /// Developer-tooling overlay.
    Devtools(DevtoolsPosition),
    Fragment(Vec<Node>),
}

/// An HTML element with static tag and attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, Cow<'static, str>)>,
    pub children: Vec<Node>,
}

/// A navigation link. Rendered as an anchor whose active state depends on
/// the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub to: &'static str,
    pub class: &'static str,
    pub label: &'static str,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    /// Set an attribute, replacing any previous value for the same name.
    pub fn attr(mut self, name: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<Cow<'static, str>>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| &**v)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl Link {
    pub const fn new(to: &'static str, label: &'static str) -> Self {
        Self {
            to,
            class: "",
            label,
        }
    }

    pub const fn with_class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Link> for Node {
    fn from(link: Link) -> Self {
        Node::Link(link)
    }
}

impl From<&'static str> for Node {
    fn from(text: &'static str) -> Self {
        Node::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(Cow::Owned(text))
    }
}

/// Shorthand for [`Element::new`].
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

impl Node {
    /// Children of this node, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Fragment(nodes) => nodes,
            _ => &[],
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Number of content slots in this tree.
    pub fn outlet_count(&self) -> usize {
        match self {
            Node::Outlet => 1,
            _ => self.children().iter().map(Node::outlet_count).sum(),
        }
    }

    /// Clone this tree with the content slot replaced by `child`.
    ///
    /// An empty slot renders nothing.
    pub fn fill_outlet(&self, child: Option<Node>) -> Node {
        let mut child = Some(child.unwrap_or(Node::Fragment(Vec::new())));
        self.fill(&mut child)
    }

    fn fill(&self, child: &mut Option<Node>) -> Node {
        match self {
            Node::Outlet => child.take().unwrap_or(Node::Outlet),
            Node::Element(e) => Node::Element(Element {
                tag: e.tag,
                attrs: e.attrs.clone(),
                children: e.children.iter().map(|c| c.fill(child)).collect(),
            }),
            Node::Fragment(nodes) => Node::Fragment(nodes.iter().map(|c| c.fill(child)).collect()),
            other => other.clone(),
        }
    }

    /// Set an attribute on the outermost element, if this node is one.
    pub fn with_root_attr(self, name: &'static str, value: impl Into<Cow<'static, str>>) -> Node {
        match self {
            Node::Element(e) => Node::Element(e.attr(name, value)),
            other => other,
        }
    }

    /// Depth-first search, including this node.
    pub fn find(&self, pred: &impl Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(pred))
    }

    /// All nodes matching `pred`, in document order.
    pub fn find_all<'a>(&'a self, pred: &impl Fn(&Node) -> bool, out: &mut Vec<&'a Node>) {
        if pred(self) {
            out.push(self);
        }
        for c in self.children() {
            c.find_all(pred, out);
        }
    }

    /// First element carrying `attr=value`.
    pub fn find_by_attr(&self, attr: &str, value: &str) -> Option<&Element> {
        self.find(&|n: &Node| {
            n.as_element()
                .and_then(|e| e.get_attr(attr))
                .map(|v| v == value)
                .unwrap_or(false)
        })
        .and_then(Node::as_element)
    }

    /// Links in document order.
    pub fn links(&self) -> Vec<&Link> {
        let mut out = Vec::new();
        self.find_all(&|n: &Node| matches!(n, Node::Link(_)), &mut out);
        out.into_iter()
            .filter_map(|n| match n {
                Node::Link(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text of this tree, link labels included.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Link(l) => out.push_str(l.label),
            _ => {
                for c in self.children() {
                    c.collect_text(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Node {
        el("div")
            .class("shell")
            .child(el("h1").text("Title"))
            .child(Node::Outlet)
            .into()
    }

    #[test]
    fn test_fill_outlet_inserts_child_in_place() {
        let filled = shell().fill_outlet(Some(el("p").text("body").into()));
        assert_eq!(filled.outlet_count(), 0);
        assert_eq!(filled.text_content(), "Titlebody");
        assert_eq!(filled.children()[1].as_element().map(|e| e.tag), Some("p"));
    }

    #[test]
    fn test_fill_outlet_empty_slot() {
        let filled = shell().fill_outlet(None);
        assert_eq!(filled.outlet_count(), 0);
        assert_eq!(filled.children()[1], Node::Fragment(Vec::new()));
    }

    #[test]
    fn test_attr_replaces_existing_value() {
        let e = el("div").class("a").class("b");
        assert_eq!(e.attrs.len(), 1);
        assert!(e.has_class("b"));
        assert!(!e.has_class("a"));
    }

    #[test]
    fn test_links_in_document_order() {
        let node: Node = el("nav")
            .child(Link::new("/", "Home"))
            .child(el("span").child(Link::new("/about", "About")))
            .into();
        let targets: Vec<_> = node.links().iter().map(|l| l.to).collect();
        assert_eq!(targets, vec!["/", "/about"]);
    }
}
