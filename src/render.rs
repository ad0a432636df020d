//! Page composition.
//!
//! # Responsibilities
//! - Render every route's shell once, at startup
//! - Check the slot invariant (layouts: one slot, leaves: none)
//! - Compose matched shells leaf-first, each into its parent's slot
//! - Produce a not-found page inside the root shell
//!
//! # Design Decisions
//! - Shells are cached as `Arc<Node>`; composition clones, never mutates
//! - Rendering is synchronous and side-effect free

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::RenderConfig;
use crate::pages;
use crate::routing::{Location, Resolution, RouteId, RouteKind, RouteTree, RouteTreeError};
use crate::view::{self, Node, RenderContext};

/// Whether the location matched a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

impl PageStatus {
    pub fn as_u16(&self) -> u16 {
        match self {
            PageStatus::Found => 200,
            PageStatus::NotFound => 404,
        }
    }
}

/// A composed page for one location.
#[derive(Debug, Clone)]
pub struct Page {
    pub location: Location,
    pub status: PageStatus,
    /// Matched route ids, root first. Only the root for a not-found page.
    pub matches: Vec<RouteId>,
    pub body: Node,
    case_sensitive: bool,
}

impl Page {
    pub fn leaf(&self) -> RouteId {
        self.matches.last().copied().unwrap_or(RouteId::ROOT)
    }

    fn context(&self, devtools: bool) -> RenderContext<'_> {
        RenderContext {
            location: &self.location,
            matches: &self.matches,
            case_sensitive: self.case_sensitive,
            devtools,
        }
    }

    /// Page markup without the document wrapper.
    pub fn to_html(&self, options: &RenderConfig) -> String {
        view::to_html(&self.body, &self.context(options.devtools))
    }

    /// Full HTML document.
    pub fn to_document(&self, options: &RenderConfig) -> String {
        view::to_document(&options.title, &self.body, &self.context(options.devtools))
    }
}

/// Resolves locations and composes cached shells into pages.
#[derive(Debug)]
pub struct Renderer {
    tree: Arc<RouteTree>,
    shells: HashMap<RouteId, Arc<Node>>,
    not_found: Node,
}

impl Renderer {
    /// Render and cache every route's shell.
    pub fn new(tree: Arc<RouteTree>) -> Result<Self, RouteTreeError> {
        let mut shells = HashMap::new();
        for def in tree.routes() {
            let shell = (def.component)();
            let expected = match tree.kind(def.id) {
                Some(RouteKind::Layout) => 1,
                _ => 0,
            };
            let found = shell.outlet_count();
            // The root may have no children yet and still keep its slot.
            let root_ok = def.id == RouteId::ROOT && found == 1;
            if found != expected && !root_ok {
                return Err(RouteTreeError::SlotCount {
                    route: def.id,
                    expected,
                    found,
                });
            }
            shells.insert(def.id, Arc::new(shell.with_root_attr("data-route", def.id.as_str())));
        }

        Ok(Self {
            tree,
            shells,
            not_found: pages::root::not_found(),
        })
    }

    /// Renderer over the site's own routes.
    pub fn for_site(case_sensitive: bool) -> Result<Self, RouteTreeError> {
        Self::new(Arc::new(pages::route_tree(case_sensitive)?))
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    /// Cached shell of a route.
    pub fn shell(&self, id: RouteId) -> Option<&Arc<Node>> {
        self.shells.get(&id)
    }

    pub fn render_path(&self, href: &str) -> Page {
        self.render(&Location::parse(href))
    }

    pub fn render(&self, location: &Location) -> Page {
        let (status, matches, leaf_content) = match self.tree.resolve(location) {
            Resolution::Matched(m) => (PageStatus::Found, m.chain().to_vec(), None),
            Resolution::NotFound => (
                PageStatus::NotFound,
                vec![RouteId::ROOT],
                Some(self.not_found.clone()),
            ),
        };

        tracing::trace!(path = %location.pathname(), ?status, matches = ?matches, "Composing page");

        Page {
            location: location.clone(),
            status,
            body: self.compose(&matches, leaf_content),
            matches,
            case_sensitive: self.tree.case_sensitive(),
        }
    }

    /// Fill each shell's slot with the output of the level below it.
    pub fn compose(&self, chain: &[RouteId], leaf_content: Option<Node>) -> Node {
        chain.iter().rev().fold(leaf_content, |slot, id| match self.shells.get(id) {
            Some(shell) => Some(shell.fill_outlet(slot)),
            None => slot,
        })
        .unwrap_or(Node::Fragment(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteDef;
    use crate::view::el;

    fn no_slot_layout() -> Node {
        el("div").text("forgot the slot").into()
    }

    fn leaf() -> Node {
        el("p").text("leaf").into()
    }

    fn layout() -> Node {
        el("section").child(Node::Outlet).into()
    }

    #[test]
    fn test_rejects_layout_without_slot() {
        let tree = RouteTree::new(&[
            RouteDef::root(layout),
            RouteDef::pathless(RouteId::ROOT, "/_l", no_slot_layout),
            RouteDef::path(RouteId::new("/_l"), "/_l/a", "a", leaf),
        ])
        .unwrap();
        let err = Renderer::new(Arc::new(tree)).unwrap_err();
        assert_eq!(
            err,
            RouteTreeError::SlotCount {
                route: RouteId::new("/_l"),
                expected: 1,
                found: 0,
            }
        );
    }

    #[test]
    fn test_rejects_leaf_with_slot() {
        let tree = RouteTree::new(&[
            RouteDef::root(layout),
            RouteDef::path(RouteId::ROOT, "/a", "a", layout),
        ])
        .unwrap();
        assert!(matches!(
            Renderer::new(Arc::new(tree)),
            Err(RouteTreeError::SlotCount { found: 1, expected: 0, .. })
        ));
    }

    #[test]
    fn test_static_layout_without_leaf_renders_shell_only() {
        let settings = RouteId::new("/settings");
        let tree = RouteTree::new(&[
            RouteDef::root(layout),
            RouteDef::path(RouteId::ROOT, "/settings", "settings", layout),
            RouteDef::path(settings, "/settings/payment", "payment", leaf),
        ])
        .unwrap();
        let renderer = Renderer::new(Arc::new(tree)).unwrap();

        let page = renderer.render_path("/settings");
        assert_eq!(page.status, PageStatus::Found);
        assert_eq!(page.leaf(), settings);
        let shell = page.body.find_by_attr("data-route", "/settings").unwrap();
        assert_eq!(shell.children, vec![Node::Fragment(Vec::new())]);
        assert_eq!(page.body.text_content(), "");
    }

    #[test]
    fn test_not_found_renders_inside_root_shell() {
        let renderer = Renderer::for_site(false).unwrap();
        let page = renderer.render_path("/nowhere");
        assert_eq!(page.status, PageStatus::NotFound);
        assert_eq!(page.status.as_u16(), 404);
        assert_eq!(page.matches, vec![RouteId::ROOT]);
        assert!(page.body.text_content().contains("Not Found"));
        assert!(page.body.find_by_attr("data-route", "__root__").is_some());
    }
}
