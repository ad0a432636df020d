//! Route records.
//!
//! A route is a plain record: an id, an optional parent, the path segment it
//! consumes, and a render function. Whether a route is a layout or a leaf is
//! decided by the tree (layouts have children), not by the record.

use std::fmt;

use serde::Serialize;

use crate::view::Node;

/// Render function of a route. Pure and parameterless.
pub type Component = fn() -> Node;

/// Stable route identifier, e.g. `__root__` or `/_settingsLayout/payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(&'static str);

impl RouteId {
    pub const ROOT: RouteId = RouteId("__root__");

    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The part of the URL path a route consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Tree root. Consumes nothing.
    Root,
    /// Matches only when no path is left.
    Index,
    /// One literal path segment.
    Static(&'static str),
    /// Layout without a path of its own; matched through its children.
    Pathless,
}

impl Segment {
    /// Sibling ordering: concrete segments are tried before pathless layouts.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Segment::Root | Segment::Index | Segment::Static(_) => 0,
            Segment::Pathless => 1,
        }
    }

    /// Key within a path scope. `None` for segments that claim no path.
    pub(crate) fn scope_key(&self, case_sensitive: bool) -> Option<String> {
        match self {
            Segment::Index => Some(String::new()),
            Segment::Static(s) if case_sensitive => Some(s.to_string()),
            Segment::Static(s) => Some(s.to_ascii_lowercase()),
            Segment::Root | Segment::Pathless => None,
        }
    }
}

/// A declared route.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub id: RouteId,
    pub parent: Option<RouteId>,
    pub segment: Segment,
    pub component: Component,
}

impl RouteDef {
    pub const fn root(component: Component) -> Self {
        Self {
            id: RouteId::ROOT,
            parent: None,
            segment: Segment::Root,
            component,
        }
    }

    pub const fn index(parent: RouteId, id: &'static str, component: Component) -> Self {
        Self {
            id: RouteId::new(id),
            parent: Some(parent),
            segment: Segment::Index,
            component,
        }
    }

    pub const fn path(
        parent: RouteId,
        id: &'static str,
        segment: &'static str,
        component: Component,
    ) -> Self {
        Self {
            id: RouteId::new(id),
            parent: Some(parent),
            segment: Segment::Static(segment),
            component,
        }
    }

    pub const fn pathless(parent: RouteId, id: &'static str, component: Component) -> Self {
        Self {
            id: RouteId::new(id),
            parent: Some(parent),
            segment: Segment::Pathless,
            component,
        }
    }
}
