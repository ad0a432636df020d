//! Route tree construction and lookup.
//!
//! # Responsibilities
//! - Validate declared routes (single root, known parents, unique paths)
//! - Compile segments into matchers
//! - Resolve a location into the matched route chain, root to leaf
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, no locks)
//! - Siblings are tried in declaration order, pathless layouts last
//! - Pathless layouts are transparent for path uniqueness: their children
//!   share the parent's path scope
//! - Explicit `NotFound` rather than silent default

use std::collections::HashMap;

use serde::Serialize;

use super::location::Location;
use super::matcher::{self, Matcher};
use super::route::{RouteDef, RouteId, Segment};

/// Error raised while building a [`RouteTree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTreeError {
    #[error("no root route declared")]
    MissingRoot,

    #[error("more than one root route declared: {0} and {1}")]
    MultipleRoots(RouteId, RouteId),

    #[error("duplicate route id {0}")]
    DuplicateId(RouteId),

    #[error("route {0} has no parent but is not a root route")]
    MissingParent(RouteId),

    #[error("route {route} references unknown parent {parent}")]
    UnknownParent { route: RouteId, parent: RouteId },

    #[error("route {0} is not reachable from the root")]
    Unreachable(RouteId),

    #[error("pathless route {0} has no children")]
    EmptyPathless(RouteId),

    #[error("routes {first} and {second} both claim path {path:?}")]
    DuplicatePath {
        path: String,
        first: RouteId,
        second: RouteId,
    },

    #[error("route {route} renders {found} content slots, expected {expected}")]
    SlotCount {
        route: RouteId,
        expected: usize,
        found: usize,
    },
}

/// Outcome of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    NotFound,
}

impl Resolution {
    pub fn matched(&self) -> Option<&RouteMatch> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::NotFound => None,
        }
    }
}

/// Matched routes, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    chain: Vec<RouteId>,
}

impl RouteMatch {
    pub fn chain(&self) -> &[RouteId] {
        &self.chain
    }

    /// Deepest matched route.
    pub fn leaf(&self) -> RouteId {
        // Chain always starts at the root.
        self.chain.last().copied().unwrap_or(RouteId::ROOT)
    }

    pub fn contains(&self, id: RouteId) -> bool {
        self.chain.contains(&id)
    }
}

/// Route kind, derived from the tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Layout,
    Leaf,
}

/// Flat description of one route, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub id: RouteId,
    pub parent: Option<RouteId>,
    pub path: String,
    pub kind: RouteKind,
    pub depth: usize,
}

#[derive(Debug)]
struct CompiledRoute {
    def: RouteDef,
    matcher: Box<dyn Matcher>,
    children: Vec<usize>,
}

/// Immutable, validated route tree.
#[derive(Debug)]
pub struct RouteTree {
    routes: Vec<CompiledRoute>,
    index: HashMap<RouteId, usize>,
    root: usize,
    case_sensitive: bool,
}

impl RouteTree {
    /// Build a case-insensitive tree.
    pub fn new(defs: &[RouteDef]) -> Result<Self, RouteTreeError> {
        Self::with_case_sensitivity(defs, false)
    }

    pub fn with_case_sensitivity(
        defs: &[RouteDef],
        case_sensitive: bool,
    ) -> Result<Self, RouteTreeError> {
        let mut index = HashMap::with_capacity(defs.len());
        let mut root = None;

        for (i, def) in defs.iter().enumerate() {
            if index.insert(def.id, i).is_some() {
                return Err(RouteTreeError::DuplicateId(def.id));
            }
            match (def.segment, def.parent) {
                (Segment::Root, _) => match root {
                    Some(prev) => {
                        let prev: &RouteDef = &defs[prev];
                        return Err(RouteTreeError::MultipleRoots(prev.id, def.id));
                    }
                    None => root = Some(i),
                },
                (_, None) => return Err(RouteTreeError::MissingParent(def.id)),
                _ => {}
            }
        }
        let root = root.ok_or(RouteTreeError::MissingRoot)?;

        let mut routes: Vec<CompiledRoute> = defs
            .iter()
            .map(|def| CompiledRoute {
                def: *def,
                matcher: matcher::compile(def.segment, case_sensitive),
                children: Vec::new(),
            })
            .collect();

        for (i, def) in defs.iter().enumerate() {
            if i == root {
                continue;
            }
            if let Some(parent) = def.parent {
                let p = *index.get(&parent).ok_or(RouteTreeError::UnknownParent {
                    route: def.id,
                    parent,
                })?;
                routes[p].children.push(i);
            }
        }
        for route in &mut routes {
            route.children.sort_by_key(|&c| defs[c].segment.rank());
        }

        let tree = Self {
            routes,
            index,
            root,
            case_sensitive,
        };
        tree.check_reachable()?;
        tree.check_paths()?;
        Ok(tree)
    }

    fn check_reachable(&self) -> Result<(), RouteTreeError> {
        let mut seen = vec![false; self.routes.len()];
        let mut stack = vec![self.root];
        while let Some(i) = stack.pop() {
            if std::mem::replace(&mut seen[i], true) {
                continue;
            }
            stack.extend(self.routes[i].children.iter().copied());
        }
        match seen.iter().position(|s| !s) {
            Some(i) => Err(RouteTreeError::Unreachable(self.routes[i].def.id)),
            None => Ok(()),
        }
    }

    fn check_paths(&self) -> Result<(), RouteTreeError> {
        // (scope, key) -> route claiming it
        let mut claimed: HashMap<(usize, String), RouteId> = HashMap::new();

        for (i, route) in self.routes.iter().enumerate() {
            if route.def.segment == Segment::Pathless && route.children.is_empty() {
                return Err(RouteTreeError::EmptyPathless(route.def.id));
            }
            let Some(key) = route.def.segment.scope_key(self.case_sensitive) else {
                continue;
            };
            let scope = self.path_scope(i);
            if let Some(first) = claimed.insert((scope, key), route.def.id) {
                return Err(RouteTreeError::DuplicatePath {
                    path: self.full_path(route.def.id),
                    first,
                    second: route.def.id,
                });
            }
        }
        Ok(())
    }

    /// Nearest ancestor that is not a pathless layout.
    fn path_scope(&self, i: usize) -> usize {
        let mut current = self.parent_index(i);
        while let Some(p) = current {
            if self.routes[p].def.segment != Segment::Pathless {
                return p;
            }
            current = self.parent_index(p);
        }
        self.root
    }

    fn parent_index(&self, i: usize) -> Option<usize> {
        self.routes[i]
            .def
            .parent
            .and_then(|p| self.index.get(&p).copied())
    }

    /// Resolve a location into the matched chain.
    pub fn resolve(&self, location: &Location) -> Resolution {
        let segments = location.segments();
        let mut chain = Vec::new();
        if self.match_from(self.root, &segments, &mut chain) {
            Resolution::Matched(RouteMatch { chain })
        } else {
            Resolution::NotFound
        }
    }

    fn match_from(&self, i: usize, segments: &[&str], chain: &mut Vec<RouteId>) -> bool {
        let route = &self.routes[i];
        let Some(consumed) = route.matcher.consume(segments) else {
            return false;
        };
        let rest = &segments[consumed..];

        chain.push(route.def.id);
        if route
            .children
            .iter()
            .any(|&c| self.match_from(c, rest, chain))
        {
            return true;
        }

        // A route with a path of its own matches alone once the path is used
        // up; a layout then renders with an empty slot.
        let alone = rest.is_empty() && route.def.segment != Segment::Pathless;
        if !alone {
            chain.pop();
        }
        alone
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteDef> {
        self.index.get(&id).map(|&i| &self.routes[i].def)
    }

    /// Declared routes, in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteDef> {
        self.routes.iter().map(|r| &r.def)
    }

    pub fn children(&self, id: RouteId) -> Vec<RouteId> {
        self.index
            .get(&id)
            .map(|&i| {
                self.routes[i]
                    .children
                    .iter()
                    .map(|&c| self.routes[c].def.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn kind(&self, id: RouteId) -> Option<RouteKind> {
        let &i = self.index.get(&id)?;
        Some(if self.routes[i].children.is_empty() {
            RouteKind::Leaf
        } else {
            RouteKind::Layout
        })
    }

    /// URL path a route is reached at, e.g. `/payment` for a leaf under a
    /// pathless layout.
    pub fn full_path(&self, id: RouteId) -> String {
        let mut parts = Vec::new();
        let mut current = self.index.get(&id).copied();
        while let Some(i) = current {
            if let Segment::Static(s) = self.routes[i].def.segment {
                parts.push(s);
            }
            current = self.parent_index(i);
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    /// Depth-first listing, children in matching order.
    pub fn summaries(&self) -> Vec<RouteSummary> {
        let mut out = Vec::with_capacity(self.routes.len());
        let mut stack = vec![(self.root, 0usize)];
        while let Some((i, depth)) = stack.pop() {
            let route = &self.routes[i];
            out.push(RouteSummary {
                id: route.def.id,
                parent: route.def.parent,
                path: self.full_path(route.def.id),
                kind: if route.children.is_empty() {
                    RouteKind::Leaf
                } else {
                    RouteKind::Layout
                },
                depth,
            });
            stack.extend(route.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }
}
