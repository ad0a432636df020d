//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming href ("/payment?x=1")
//!     → location.rs (normalize pathname, split search/hash)
//!     → tree.rs (walk root → leaf)
//!     → matcher.rs (per-route segment condition)
//!     → Return: RouteMatch (root-first chain) or NotFound
//!
//! Route Compilation (at startup):
//!     RouteDef[]
//!     → Validate ids, parents, reachability, path uniqueness
//!     → Compile matchers
//!     → Freeze as immutable RouteTree
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same chain
//! - First match wins among siblings (declaration order, pathless last)

pub mod location;
pub mod matcher;
pub mod route;
pub mod tree;

pub use location::Location;
pub use route::{Component, RouteDef, RouteId, Segment};
pub use tree::{Resolution, RouteKind, RouteMatch, RouteSummary, RouteTree, RouteTreeError};
