//! Site pages and the route table that wires them together.
//!
//! ```text
//! __root__                      root layout
//! ├── /                         home
//! ├── /about                    about
//! └── /_settingsLayout          settings layout (pathless)
//!     ├── /payment              payment
//!     └── /profile              profile
//! ```

pub mod about;
pub mod home;
pub mod root;
pub mod settings;

use crate::routing::{RouteDef, RouteId, RouteTree, RouteTreeError};

pub const HOME: RouteId = RouteId::new("/");
pub const ABOUT: RouteId = RouteId::new("/about");
pub const SETTINGS_LAYOUT: RouteId = RouteId::new("/_settingsLayout");
pub const PAYMENT: RouteId = RouteId::new("/_settingsLayout/payment");
pub const PROFILE: RouteId = RouteId::new("/_settingsLayout/profile");

/// Every route of the site.
pub const ROUTES: [RouteDef; 6] = [
    RouteDef::root(root::layout),
    RouteDef::index(RouteId::ROOT, "/", home::page),
    RouteDef::path(RouteId::ROOT, "/about", "about", about::page),
    RouteDef::pathless(RouteId::ROOT, "/_settingsLayout", settings::layout),
    RouteDef::path(SETTINGS_LAYOUT, "/_settingsLayout/payment", "payment", settings::payment),
    RouteDef::path(SETTINGS_LAYOUT, "/_settingsLayout/profile", "profile", settings::profile),
];

/// Build the site's route tree.
pub fn route_tree(case_sensitive: bool) -> Result<RouteTree, RouteTreeError> {
    RouteTree::with_case_sensitivity(&ROUTES, case_sensitive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Location, RouteKind};

    #[test]
    fn test_site_tree_shape() {
        let tree = route_tree(false).unwrap();
        assert_eq!(tree.children(RouteId::ROOT), vec![HOME, ABOUT, SETTINGS_LAYOUT]);
        assert_eq!(tree.children(SETTINGS_LAYOUT), vec![PAYMENT, PROFILE]);
        assert_eq!(tree.kind(SETTINGS_LAYOUT), Some(RouteKind::Layout));
        assert_eq!(tree.kind(ABOUT), Some(RouteKind::Leaf));
        assert_eq!(tree.full_path(PAYMENT), "/payment");
        assert_eq!(tree.full_path(PROFILE), "/profile");
    }

    #[test]
    fn test_site_paths_resolve() {
        let tree = route_tree(false).unwrap();
        let leaf = |p: &str| tree.resolve(&Location::parse(p)).matched().map(|m| m.leaf());
        assert_eq!(leaf("/"), Some(HOME));
        assert_eq!(leaf("/about"), Some(ABOUT));
        assert_eq!(leaf("/payment"), Some(PAYMENT));
        assert_eq!(leaf("/profile"), Some(PROFILE));
        assert_eq!(leaf("/settings"), None);
        assert_eq!(leaf("/settings/payment"), None);
        assert_eq!(leaf("/_settingsLayout"), None);
    }
}
