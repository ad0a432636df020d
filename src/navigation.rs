//! In-process navigation session.
//!
//! Models what a browser does between page loads: each navigation event
//! resolves the new location, keeps the shells of layouts that stay matched,
//! and swaps in the shells of routes that were entered.
//!
//! ```text
//! /about  ──navigate("/payment")──▶  /payment
//!   retained: __root__
//!   exited:   /about
//!   entered:  /_settingsLayout, /_settingsLayout/payment
//! ```

use std::sync::Arc;

use crate::render::{Page, Renderer};
use crate::routing::{Location, RouteId};
use crate::view::Node;

/// A mounted route and the shell it rendered with.
#[derive(Debug, Clone)]
pub struct Frame {
    pub route: RouteId,
    pub shell: Arc<Node>,
}

/// Route changes caused by one navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Routes matched before and after, root first.
    pub retained: Vec<RouteId>,
    /// Routes no longer matched, leaf first.
    pub exited: Vec<RouteId>,
    /// Newly matched routes, root first.
    pub entered: Vec<RouteId>,
}

/// Navigation session with a linear history.
#[derive(Debug)]
pub struct Navigator {
    renderer: Arc<Renderer>,
    history: Vec<Location>,
    cursor: usize,
    frames: Vec<Frame>,
    page: Page,
}

impl Navigator {
    /// Start a session at `href`.
    pub fn new(renderer: Arc<Renderer>, href: &str) -> Self {
        let location = Location::parse(href);
        let page = renderer.render(&location);
        let frames = Self::frames_for(&renderer, &page.matches);
        Self {
            renderer,
            history: vec![location],
            cursor: 0,
            frames,
            page,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn location(&self) -> &Location {
        &self.history[self.cursor]
    }

    /// Currently mounted routes, root first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Push a new history entry, dropping any forward entries.
    pub fn navigate(&mut self, href: &str) -> Transition {
        let location = Location::parse(href);
        self.history.truncate(self.cursor + 1);
        self.history.push(location.clone());
        self.cursor += 1;
        self.go(location)
    }

    /// Replace the current history entry.
    pub fn replace(&mut self, href: &str) -> Transition {
        let location = Location::parse(href);
        self.history[self.cursor] = location.clone();
        self.go(location)
    }

    pub fn back(&mut self) -> Option<Transition> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.go(self.history[self.cursor].clone()))
    }

    pub fn forward(&mut self) -> Option<Transition> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.go(self.history[self.cursor].clone()))
    }

    fn go(&mut self, location: Location) -> Transition {
        let page = self.renderer.render(&location);

        let kept = self
            .frames
            .iter()
            .zip(page.matches.iter())
            .take_while(|(frame, id)| frame.route == **id)
            .count();

        let transition = Transition {
            retained: page.matches[..kept].to_vec(),
            exited: self.frames[kept..].iter().rev().map(|f| f.route).collect(),
            entered: page.matches[kept..].to_vec(),
        };

        self.frames.truncate(kept);
        self.frames
            .extend(Self::frames_for(&self.renderer, &page.matches[kept..]));
        self.page = page;

        tracing::debug!(
            location = %location,
            retained = transition.retained.len(),
            entered = ?transition.entered,
            exited = ?transition.exited,
            "Navigated"
        );
        transition
    }

    fn frames_for(renderer: &Renderer, ids: &[RouteId]) -> Vec<Frame> {
        ids.iter()
            .filter_map(|&route| {
                renderer.shell(route).map(|shell| Frame {
                    route,
                    shell: Arc::clone(shell),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{ABOUT, HOME, PAYMENT, PROFILE, SETTINGS_LAYOUT};

    fn navigator(href: &str) -> Navigator {
        Navigator::new(Arc::new(Renderer::for_site(false).unwrap()), href)
    }

    #[test]
    fn test_transition_between_layouts() {
        let mut nav = navigator("/about");
        let t = nav.navigate("/payment");
        assert_eq!(t.retained, vec![RouteId::ROOT]);
        assert_eq!(t.exited, vec![ABOUT]);
        assert_eq!(t.entered, vec![SETTINGS_LAYOUT, PAYMENT]);

        let t = nav.navigate("/profile");
        assert_eq!(t.retained, vec![RouteId::ROOT, SETTINGS_LAYOUT]);
        assert_eq!(t.exited, vec![PAYMENT]);
        assert_eq!(t.entered, vec![PROFILE]);

        let t = nav.navigate("/");
        assert_eq!(t.exited, vec![PROFILE, SETTINGS_LAYOUT]);
        assert_eq!(t.entered, vec![HOME]);
    }

    #[test]
    fn test_retained_shells_are_not_recreated() {
        let mut nav = navigator("/payment");
        let root = Arc::clone(&nav.frames()[0].shell);
        let settings = Arc::clone(&nav.frames()[1].shell);

        nav.navigate("/profile");
        assert!(Arc::ptr_eq(&root, &nav.frames()[0].shell));
        assert!(Arc::ptr_eq(&settings, &nav.frames()[1].shell));

        nav.navigate("/about");
        assert!(Arc::ptr_eq(&root, &nav.frames()[0].shell));
        assert_eq!(nav.frames().len(), 2);
    }

    #[test]
    fn test_history_back_and_forward() {
        let mut nav = navigator("/");
        nav.navigate("/about");
        nav.navigate("/payment");
        assert!(!nav.can_go_forward());

        let t = nav.back().unwrap();
        assert_eq!(t.entered, vec![ABOUT]);
        assert_eq!(nav.location().pathname(), "/about");

        nav.back().unwrap();
        assert_eq!(nav.page().leaf(), HOME);
        assert!(nav.back().is_none());

        nav.forward().unwrap();
        assert_eq!(nav.page().leaf(), ABOUT);

        // Navigating drops forward entries.
        nav.navigate("/profile");
        assert!(!nav.can_go_forward());
        assert!(nav.forward().is_none());
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let mut nav = navigator("/");
        nav.navigate("/about");
        nav.replace("/profile");
        assert_eq!(nav.page().leaf(), PROFILE);
        nav.back().unwrap();
        assert_eq!(nav.page().leaf(), HOME);
    }
}
