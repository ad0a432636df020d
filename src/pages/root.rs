//! Root layout: persistent shell around every page.

use crate::view::{el, DevtoolsPosition, Link, Node};

const NAV_LINK_CLASS: &str = "[&.active]:font-bold";

pub fn layout() -> Node {
    el("div")
        .class("bg-blue-950 p-2")
        .child(el("h1").class("text-2xl font-bold").text("Root Route"))
        .child(
            el("div")
                .class("p-2 flex gap-2 mb-4 bg-teal-600")
                .child(Link::new("/", "Home").with_class(NAV_LINK_CLASS))
                .child(Link::new("/about", "About").with_class(NAV_LINK_CLASS)),
        )
        .child(Node::Outlet)
        .child(Node::Devtools(DevtoolsPosition::TopRight))
        .into()
}

/// Content placed in the root slot when nothing matches.
pub fn not_found() -> Node {
    el("p").text("Not Found").into()
}
