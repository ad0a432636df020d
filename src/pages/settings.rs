//! Settings layout, wrapping the payment and profile pages.

use crate::view::{el, Link, Node};

pub fn layout() -> Node {
    el("div")
        .class("p-2 border-2")
        .text("_settingsLayout")
        .child(
            el("div")
                .class("p-2 flex gap-2 mb-4 bg-yellow-600")
                .child(Link::new("/payment", "Payment").with_class("[&.active]:font-bold"))
                .child(Link::new("/profile", "Profile").with_class("[&.active]:font-bold")),
        )
        .child(Node::Outlet)
        .into()
}

pub fn payment() -> Node {
    el("div")
        .class("p-2 bg-green-700 border-2")
        .text("Hello \"/settings/payment\"!")
        .into()
}

pub fn profile() -> Node {
    el("div")
        .class("p-2 bg-amber-700 border-2")
        .text("Hello \"/settings/profile\"!")
        .into()
}
