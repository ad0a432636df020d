use crate::view::{el, Node};

pub fn page() -> Node {
    el("div")
        .class("p-2 bg-pink-600")
        .child(el("h3").class("text-xl font-bold").text("About"))
        .into()
}
