//! Developer-tooling overlay.
//!
//! Shows the current location and the matched route chain. Collapsed by
//! default; production deployments turn it off with `render.devtools = false`.

use super::html::{escape_text, write_attr, RenderContext};
use super::node::DevtoolsPosition;

pub(super) fn write_overlay(out: &mut String, position: DevtoolsPosition, ctx: &RenderContext<'_>) {
    out.push_str("<aside");
    write_attr(out, "class", "router-devtools");
    write_attr(out, "data-position", position.as_str());
    out.push_str("><details><summary>Router</summary><dl><dt>location</dt><dd>");
    escape_text(out, &ctx.location.to_string());
    out.push_str("</dd><dt>matches</dt><dd><ol>");
    for id in ctx.matches {
        out.push_str("<li>");
        escape_text(out, id.as_str());
        out.push_str("</li>");
    }
    out.push_str("</ol></dd></dl></details></aside>");
}
