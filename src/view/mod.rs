//! View subsystem.
//!
//! # Data Flow
//! ```text
//! route component (fn() -> Node)
//!     → node.rs (markup tree with slot + overlay markers)
//!     → [render composes shells root → leaf]
//!     → html.rs (serialize, resolve active links)
//!     → devtools.rs (overlay contents)
//!     → HTML string
//! ```

mod devtools;
pub mod html;
pub mod node;

pub use html::{to_document, to_html, RenderContext};
pub use node::{el, DevtoolsPosition, Element, Link, Node};
