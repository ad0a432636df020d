//! Nested page routing with layout composition.
//!
//! A static route tree (root layout → optional settings layout → page) is
//! resolved per request and rendered server-side into HTML.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod pages;
pub mod render;
pub mod routing;
pub mod view;

pub use config::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use navigation::Navigator;
pub use render::{Page, PageStatus, Renderer};
