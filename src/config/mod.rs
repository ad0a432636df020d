//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps the render options (title, devtools)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Listener and routing changes need a restart; render options do not

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, RenderConfig, RoutingConfig, SecurityConfig, SiteConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
