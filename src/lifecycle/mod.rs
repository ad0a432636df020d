//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl+C → Shutdown::trigger → every subscriber (server, config updates)
//!     → stop accepting → drain in-flight requests → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
