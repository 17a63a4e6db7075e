//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build registry → Initial refresh → Start server
//!
//! Reload (reload.rs):
//!     Registry file change / SIGHUP → RefreshTrigger → Catalogue::refresh()
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → broadcast → server drains, reload loop exits
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then catalogue, then listeners
//! - Startup fails if the first refresh fails; later failures keep the
//!   previous catalogue

pub mod reload;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use reload::{run_refresh_loop, RefreshTrigger};
pub use shutdown::Shutdown;
pub use startup::build_catalogue;
