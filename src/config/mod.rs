//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, resolve relative sources)
//!     → validation.rs (semantic checks)
//!     → CatalogueConfig (validated, immutable)
//!
//! On registry change:
//!     watcher.rs detects change
//!     → refresh request sent to the server task
//!     → Catalogue::refresh() rebuilds and swaps the snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; registry files are what hot-reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{AdminConfig, CatalogueConfig, ObservabilityConfig, RegistryConfig, ServerConfig};
pub use watcher::RegistryWatcher;
