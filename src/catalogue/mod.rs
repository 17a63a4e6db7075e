//! Resource catalogue subsystem.
//!
//! # Data Flow
//! ```text
//! RoutingRegistry::snapshot()
//!     → dedup.rs (collapse `p.*` and `p/` onto registered `p`)
//!     → resolver.rs (type prefix + method path → verbs per pattern)
//!     → builder.rs (sorted resources + diagnostics)
//!     → store.rs (atomic publish, read by the admin API)
//! ```
//!
//! # Design Decisions
//! - Catalogue computed at refresh time, immutable afterwards
//! - Deterministic: the same registry always yields the same ordered output
//! - Per-handler problems degrade the catalogue, never fail it

pub mod builder;
pub mod dedup;
pub mod model;
pub mod resolver;
pub mod store;

pub use builder::{BuildOutput, CatalogueBuilder, Diagnostic, DiagnosticKind};
pub use dedup::find_unique_urls;
pub use model::{HandlerRule, HttpVerb, MethodRule, ResourceInfo};
pub use store::{Catalogue, CatalogueError, CatalogueSnapshot};
