//! Resource catalogue library.
//!
//! Builds a deduplicated, sorted catalogue of URL patterns and the HTTP
//! methods they accept from a routing registry, and serves it through an
//! admin API.

pub mod admin;
pub mod catalogue;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use catalogue::{Catalogue, CatalogueSnapshot, HttpVerb, ResourceInfo};
pub use config::CatalogueConfig;
pub use http::AdminServer;
pub use lifecycle::Shutdown;
pub use registry::RoutingRegistry;
