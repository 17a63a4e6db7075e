//! Routing registry subsystem.
//!
//! # Data Flow
//! ```text
//! Registry source (in-memory registration, TOML file, several merged)
//!     → RoutingRegistry::snapshot()
//!     → RegistrySnapshot (pattern → handler, handler → raw rule metadata)
//!     → catalogue builder (validates metadata into HandlerRule)
//! ```
//!
//! # Design Decisions
//! - Registries are enumerated through an explicit interface, never discovered
//! - Raw metadata stays unvalidated in the snapshot so one bad handler cannot
//!   make the whole registry unreadable
//! - A snapshot is either fully read or the call fails

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub mod composite;
pub mod file;
pub mod memory;
pub mod snapshot;

pub use composite::CompositeRegistry;
pub use file::FileRegistry;
pub use memory::StaticRegistry;
pub use snapshot::{HandlerDescriptor, HandlerRef, MethodDescriptor, RegistrySnapshot, RouteEntry};

/// A source of routing metadata.
pub trait RoutingRegistry: Send + Sync {
    /// Human readable name used in logs.
    fn name(&self) -> &str;

    /// Reads a complete snapshot of the registry.
    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError>;
}

impl<R: RoutingRegistry + ?Sized> RoutingRegistry for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        (**self).snapshot()
    }
}

impl<R: RoutingRegistry + ?Sized> RoutingRegistry for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        (**self).snapshot()
    }
}

/// Errors raised when a registry cannot be read.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("registry {name} unavailable: {reason}")]
    Unavailable { name: String, reason: String },
}

/// Errors in a single handler's routing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown HTTP verb {0:?}")]
    UnknownVerb(String),

    #[error("blank HTTP verb")]
    BlankVerb,

    #[error("blank path in {0}")]
    BlankPath(&'static str),
}
