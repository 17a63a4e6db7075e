//! In-memory registry with an explicit registration API.
//!
//! # Design Decisions
//! - Interior mutability so an `Arc<StaticRegistry>` can be shared between
//!   the code registering routes and the catalogue reading them
//! - `snapshot()` clones under a read lock; readers never see a half-applied
//!   registration

use std::sync::{PoisonError, RwLock};

use crate::registry::{HandlerDescriptor, HandlerRef, RegistryError, RegistrySnapshot, RoutingRegistry};

#[derive(Debug)]
pub struct StaticRegistry {
    name: String,
    inner: RwLock<RegistrySnapshot>,
}

impl StaticRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(RegistrySnapshot::new()),
        }
    }

    /// Creates a registry pre-populated with `snapshot`.
    pub fn with_snapshot(name: impl Into<String>, snapshot: RegistrySnapshot) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(snapshot),
        }
    }

    pub fn register_route(&self, pattern: impl Into<String>, handler: impl Into<HandlerRef>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert_route(pattern, handler);
    }

    pub fn register_handler(&self, handler: impl Into<HandlerRef>, descriptor: HandlerDescriptor) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert_handler(handler, descriptor);
    }

    pub fn unregister_route(&self, pattern: &str) -> Option<HandlerRef> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_route(pattern)
    }
}

impl RoutingRegistry for StaticRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        Ok(self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
