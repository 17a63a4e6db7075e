//! Catalogue façade holding the published snapshot.
//!
//! # Responsibilities
//! - Pull a registry snapshot and build a new catalogue on `refresh()`
//! - Publish (urls, resources) together as one immutable snapshot
//! - Serve readers without blocking them on a refresh
//!
//! # Design Decisions
//! - Snapshot published through `ArcSwap`: one atomic pointer swap per refresh
//! - Refreshes serialised by a mutex (single writer)
//! - A failed registry read leaves the previous snapshot in place

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::catalogue::builder::{BuildOutput, CatalogueBuilder, Diagnostic};
use crate::catalogue::model::ResourceInfo;
use crate::observability::metrics;
use crate::registry::{RegistryError, RoutingRegistry};

/// Errors returned by [`Catalogue::refresh`].
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("routing registry {name} unavailable: {source}")]
    RegistryUnavailable {
        name: String,
        #[source]
        source: RegistryError,
    },
}

/// One complete, immutable catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueSnapshot {
    /// 0 before the first successful refresh.
    pub generation: u64,
    pub urls: BTreeSet<String>,
    pub resources: Vec<ResourceInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Catalogue {
    registry: Box<dyn RoutingRegistry>,
    builder: CatalogueBuilder,
    current: ArcSwap<CatalogueSnapshot>,
    refresh_lock: Mutex<()>,
}

impl Catalogue {
    /// Creates an empty catalogue. Call [`refresh`](Self::refresh) to populate it.
    pub fn new(registry: impl RoutingRegistry + 'static) -> Self {
        Self::with_builder(registry, CatalogueBuilder::default())
    }

    pub fn with_builder(registry: impl RoutingRegistry + 'static, builder: CatalogueBuilder) -> Self {
        Self {
            registry: Box::new(registry),
            builder,
            current: ArcSwap::from_pointee(CatalogueSnapshot::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Rebuilds the catalogue from a fresh registry snapshot.
    pub fn refresh(&self) -> Result<Arc<CatalogueSnapshot>, CatalogueError> {
        let _guard = self.refresh_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();

        let registry_snapshot = match self.registry.snapshot() {
            Ok(snapshot) => snapshot,
            Err(source) => {
                tracing::error!(
                    registry = self.registry.name(),
                    error = %source,
                    "Registry unavailable, keeping current catalogue"
                );
                metrics::record_refresh_failure(start);
                return Err(CatalogueError::RegistryUnavailable {
                    name: self.registry.name().to_string(),
                    source,
                });
            }
        };

        let BuildOutput {
            urls,
            resources,
            diagnostics,
        } = self.builder.build(&registry_snapshot);

        let next = Arc::new(CatalogueSnapshot {
            generation: self.current.load().generation + 1,
            urls,
            resources,
            diagnostics,
        });
        self.current.store(next.clone());

        metrics::record_refresh_success(&next, start);
        tracing::info!(
            registry = self.registry.name(),
            generation = next.generation,
            urls = next.urls.len(),
            resources = next.resources.len(),
            diagnostics = next.diagnostics.len(),
            "Catalogue refreshed"
        );
        Ok(next)
    }

    /// The current snapshot. Stays valid across later refreshes.
    pub fn snapshot(&self) -> Arc<CatalogueSnapshot> {
        self.current.load_full()
    }

    /// Sorted resources of the current snapshot.
    pub fn resources(&self) -> Vec<ResourceInfo> {
        self.current.load().resources.clone()
    }

    /// Canonical patterns of the current snapshot.
    pub fn url_patterns(&self) -> BTreeSet<String> {
        self.current.load().urls.clone()
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    pub fn registry_name(&self) -> &str {
        self.registry.name()
    }
}

impl std::fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalogue")
            .field("registry", &self.registry.name())
            .field("generation", &self.generation())
            .finish()
    }
}
