//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn registry configuration into a routing registry
//! - Build the catalogue and run its first refresh

use crate::catalogue::{Catalogue, CatalogueBuilder, CatalogueError};
use crate::config::CatalogueConfig;
use crate::registry::{CompositeRegistry, FileRegistry};

/// Registry over every configured source, merged in order.
pub fn registry_from_config(config: &CatalogueConfig) -> CompositeRegistry {
    let mut registry = CompositeRegistry::new("registry");
    for path in &config.registry.sources {
        registry.push(Box::new(FileRegistry::new(path.clone())));
    }
    registry
}

/// Builds the catalogue and populates it. Fails if the registry is unreadable.
pub fn build_catalogue(config: &CatalogueConfig) -> Result<Catalogue, CatalogueError> {
    let builder = CatalogueBuilder::new(tracing::info_span!(
        "catalogue",
        sources = config.registry.sources.len()
    ));
    let catalogue = Catalogue::with_builder(registry_from_config(config), builder);
    catalogue.refresh()?;
    Ok(catalogue)
}
