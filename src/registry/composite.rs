//! Registry merging several sources.
//!
//! # Design Decisions
//! - Sources are merged in order; later sources override earlier entries
//!   for the same pattern or handler
//! - Any unavailable source fails the whole snapshot, a partial merge could
//!   silently drop routes
//! - A composite without sources is unavailable rather than empty

use crate::registry::{RegistryError, RegistrySnapshot, RoutingRegistry};

pub struct CompositeRegistry {
    name: String,
    sources: Vec<Box<dyn RoutingRegistry>>,
}

impl CompositeRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
        }
    }

    /// Appends a source. It takes precedence over all sources added before it.
    pub fn with_source(mut self, source: impl RoutingRegistry + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn push(&mut self, source: Box<dyn RoutingRegistry>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for CompositeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRegistry")
            .field("name", &self.name)
            .field("sources", &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl RoutingRegistry for CompositeRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::Unavailable {
                name: self.name.clone(),
                reason: "no registry sources configured".to_string(),
            });
        }

        let mut merged = RegistrySnapshot::new();
        for source in &self.sources {
            let snapshot = source.snapshot()?;
            tracing::debug!(
                source = source.name(),
                routes = snapshot.route_count(),
                handlers = snapshot.handler_count(),
                "Merging registry source"
            );
            merged.merge(snapshot);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FileRegistry, HandlerRef, StaticRegistry};

    #[test]
    fn test_later_source_overrides() {
        let annotated = StaticRegistry::new("annotated");
        annotated.register_route("/jobs", "jobController");
        annotated.register_route("/steps", "stepController");

        let named = StaticRegistry::new("named");
        named.register_route("/jobs", "/jobs");

        let composite = CompositeRegistry::new("all")
            .with_source(annotated)
            .with_source(named);

        let snapshot = composite.snapshot().unwrap();
        assert_eq!(snapshot.handler_for("/jobs"), Some(&HandlerRef::from("/jobs")));
        assert_eq!(snapshot.handler_for("/steps"), Some(&HandlerRef::from("stepController")));
    }

    #[test]
    fn test_unavailable_source_fails_snapshot() {
        let composite = CompositeRegistry::new("all")
            .with_source(StaticRegistry::new("ok"))
            .with_source(FileRegistry::new("/nonexistent/registry.toml"));

        assert!(composite.snapshot().is_err());
        assert_eq!(composite.len(), 2);
    }

    #[test]
    fn test_no_sources_is_unavailable() {
        let composite = CompositeRegistry::new("all");
        assert!(composite.is_empty());

        let err = composite.snapshot().unwrap_err();
        assert!(matches!(err, RegistryError::Unavailable { ref name, .. } if name == "all"));
        assert_eq!(err.to_string(), "registry all unavailable: no registry sources configured");
    }
}
