//! End-to-end catalogue builds over file and in-memory registries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use route_catalogue::catalogue::{Catalogue, CatalogueError, DiagnosticKind};
use route_catalogue::config::CatalogueConfig;
use route_catalogue::lifecycle::build_catalogue;
use route_catalogue::registry::{
    CompositeRegistry, FileRegistry, HandlerDescriptor, RegistrySnapshot, StaticRegistry,
};
use route_catalogue::{HttpVerb, ResourceInfo};

mod common;

fn listing(catalogue: &Catalogue) -> Vec<(String, HttpVerb)> {
    catalogue
        .resources()
        .into_iter()
        .map(|r| (r.pattern, r.verb))
        .collect()
}

#[test]
fn test_file_registry_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_registry(dir.path(), "registry.toml", common::BATCH_REGISTRY);

    let catalogue = Catalogue::new(FileRegistry::new(path));
    catalogue.refresh().unwrap();

    assert_eq!(
        catalogue.url_patterns().into_iter().collect::<Vec<_>>(),
        vec!["/admin/executions", "/files", "/jobs", "/jobs/{jobName}"]
    );
    assert_eq!(
        listing(&catalogue),
        vec![
            ("/admin/executions".to_string(), HttpVerb::Delete),
            ("/files".to_string(), HttpVerb::Get),
            ("/jobs".to_string(), HttpVerb::Get),
            ("/jobs/{jobName}".to_string(), HttpVerb::Get),
            ("/jobs/{jobName}".to_string(), HttpVerb::Post),
        ]
    );
    assert!(catalogue.snapshot().diagnostics.is_empty());
}

#[test]
fn test_refresh_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_registry(dir.path(), "registry.toml", common::BATCH_REGISTRY);
    let catalogue = Catalogue::new(FileRegistry::new(path));

    let first = catalogue.refresh().unwrap();
    let second = catalogue.refresh().unwrap();

    assert_eq!(first.resources, second.resources);
    assert_eq!(first.urls, second.urls);
    assert_eq!(
        serde_json::to_string(&first.resources).unwrap(),
        serde_json::to_string(&second.resources).unwrap()
    );
    assert_eq!(second.generation, first.generation + 1);
}

#[test]
fn test_unavailable_registry_keeps_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_registry(dir.path(), "registry.toml", common::BATCH_REGISTRY);
    let catalogue = Catalogue::new(FileRegistry::new(path.clone()));
    let before = catalogue.refresh().unwrap();

    std::fs::remove_file(&path).unwrap();
    let err = catalogue.refresh().unwrap_err();
    assert!(matches!(err, CatalogueError::RegistryUnavailable { .. }));
    assert_eq!(*catalogue.snapshot(), *before);

    std::fs::write(&path, "not [valid toml").unwrap();
    assert!(catalogue.refresh().is_err());
    assert_eq!(catalogue.generation(), before.generation);
}

#[test]
fn test_malformed_handler_degrades_catalogue() {
    let registry = StaticRegistry::new("static");
    registry.register_route("/good", "good");
    registry.register_handler("good", HandlerDescriptor::default());
    registry.register_route("/bad", "bad");
    registry.register_handler(
        "bad",
        HandlerDescriptor {
            type_prefixes: vec![],
            methods: vec![common::method("bad", &["/bad"], &["GET", "YEET"])],
        },
    );

    let catalogue = Catalogue::new(registry);
    let snapshot = catalogue.refresh().unwrap();

    assert_eq!(snapshot.resources, vec![ResourceInfo::new("/good", HttpVerb::Get)]);
    assert_eq!(snapshot.urls.len(), 2);
    assert_eq!(snapshot.diagnostics.len(), 1);
    assert_eq!(snapshot.diagnostics[0].kind, DiagnosticKind::MalformedRuleMetadata);
    assert_eq!(snapshot.diagnostics[0].detail, "unknown HTTP verb \"YEET\"");
}

#[test]
fn test_composite_sources_override_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = common::write_registry(dir.path(), "base.toml", common::BATCH_REGISTRY);
    let overrides = common::write_registry(
        dir.path(),
        "overrides.toml",
        r#"
        [[routes]]
        pattern = "/files"
        handler = "fileController"

        [handlers.fileController]
        [[handlers.fileController.methods]]
        paths = ["/files"]
        verbs = ["PUT", "GET"]
        "#,
    );

    let registry = CompositeRegistry::new("merged")
        .with_source(FileRegistry::new(base))
        .with_source(FileRegistry::new(overrides));
    let catalogue = Catalogue::new(registry);
    catalogue.refresh().unwrap();

    let files: Vec<_> = catalogue
        .resources()
        .into_iter()
        .filter(|r| r.pattern == "/files")
        .map(|r| r.verb)
        .collect();
    assert_eq!(files, vec![HttpVerb::Get, HttpVerb::Put]);
}

#[test]
fn test_build_catalogue_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_registry(dir.path(), "registry.toml", common::BATCH_REGISTRY);

    let mut config = CatalogueConfig::default();
    config.registry.sources.push(path);

    let catalogue = build_catalogue(&config).unwrap();
    assert_eq!(catalogue.generation(), 1);
    assert_eq!(catalogue.resources().len(), 5);

    config.registry.sources.push(dir.path().join("missing.toml"));
    assert!(build_catalogue(&config).is_err());
}

#[test]
fn test_readers_see_whole_snapshots() {
    let registry = Arc::new(StaticRegistry::new("static"));
    common::populate(&registry, "small", 3);
    let small = registry_snapshot(&registry);

    let large_registry = StaticRegistry::new("large");
    common::populate(&large_registry, "large", 40);
    let large = registry_snapshot(&large_registry);

    let catalogue = Arc::new(Catalogue::new(registry.clone()));
    catalogue.refresh().unwrap();

    let done = AtomicBool::new(false);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let snapshot = catalogue.snapshot();
                    // 3 or 40 endpoints, two verbs each, never a mix
                    assert!(snapshot.urls.len() == 3 || snapshot.urls.len() == 40);
                    assert_eq!(snapshot.resources.len(), snapshot.urls.len() * 2);
                    let prefix = if snapshot.urls.len() == 3 { "/small" } else { "/large" };
                    assert!(snapshot.resources.iter().all(|r| r.pattern.starts_with(prefix)));
                }
            });
        }

        for i in 0..200 {
            let next = if i % 2 == 0 { &large } else { &small };
            replace_contents(&registry, next);
            catalogue.refresh().unwrap();
        }
        done.store(true, Ordering::Relaxed);
    });

    assert_eq!(catalogue.generation(), 201);
}

fn registry_snapshot(registry: &StaticRegistry) -> RegistrySnapshot {
    use route_catalogue::RoutingRegistry;
    registry.snapshot().unwrap()
}

fn replace_contents(registry: &StaticRegistry, snapshot: &RegistrySnapshot) {
    use route_catalogue::RoutingRegistry;
    for pattern in registry
        .snapshot()
        .unwrap()
        .patterns()
        .map(str::to_string)
        .collect::<Vec<_>>()
    {
        registry.unregister_route(&pattern);
    }
    for entry in snapshot.routes() {
        let descriptor = snapshot.descriptor(&entry.handler).cloned().unwrap_or_default();
        registry.register_handler(entry.handler.clone(), descriptor);
        registry.register_route(entry.pattern, entry.handler);
    }
}
