//! Shared utilities for integration tests.

use std::path::{Path, PathBuf};

use route_catalogue::registry::{HandlerDescriptor, MethodDescriptor, StaticRegistry};

#[allow(dead_code)]
pub const API_KEY: &str = "test-key";

/// Registry file resembling a batch admin console.
pub const BATCH_REGISTRY: &str = r#"
[[routes]]
pattern = "/jobs"
handler = "jobController"

[[routes]]
pattern = "/jobs.*"
handler = "jobController"

[[routes]]
pattern = "/jobs/"
handler = "jobController"

[[routes]]
pattern = "/jobs/{jobName}"
handler = "jobController"

[[routes]]
pattern = "/admin/executions"
handler = "executionController"

[[routes]]
pattern = "/files"
handler = "/files"

[handlers.jobController]

[[handlers.jobController.methods]]
name = "jobs"
paths = ["/jobs"]

[[handlers.jobController.methods]]
name = "launch"
paths = ["/jobs/{jobName}"]
verbs = ["POST"]

[[handlers.jobController.methods]]
name = "details"
paths = ["/jobs/{jobName}"]
verbs = ["GET"]

[handlers.executionController]
type_prefixes = ["/admin/"]

[[handlers.executionController.methods]]
name = "stopAll"
paths = ["/executions"]
verbs = ["DELETE"]

[handlers."/files"]
"#;

/// Writes `content` to `name` inside `dir` and returns the path.
#[allow(dead_code)]
pub fn write_registry(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[allow(dead_code)]
pub fn method(name: &str, paths: &[&str], verbs: &[&str]) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        paths: paths.iter().map(|s| s.to_string()).collect(),
        verbs: verbs.iter().map(|s| s.to_string()).collect(),
    }
}

/// Registry with `count` endpoints named `/{prefix}{i}`, each accepting GET and POST.
#[allow(dead_code)]
pub fn populate(registry: &StaticRegistry, prefix: &str, count: usize) {
    for i in 0..count {
        let pattern = format!("/{prefix}{i}");
        let handler = format!("{prefix}-handler-{i}");
        registry.register_route(pattern.clone(), handler.as_str());
        registry.register_route(format!("{pattern}/"), handler.as_str());
        registry.register_handler(
            handler.as_str(),
            HandlerDescriptor {
                type_prefixes: vec![],
                methods: vec![method("handle", &[pattern.as_str()], &["GET", "POST"])],
            },
        );
    }
}
