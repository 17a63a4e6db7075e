//! Registry backed by a declarative TOML file.
//!
//! ```toml
//! [[routes]]
//! pattern = "/jobs"
//! handler = "jobController"
//!
//! [handlers.jobController]
//! type_prefixes = ["/"]
//!
//! [[handlers.jobController.methods]]
//! name = "list"
//! paths = ["/jobs"]
//! verbs = ["GET"]
//! ```
//!
//! The file is re-read on every snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::registry::{HandlerDescriptor, RegistryError, RegistrySnapshot, RouteEntry, RoutingRegistry};

/// On-disk layout of a registry file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegistryFile {
    routes: Vec<RouteEntry>,
    handlers: BTreeMap<String, HandlerDescriptor>,
}

#[derive(Debug, Clone)]
pub struct FileRegistry {
    name: String,
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses registry file contents.
pub fn parse_registry(content: &str, path: &Path) -> Result<RegistrySnapshot, RegistryError> {
    let file: RegistryFile = toml::from_str(content).map_err(|source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut snapshot = RegistrySnapshot::new();
    for entry in file.routes {
        if let Some(previous) = snapshot.handler_for(&entry.pattern) {
            tracing::debug!(
                path = %path.display(),
                pattern = %entry.pattern,
                previous = %previous,
                handler = %entry.handler,
                "Duplicate route in registry file, last entry wins"
            );
        }
        snapshot.insert_route(entry.pattern, entry.handler);
    }
    for (handler, descriptor) in file.handlers {
        snapshot.insert_handler(handler, descriptor);
    }
    Ok(snapshot)
}

impl RoutingRegistry for FileRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        let content = fs::read_to_string(&self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_registry(&content, &self.path)
    }
}
