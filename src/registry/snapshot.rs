//! Registry snapshot and raw handler metadata.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalogue::model::{HandlerRule, HttpVerb, MethodRule};
use crate::registry::RuleError;

/// Opaque handler identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerRef(pub String);

impl From<&str> for HandlerRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HandlerRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub pattern: String,
    pub handler: HandlerRef,
}

/// Unvalidated method-level metadata, as declared by the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodDescriptor {
    pub name: String,
    pub paths: Vec<String>,
    pub verbs: Vec<String>,
}

/// Unvalidated handler metadata, as declared by the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerDescriptor {
    pub type_prefixes: Vec<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl HandlerDescriptor {
    /// Validates the declared metadata.
    pub fn parse(&self) -> Result<HandlerRule, RuleError> {
        let type_prefixes: BTreeSet<String> = self
            .type_prefixes
            .iter()
            .map(|p| non_blank(p, "type prefix"))
            .collect::<Result<_, _>>()?;

        let methods = self
            .methods
            .iter()
            .map(|m| -> Result<MethodRule, RuleError> {
                Ok(MethodRule {
                    name: m.name.clone(),
                    paths: m
                        .paths
                        .iter()
                        .map(|p| non_blank(p, "method path"))
                        .collect::<Result<_, _>>()?,
                    verbs: m
                        .verbs
                        .iter()
                        .map(|v| v.parse::<HttpVerb>())
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HandlerRule {
            type_prefixes,
            methods,
        })
    }
}

fn non_blank(path: &str, what: &'static str) -> Result<String, RuleError> {
    if path.trim().is_empty() {
        Err(RuleError::BlankPath(what))
    } else {
        Ok(path.to_string())
    }
}

/// A point-in-time copy of a routing registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    routes: BTreeMap<String, HandlerRef>,
    handlers: BTreeMap<HandlerRef, HandlerDescriptor>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `pattern` to `handler`, replacing any previous mapping.
    pub fn insert_route(&mut self, pattern: impl Into<String>, handler: impl Into<HandlerRef>) {
        self.routes.insert(pattern.into(), handler.into());
    }

    /// Sets the metadata of `handler`, replacing any previous metadata.
    pub fn insert_handler(&mut self, handler: impl Into<HandlerRef>, descriptor: HandlerDescriptor) {
        self.handlers.insert(handler.into(), descriptor);
    }

    pub fn remove_route(&mut self, pattern: &str) -> Option<HandlerRef> {
        self.routes.remove(pattern)
    }

    /// All registered patterns, sorted.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn routes(&self) -> impl Iterator<Item = RouteEntry> + '_ {
        self.routes.iter().map(|(pattern, handler)| RouteEntry {
            pattern: pattern.clone(),
            handler: handler.clone(),
        })
    }

    pub fn handler_for(&self, pattern: &str) -> Option<&HandlerRef> {
        self.routes.get(pattern)
    }

    pub fn descriptor(&self, handler: &HandlerRef) -> Option<&HandlerDescriptor> {
        self.handlers.get(handler)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Merges `other` into `self`. Entries of `other` win on conflict.
    pub fn merge(&mut self, other: RegistrySnapshot) {
        self.routes.extend(other.routes);
        self.handlers.extend(other.handlers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(paths: &[&str], verbs: &[&str]) -> MethodDescriptor {
        MethodDescriptor {
            name: "m".into(),
            paths: paths.iter().map(|s| s.to_string()).collect(),
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_valid_descriptor() {
        let descriptor = HandlerDescriptor {
            type_prefixes: vec!["/admin/".into()],
            methods: vec![method(&["/jobs"], &["get", "POST", "GET"])],
        };

        let rule = descriptor.parse().unwrap();
        assert_eq!(rule.type_prefixes.len(), 1);
        assert_eq!(rule.methods.len(), 1);
        assert_eq!(
            rule.methods[0].verbs.iter().copied().collect::<Vec<_>>(),
            vec![HttpVerb::Get, HttpVerb::Post]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_verb() {
        let descriptor = HandlerDescriptor {
            type_prefixes: vec![],
            methods: vec![method(&["/ok"], &["GET"]), method(&["/jobs"], &["LAUNCH"])],
        };
        assert_eq!(descriptor.parse(), Err(RuleError::UnknownVerb("LAUNCH".into())));
    }

    #[test]
    fn test_parse_rejects_blank_paths() {
        let descriptor = HandlerDescriptor {
            type_prefixes: vec![" ".into()],
            methods: vec![],
        };
        assert_eq!(descriptor.parse(), Err(RuleError::BlankPath("type prefix")));

        let descriptor = HandlerDescriptor {
            type_prefixes: vec![],
            methods: vec![method(&[""], &[])],
        };
        assert_eq!(descriptor.parse(), Err(RuleError::BlankPath("method path")));
    }

    #[test]
    fn test_merge_later_wins() {
        let mut first = RegistrySnapshot::new();
        first.insert_route("/jobs", "a");
        first.insert_route("/steps", "a");
        first.insert_handler("a", HandlerDescriptor::default());

        let mut second = RegistrySnapshot::new();
        second.insert_route("/jobs", "b");
        second.insert_handler("b", HandlerDescriptor::default());

        first.merge(second);
        assert_eq!(first.handler_for("/jobs"), Some(&HandlerRef::from("b")));
        assert_eq!(first.handler_for("/steps"), Some(&HandlerRef::from("a")));
        assert_eq!(first.route_count(), 2);
        assert_eq!(first.handler_count(), 2);
    }
}
