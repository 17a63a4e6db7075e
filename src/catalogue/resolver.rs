//! Method resolution.
//!
//! # Responsibilities
//! - Compose type-level prefixes with method-level paths
//! - Decide which verbs a canonical pattern accepts
//!
//! # Design Decisions
//! - Pure functions over validated `HandlerRule`s; lookup and diagnostics
//!   live in the builder
//! - A rule without verbs contributes an implicit GET
//! - A handler without method rules is itself the endpoint: one GET

use std::collections::BTreeSet;

use crate::catalogue::model::{HandlerRule, HttpVerb, MethodRule, ResourceInfo};

/// Full routes served by a method rule under the given type prefixes.
///
/// Each prefix loses one trailing `/` before the method path is appended.
/// Without type prefixes the method paths are used verbatim. A method rule
/// that declares no paths inherits the type prefixes unchanged.
pub fn computed_mappings(type_prefixes: &BTreeSet<String>, method: &MethodRule) -> BTreeSet<String> {
    if type_prefixes.is_empty() {
        return method.paths.clone();
    }
    if method.paths.is_empty() {
        return type_prefixes.clone();
    }

    let mut mappings = BTreeSet::new();
    for prefix in type_prefixes {
        let parent = prefix.strip_suffix('/').unwrap_or(prefix);
        for path in &method.paths {
            mappings.insert(format!("{parent}{path}"));
        }
    }
    mappings
}

/// Resources `key` resolves to under `rule`. Empty when no rule matches.
pub fn resolve_pattern(key: &str, rule: &HandlerRule) -> BTreeSet<ResourceInfo> {
    let mut result = BTreeSet::new();

    if rule.methods.is_empty() {
        result.insert(ResourceInfo::new(key, HttpVerb::Get));
        return result;
    }

    for method in &rule.methods {
        let mappings = computed_mappings(&rule.type_prefixes, method);
        tracing::trace!(
            method = %method.name,
            key = %key,
            computed = ?mappings,
            "Analysing mappings"
        );
        if !mappings.contains(key) {
            continue;
        }

        if method.verbs.is_empty() {
            tracing::trace!(pattern = %key, verb = %HttpVerb::Get, "Added implicit mapping");
            result.insert(ResourceInfo::new(key, HttpVerb::Get));
        } else {
            for verb in &method.verbs {
                tracing::trace!(pattern = %key, verb = %verb, "Added explicit mapping");
                result.insert(ResourceInfo::new(key, *verb));
            }
        }
    }

    result
}
