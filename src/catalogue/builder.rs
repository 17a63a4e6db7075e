//! Catalogue construction from a registry snapshot.
//!
//! # Data Flow
//! ```text
//! RegistrySnapshot
//!     → dedup.rs (canonical patterns)
//!     → HandlerDescriptor::parse (validated rules, malformed handlers skipped)
//!     → resolver.rs (verbs per canonical pattern)
//!     → BuildOutput (urls, sorted resources, diagnostics)
//! ```
//!
//! # Design Decisions
//! - Per-handler problems never abort a build; they become diagnostics
//! - Diagnostics are logged inside the span the builder was constructed with

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::Span;

use crate::catalogue::dedup::find_unique_urls;
use crate::catalogue::model::{HandlerRule, ResourceInfo};
use crate::catalogue::resolver::resolve_pattern;
use crate::registry::{HandlerRef, RegistrySnapshot};

/// Kind of non-fatal problem found while building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A canonical pattern produced no resources.
    UnresolvedPattern,
    /// A handler's declared metadata is invalid; its rules were skipped.
    MalformedRuleMetadata,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnresolvedPattern => "unresolved_pattern",
            DiagnosticKind::MalformedRuleMetadata => "malformed_rule_metadata",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub handler: HandlerRef,
    pub detail: String,
}

/// Result of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub urls: BTreeSet<String>,
    pub resources: Vec<ResourceInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns registry snapshots into catalogues.
#[derive(Debug, Clone)]
pub struct CatalogueBuilder {
    span: Span,
}

impl Default for CatalogueBuilder {
    fn default() -> Self {
        Self::new(tracing::info_span!("catalogue"))
    }
}

impl CatalogueBuilder {
    /// Creates a builder that reports inside `span`.
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn build(&self, snapshot: &RegistrySnapshot) -> BuildOutput {
        let _entered = self.span.enter();

        let urls = find_unique_urls(snapshot.patterns());
        let mut diagnostics = Vec::new();
        let rules = parse_rules(snapshot, &urls, &mut diagnostics);

        let mut resources = BTreeSet::new();
        for key in &urls {
            let Some(handler) = snapshot.handler_for(key) else {
                continue;
            };
            let rule = match rules.get(handler) {
                Some(Some(rule)) => rule,
                // Malformed, already reported once for the handler.
                Some(None) => continue,
                None => {
                    tracing::warn!(pattern = %key, handler = %handler, "No metadata for handler");
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnresolvedPattern,
                        pattern: Some(key.clone()),
                        handler: handler.clone(),
                        detail: "handler has no routing metadata".to_string(),
                    });
                    continue;
                }
            };

            let resolved = resolve_pattern(key, rule);
            if resolved.is_empty() {
                tracing::warn!(pattern = %key, handler = %handler, "No handler rule matches pattern");
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnresolvedPattern,
                    pattern: Some(key.clone()),
                    handler: handler.clone(),
                    detail: "no method rule matches the pattern".to_string(),
                });
            }
            resources.extend(resolved);
        }

        tracing::debug!(
            routes = snapshot.route_count(),
            urls = urls.len(),
            resources = resources.len(),
            diagnostics = diagnostics.len(),
            "Catalogue built"
        );

        BuildOutput {
            urls,
            resources: resources.into_iter().collect(),
            diagnostics,
        }
    }
}

/// Validates the metadata of every handler referenced by a canonical pattern.
/// `None` marks a malformed handler.
fn parse_rules(
    snapshot: &RegistrySnapshot,
    urls: &BTreeSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<HandlerRef, Option<HandlerRule>> {
    let mut rules = BTreeMap::new();
    for key in urls {
        let Some(handler) = snapshot.handler_for(key) else {
            continue;
        };
        if rules.contains_key(handler) {
            continue;
        }
        let Some(descriptor) = snapshot.descriptor(handler) else {
            continue;
        };
        match descriptor.parse() {
            Ok(rule) => {
                rules.insert(handler.clone(), Some(rule));
            }
            Err(e) => {
                tracing::warn!(handler = %handler, error = %e, "Skipping malformed handler rules");
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::MalformedRuleMetadata,
                    pattern: None,
                    handler: handler.clone(),
                    detail: e.to_string(),
                });
                rules.insert(handler.clone(), None);
            }
        }
    }
    rules
}
