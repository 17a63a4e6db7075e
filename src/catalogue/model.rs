//! Catalogue data model.
//!
//! # Types
//! - `HttpVerb`: request method, with a fixed total order
//! - `ResourceInfo`: one (pattern, verb) pair of the output catalogue
//! - `HandlerRule` / `MethodRule`: validated routing metadata of a handler
//!
//! # Design Decisions
//! - `ResourceInfo` ordering is derived: pattern first, then verb
//! - Verb order is declaration order of `HttpVerb`
//! - Rules use `BTreeSet` so iteration (and logging) is deterministic

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registry::RuleError;

/// HTTP request method.
///
/// Variant order defines the secondary sort key of [`ResourceInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 8] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Head,
        HttpVerb::Options,
        HttpVerb::Patch,
        HttpVerb::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = RuleError;

    /// Parses a verb name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(RuleError::BlankVerb);
        }
        HttpVerb::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| RuleError::UnknownVerb(name.to_string()))
    }
}

/// A single entry of the resource catalogue.
///
/// Field order matters: the derived `Ord` sorts by pattern, then verb.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub pattern: String,
    #[serde(rename = "method")]
    pub verb: HttpVerb,
}

impl ResourceInfo {
    pub fn new(pattern: impl Into<String>, verb: HttpVerb) -> Self {
        Self {
            pattern: pattern.into(),
            verb,
        }
    }
}

impl fmt::Display for ResourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.pattern)
    }
}

/// A method-level routing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodRule {
    /// Name of the handling method, for diagnostics only.
    pub name: String,
    pub paths: BTreeSet<String>,
    /// Empty means implicit GET.
    pub verbs: BTreeSet<HttpVerb>,
}

/// Validated routing metadata of one handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerRule {
    /// Prefixes declared at the handler-type level.
    pub type_prefixes: BTreeSet<String>,
    /// Method-level rules. Empty means the handler itself is the endpoint.
    pub methods: Vec<MethodRule>,
}
