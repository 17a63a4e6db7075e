//! Pattern deduplication.
//!
//! # Responsibilities
//! - Suppress the implicit variants `p.*` and `p/` of a registered pattern `p`
//!
//! # Design Decisions
//! - Only the two fixed suffixes are considered, no general suffix matching
//! - A variant is removed only when its base is itself registered; orphan
//!   variants (`/bar/`, `/bar.*` without `/bar`) are kept as-is
//! - No base pattern is ever synthesized

use std::collections::BTreeSet;

/// Suffixes that the routing layer derives from a base pattern.
pub const IMPLICIT_SUFFIXES: [&str; 2] = [".*", "/"];

/// Returns the canonical subset of `patterns`.
pub fn find_unique_urls<'a, I>(patterns: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let inputs: BTreeSet<&str> = patterns.into_iter().collect();
    let mut result: BTreeSet<String> = inputs.iter().map(|p| p.to_string()).collect();

    for base in &inputs {
        for suffix in IMPLICIT_SUFFIXES {
            let extended = format!("{base}{suffix}");
            if inputs.contains(extended.as_str()) {
                result.remove(&extended);
            }
        }
    }

    result
}
