//! Conditional request support for static assets
//!
//! `ETag` generation and `If-None-Match` matching. Rendered pages are
//! never cached; only raw assets get validators.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` for `content` using fast hashing.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check whether a client's `If-None-Match` header matches `etag`.
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// A match means the asset is unchanged and a 304 should be returned.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client.split(',').any(|e| e.trim() == etag || e.trim() == "*")
    })
}
