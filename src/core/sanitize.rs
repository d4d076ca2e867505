//! Property path sanitization
//!
//! This is the single injection-prevention checkpoint of the crate. Every
//! property path is passed through [`sanitize`] immediately before it is
//! handed to a [`Query`](crate::core::query::Query), for filters and sorts
//! alike. A path that fails the grammar aborts the request; it never reaches
//! query construction.

use crate::core::error::FilterError;
use regex::Regex;
use std::sync::OnceLock;

/// Path separator used in the external (request) representation
pub const PATH_SEPARATOR: char = '.';

/// Nesting marker used in the storage representation
pub const NESTING_MARKER: &str = "->";

/// Validate a property path against the grammar
///
/// Accepted paths start with a letter or underscore (never a digit) and
/// contain only letters, digits, underscores, and the `->` nesting marker.
/// On success the path is returned unchanged; the caller is expected to have
/// already translated it with [`to_storage_path`].
pub fn sanitize(path: &str) -> Result<&str, FilterError> {
    static PATH_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        PATH_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_](?:->|[A-Za-z0-9_])*$").unwrap());

    if regex.is_match(path) {
        Ok(path)
    } else {
        Err(FilterError::InvalidPropertyName {
            name: path.to_string(),
        })
    }
}

/// Translate a dotted request path into the storage nesting form
///
/// Called exactly once per path: after whitelist approval, before
/// [`sanitize`].
pub fn to_storage_path(path: &str) -> String {
    path.replace(PATH_SEPARATOR, NESTING_MARKER)
}
