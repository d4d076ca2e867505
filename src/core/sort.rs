//! Sort directive planning
//!
//! Turns ordered `[-]path` directives into ordering clauses, running each
//! candidate through the same whitelist and sanitizer as filters. Directive
//! order is ORDER BY precedence and is preserved exactly.

use crate::core::error::FilterError;
use crate::core::sanitize::{sanitize, to_storage_path};
use crate::core::schema::{EntitySchema, is_sortable};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Prefix marking a descending directive
pub const DESCENDING_PREFIX: char = '-';

/// Sort direction of an ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A single ordering clause, ready for a [`Query`](crate::core::query::Query)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingClause {
    /// Sanitized property path in storage form
    pub path: String,
    pub direction: SortDirection,
}

/// Plan ordering clauses from raw sort directives
///
/// Non-sortable directives are skipped without error; a directive that
/// survives the whitelist but fails sanitization aborts planning. Approved
/// clauses keep the left-to-right precedence of the input.
pub fn plan<S: EntitySchema>(
    schema: &S,
    directives: &[String],
) -> Result<Vec<OrderingClause>, FilterError> {
    let mut clauses = Vec::with_capacity(directives.len());

    for directive in directives {
        let (direction, candidate) = match directive.strip_prefix(DESCENDING_PREFIX) {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, directive.as_str()),
        };

        if !is_sortable(schema, candidate) {
            debug!(property = candidate, "sort directive skipped: not sortable");
            continue;
        }

        let path = to_storage_path(candidate);
        sanitize(&path)?;
        clauses.push(OrderingClause { path, direction });
    }

    Ok(clauses)
}
