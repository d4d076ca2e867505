//! Entity metadata contracts and the property whitelist
//!
//! Filtering and sorting are opt-in per entity: a property whose top-level
//! segment is not declared in the entity's allow-lists is skipped silently,
//! whatever value it carries.

use crate::core::sanitize::PATH_SEPARATOR;
use std::collections::{HashMap, HashSet};

/// Declared cast of an entity property
///
/// Mirrors the attribute casts an entity declares in its metadata; predicate
/// selection keys off these rather than inspecting stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastKind {
    Date,
    DateTime,
    Timestamp,
    Boolean,
    Integer,
    Float,
    Decimal,
    String,
}

/// Casts that mark a property as temporal
pub const TEMPORAL_CASTS: &[CastKind] =
    &[CastKind::Date, CastKind::DateTime, CastKind::Timestamp];

/// Per-entity allow-lists for filtering and sorting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Top-level property names permitted in filters
    pub allowed_filters: HashSet<String>,
    /// Top-level property names permitted in sorts
    pub allowed_sorts: HashSet<String>,
}

/// Metadata contract an entity supplies to the filter core
///
/// Implementations are expected to be cheap and synchronous; the core reads
/// them once per request.
pub trait EntitySchema {
    /// The entity's filter/sort allow-lists
    fn filter_options(&self) -> &FilterOptions;

    /// Whether `property` declares one of the given casts
    fn has_cast(&self, property: &str, kinds: &[CastKind]) -> bool;

    /// Column holding the creation timestamp
    fn created_at_column(&self) -> &str {
        "created_at"
    }

    /// Column holding the last-update timestamp
    fn updated_at_column(&self) -> &str {
        "updated_at"
    }
}

/// Top-level segment of a dotted property path
///
/// The whitelist decision is made on this segment even when the full nested
/// path is what ultimately reaches storage.
pub fn top_level_segment(path: &str) -> &str {
    path.split(PATH_SEPARATOR).next().unwrap_or(path)
}

/// Whether the path's top-level segment is whitelisted for filtering
pub fn is_filterable<S: EntitySchema>(schema: &S, path: &str) -> bool {
    schema
        .filter_options()
        .allowed_filters
        .contains(top_level_segment(path))
}

/// Whether the path's top-level segment is whitelisted for sorting
pub fn is_sortable<S: EntitySchema>(schema: &S, path: &str) -> bool {
    schema
        .filter_options()
        .allowed_sorts
        .contains(top_level_segment(path))
}

/// A ready-made [`EntitySchema`] backed by static per-entity declarations
///
/// # Example
/// ```rust
/// use sift::core::schema::{CastKind, TableSchema};
///
/// let schema = TableSchema::new(["status", "amount", "created_at"], ["name"])
///     .with_cast("amount", CastKind::Float)
///     .with_cast("created_at", CastKind::DateTime);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    options: FilterOptions,
    casts: HashMap<String, CastKind>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl TableSchema {
    /// Create a schema from filter and sort allow-lists
    pub fn new<F, S>(allowed_filters: F, allowed_sorts: S) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            options: FilterOptions {
                allowed_filters: allowed_filters.into_iter().map(Into::into).collect(),
                allowed_sorts: allowed_sorts.into_iter().map(Into::into).collect(),
            },
            casts: HashMap::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Declare a cast for a property
    pub fn with_cast(mut self, property: impl Into<String>, kind: CastKind) -> Self {
        self.casts.insert(property.into(), kind);
        self
    }

    /// Override the canonical timestamp column names
    pub fn with_timestamp_columns(
        mut self,
        created_at: impl Into<String>,
        updated_at: impl Into<String>,
    ) -> Self {
        self.created_at = Some(created_at.into());
        self.updated_at = Some(updated_at.into());
        self
    }
}

impl EntitySchema for TableSchema {
    fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    fn has_cast(&self, property: &str, kinds: &[CastKind]) -> bool {
        self.casts
            .get(property)
            .is_some_and(|kind| kinds.contains(kind))
    }

    fn created_at_column(&self) -> &str {
        self.created_at.as_deref().unwrap_or("created_at")
    }

    fn updated_at_column(&self) -> &str {
        self.updated_at.as_deref().unwrap_or("updated_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::new(["status", "amount"], ["name", "author"])
            .with_cast("amount", CastKind::Float)
    }

    // === top_level_segment ===

    #[test]
    fn test_top_level_segment_plain() {
        assert_eq!(top_level_segment("status"), "status");
    }

    #[test]
    fn test_top_level_segment_nested() {
        assert_eq!(top_level_segment("author.name"), "author");
        assert_eq!(top_level_segment("a.b.c"), "a");
    }

    // === whitelist membership ===

    #[test]
    fn test_is_filterable_exact_match() {
        let schema = schema();
        assert!(is_filterable(&schema, "status"));
        assert!(!is_filterable(&schema, "secret"));
    }

    #[test]
    fn test_is_filterable_checks_top_level_of_nested_path() {
        let schema = TableSchema::new(["author"], Vec::<String>::new());
        assert!(is_filterable(&schema, "author.name"));
        assert!(!is_filterable(&schema, "publisher.name"));
    }

    #[test]
    fn test_is_filterable_case_sensitive() {
        let schema = schema();
        assert!(!is_filterable(&schema, "Status"));
    }

    #[test]
    fn test_is_sortable_independent_of_filterable() {
        let schema = schema();
        assert!(is_sortable(&schema, "name"));
        assert!(!is_sortable(&schema, "status"));
    }

    // === TableSchema ===

    #[test]
    fn test_has_cast_matches_declared_kind() {
        let schema = schema();
        assert!(schema.has_cast("amount", &[CastKind::Float, CastKind::Integer]));
        assert!(!schema.has_cast("amount", &[CastKind::Boolean]));
        assert!(!schema.has_cast("status", &[CastKind::Float]));
    }

    #[test]
    fn test_default_timestamp_columns() {
        let schema = schema();
        assert_eq!(schema.created_at_column(), "created_at");
        assert_eq!(schema.updated_at_column(), "updated_at");
    }

    #[test]
    fn test_overridden_timestamp_columns() {
        let schema = TableSchema::new(Vec::<String>::new(), Vec::<String>::new())
            .with_timestamp_columns("inserted_at", "modified_at");
        assert_eq!(schema.created_at_column(), "inserted_at");
        assert_eq!(schema.updated_at_column(), "modified_at");
    }

    #[test]
    fn test_temporal_casts_cover_date_kinds() {
        let schema = TableSchema::new(Vec::<String>::new(), Vec::<String>::new())
            .with_cast("published_on", CastKind::Date);
        assert!(schema.has_cast("published_on", TEMPORAL_CASTS));
    }
}
