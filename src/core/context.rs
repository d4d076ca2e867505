//! Request-scoped filter context
//!
//! The façade that owns one request's parsed filters and sorts. It is built
//! once, never mutated afterwards, and can apply its specs to any number of
//! query builders — `build` only reads.

use crate::core::error::FilterError;
use crate::core::params::{self, FilterSpec, RawValue, RequestParams};
use crate::core::predicate;
use crate::core::query::Query;
use crate::core::sanitize::{PATH_SEPARATOR, sanitize, to_storage_path};
use crate::core::schema::{EntitySchema, is_filterable};
use crate::core::sort::{self, DESCENDING_PREFIX, SortDirection};
use tracing::debug;

/// Parsed filters and sorts for one request against one entity
///
/// # Example
/// ```rust,ignore
/// let params = RequestParams::from_pairs(pairs);
/// let context = FilterContext::new(&schema, params);
/// let query = context.build(InMemoryQuery::new())?;
/// ```
#[derive(Debug)]
pub struct FilterContext<'a, S: EntitySchema> {
    schema: &'a S,
    filters: FilterSpec,
    sorts: Vec<String>,
}

impl<'a, S: EntitySchema> FilterContext<'a, S> {
    /// Parse request parameters into a context for the given entity schema
    pub fn new(schema: &'a S, request: RequestParams) -> Self {
        let (filters, sorts) = params::parse(request.filters, request.sorts);
        Self {
            schema,
            filters,
            sorts,
        }
    }

    /// The parsed filter map
    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// The raw sort directives, in request order
    pub fn sorts(&self) -> &[String] {
        &self.sorts
    }

    /// Apply all whitelisted filters and sorts to a query builder
    ///
    /// Non-whitelisted properties are skipped silently. The first property
    /// that survives the whitelist but fails sanitization aborts the whole
    /// request with [`FilterError::InvalidPropertyName`]; no partially
    /// constrained query is returned. Calling `build` again with another
    /// builder re-applies the same specs.
    pub fn build<Q: Query>(&self, mut query: Q) -> Result<Q, FilterError> {
        for (property, value) in &self.filters {
            if !is_filterable(self.schema, property) {
                debug!(property = %property, "filter skipped: not filterable");
                continue;
            }
            let path = to_storage_path(property);
            sanitize(&path)?;
            let predicate = predicate::select(self.schema, property, value);
            predicate::apply(&mut query, &path, predicate);
        }

        for clause in sort::plan(self.schema, &self.sorts)? {
            query.order_by(&clause.path, clause.direction);
        }

        Ok(query)
    }

    /// Check sort state
    ///
    /// With `None`, true iff the request supplied no sort directives at all.
    /// With a property, true iff that property appears among the directives,
    /// ascending or descending.
    pub fn is_sort(&self, property: Option<&str>) -> bool {
        match property {
            None => self.sorts.is_empty(),
            Some(name) => self.sorts.iter().any(|directive| {
                directive == name
                    || directive
                        .strip_prefix(DESCENDING_PREFIX)
                        .is_some_and(|rest| rest == name)
            }),
        }
    }

    /// Reported sort direction for a property
    ///
    /// Ascending iff the bare (non-prefixed) property name appears among the
    /// directives. This is a presence check, not a resolved direction: a
    /// property absent from the directives also reports descending, same as
    /// an explicit `-property`. Kept as-is for link-toggling round trips.
    pub fn sort_direction(&self, property: &str) -> SortDirection {
        if self.sorts.iter().any(|directive| directive == property) {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// The directive string that toggles the current sort for a property
    ///
    /// Intended for building "click to re-sort" links: using the returned
    /// directive as the sole sort flips what [`sort_direction`] reported.
    ///
    /// [`sort_direction`]: FilterContext::sort_direction
    pub fn revert_sort(&self, property: &str) -> String {
        match self.sort_direction(property) {
            SortDirection::Asc => format!("{DESCENDING_PREFIX}{property}"),
            SortDirection::Desc => property.to_string(),
        }
    }

    /// Dotted-path lookup into the parsed filter map
    ///
    /// `filter("created_at.start")` descends into the bounds of the
    /// `created_at` filter and returns the `start` value as a scalar.
    pub fn filter(&self, property: &str) -> Option<RawValue> {
        let mut segments = property.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.filters.get(first)?.clone();

        for segment in segments {
            match current {
                RawValue::Bounds(map) => {
                    current = RawValue::Scalar(map.get(segment)?.clone());
                }
                _ => return None,
            }
        }

        Some(current)
    }
}
