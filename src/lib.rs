//! # Sift
//!
//! Safe translation of untrusted request filter/sort parameters into typed
//! query predicates, gated by a per-entity whitelist.
//!
//! ## How it works
//!
//! - **Parse**: raw query pairs become a typed [`RequestParams`]: scalars,
//!   comma-split lists, and named `start`/`end`/`min`/`max` bounds
//! - **Whitelist**: each property's top-level segment is checked against the
//!   entity's allow-lists; unknown properties are skipped silently
//! - **Sanitize**: surviving paths must match a strict grammar before they
//!   reach query construction — the single injection checkpoint
//! - **Select**: one predicate per property, chosen from the property's
//!   declared cast and the value's shape (date range, value range,
//!   membership, boolean, numeric equality, substring match)
//!
//! ## Quick start
//!
//! ```rust
//! use sift::prelude::*;
//!
//! let schema = TableSchema::new(["status", "created_at"], ["name"])
//!     .with_cast("status", CastKind::String);
//!
//! let params = RequestParams::from_pairs(vec![
//!     ("filter[status]".to_string(), "active".to_string()),
//!     ("filter[created_at][start]".to_string(), "2024-01-01".to_string()),
//!     ("sort[]".to_string(), "-name".to_string()),
//! ]);
//!
//! let context = FilterContext::new(&schema, params);
//! let query = context.build(InMemoryQuery::new()).expect("valid paths");
//! ```
//!
//! [`RequestParams`]: crate::core::params::RequestParams

pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        context::FilterContext,
        error::{FilterError, FilterResult},
        params::{FilterSpec, RawValue, RequestParams},
        predicate::Predicate,
        query::{Bound, Query},
        schema::{CastKind, EntitySchema, FilterOptions, TableSchema},
        sort::{OrderingClause, SortDirection},
    };

    pub use crate::storage::InMemoryQuery;

    // === External dependencies ===
    pub use chrono::NaiveDate;
}
