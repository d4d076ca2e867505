//! Core module: parsing, validation, and predicate selection

pub mod context;
pub mod error;
pub mod extractors;
pub mod params;
pub mod predicate;
pub mod query;
pub mod sanitize;
pub mod schema;
pub mod sort;

pub use context::FilterContext;
pub use error::{FilterError, FilterResult};
pub use params::{FilterSpec, RawValue, RequestParams};
pub use predicate::Predicate;
pub use query::{Bound, Query};
pub use schema::{CastKind, EntitySchema, FilterOptions, TableSchema};
pub use sort::{OrderingClause, SortDirection};
