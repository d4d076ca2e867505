//! Storage-facing query implementations

pub mod in_memory;

pub use in_memory::InMemoryQuery;
