//! Query builder contract consumed by the filter core
//!
//! The core never talks to storage directly. It accumulates constraints on
//! any type implementing [`Query`] and hands the mutated builder back to the
//! caller. Paths passed to these methods are always sanitized, in storage
//! form (`->` nesting).

use crate::core::sort::SortDirection;
use chrono::NaiveDate;

/// Direction of an inclusive comparison bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `property >= value`
    AtLeast,
    /// `property <= value`
    AtMost,
}

/// A mutable predicate/ordering builder
///
/// Implement this for a store to make it a target for
/// [`FilterContext::build`](crate::core::context::FilterContext::build).
pub trait Query {
    /// Add an inclusive comparison against a raw bound value
    fn compare(&mut self, path: &str, bound: Bound, value: &str);

    /// Add an inclusive comparison against the calendar-date truncation of
    /// the stored value
    fn compare_date(&mut self, path: &str, bound: Bound, date: NaiveDate);

    /// Add an exact string equality constraint
    fn equals(&mut self, path: &str, value: &str);

    /// Add an exact numeric equality constraint
    fn equals_number(&mut self, path: &str, value: f64);

    /// Add a boolean equality constraint
    fn equals_bool(&mut self, path: &str, value: bool);

    /// Add a membership constraint (`property IN values`)
    fn member_of(&mut self, path: &str, values: &[String]);

    /// Add a case-insensitive substring match constraint
    fn matches(&mut self, path: &str, needle: &str);

    /// Append an ordering clause
    fn order_by(&mut self, path: &str, direction: SortDirection);
}
