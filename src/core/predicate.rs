//! Predicate selection
//!
//! Given a property's declared type and the shape of its request value,
//! exactly one predicate kind is chosen per property. Dispatch is ordered
//! because value shapes overlap: a bounds map on a temporal property is a
//! date range, the same map on a numeric property is a value range.

use crate::core::params::{BOUND_END, BOUND_MAX, BOUND_MIN, BOUND_START, RawValue};
use crate::core::query::{Bound, Query};
use crate::core::schema::{CastKind, EntitySchema, TEMPORAL_CASTS, top_level_segment};
use chrono::NaiveDate;
use tracing::trace;

/// A single constraint selected for one filter property
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact string equality
    ExactMatch(String),
    /// Exact numeric equality (not a range)
    NumericEquals(f64),
    /// Boolean equality
    BooleanEquals(bool),
    /// Inclusive value range; absent bounds impose no constraint
    RangeInclusive {
        min: Option<String>,
        max: Option<String>,
    },
    /// Inclusive range over the calendar-date truncation of the stored value
    DateRangeInclusive {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Membership test over an ordered list of values
    MembershipIn(Vec<String>),
    /// Case-insensitive "contains" match
    SubstringMatch(String),
}

/// Select the predicate for a property and its parsed value
///
/// First matching branch wins:
/// 1. temporal property (cast or timestamp column) → date range
/// 2. bounds map carrying `min`/`max` → value range
/// 3. list (or leftover bounds map) → membership
/// 4. boolean-cast property → boolean equality
/// 5. numeric literal on a non-string property → numeric equality
/// 6. anything else → case-insensitive substring match
pub fn select<S: EntitySchema>(schema: &S, property: &str, value: &RawValue) -> Predicate {
    if is_temporal(schema, property) {
        return Predicate::DateRangeInclusive {
            start: value.bound(BOUND_START).and_then(parse_date),
            end: value.bound(BOUND_END).and_then(parse_date),
        };
    }

    if let RawValue::Bounds(map) = value {
        if map.contains_key(BOUND_MIN) || map.contains_key(BOUND_MAX) {
            return Predicate::RangeInclusive {
                min: value.bound(BOUND_MIN).map(str::to_string),
                max: value.bound(BOUND_MAX).map(str::to_string),
            };
        }
    }

    match value {
        RawValue::List(values) => Predicate::MembershipIn(values.clone()),
        // A bounds map without meaningful keys degrades to membership over
        // its values, keeping array-shaped input error-free.
        RawValue::Bounds(map) => Predicate::MembershipIn(map.values().cloned().collect()),
        RawValue::Scalar(scalar) => select_scalar(schema, property, scalar),
    }
}

fn select_scalar<S: EntitySchema>(schema: &S, property: &str, scalar: &str) -> Predicate {
    if schema.has_cast(property, &[CastKind::Boolean]) {
        return Predicate::BooleanEquals(truthy(scalar));
    }

    if !schema.has_cast(property, &[CastKind::String]) {
        if let Some(number) = parse_numeric(scalar) {
            return Predicate::NumericEquals(number);
        }
    }

    Predicate::SubstringMatch(scalar.to_string())
}

/// Apply a selected predicate to a query under a sanitized storage path
///
/// Only present bounds produce constraints; an empty range predicate leaves
/// the query untouched.
pub fn apply<Q: Query>(query: &mut Q, path: &str, predicate: Predicate) {
    trace!(property = path, ?predicate, "applying predicate");
    match predicate {
        Predicate::ExactMatch(value) => query.equals(path, &value),
        Predicate::NumericEquals(value) => query.equals_number(path, value),
        Predicate::BooleanEquals(value) => query.equals_bool(path, value),
        Predicate::RangeInclusive { min, max } => {
            if let Some(min) = min {
                query.compare(path, Bound::AtLeast, &min);
            }
            if let Some(max) = max {
                query.compare(path, Bound::AtMost, &max);
            }
        }
        Predicate::DateRangeInclusive { start, end } => {
            if let Some(start) = start {
                query.compare_date(path, Bound::AtLeast, start);
            }
            if let Some(end) = end {
                query.compare_date(path, Bound::AtMost, end);
            }
        }
        Predicate::MembershipIn(values) => query.member_of(path, &values),
        Predicate::SubstringMatch(value) => query.matches(path, &value),
    }
}

fn is_temporal<S: EntitySchema>(schema: &S, property: &str) -> bool {
    let top = top_level_segment(property);
    schema.has_cast(property, TEMPORAL_CASTS)
        || top == schema.created_at_column()
        || top == schema.updated_at_column()
}

/// Coerce a request scalar to a boolean
///
/// Recognized tokens map explicitly; any other non-empty scalar is truthy.
fn truthy(scalar: &str) -> bool {
    match scalar.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" | "" => false,
        _ => !scalar.is_empty(),
    }
}

fn parse_numeric(scalar: &str) -> Option<f64> {
    scalar.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date(scalar: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(scalar, "%Y-%m-%d").ok()
}
