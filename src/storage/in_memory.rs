//! In-memory query execution for testing and development
//!
//! [`InMemoryQuery`] accumulates the constraints the filter core emits and
//! executes them over JSON rows. It mirrors what a real backend would do
//! with the same predicates: nested `->` field lookup, calendar-date
//! truncation for date bounds, case-insensitive substring matching, and a
//! stable multi-key sort in clause order.

use crate::core::query::{Bound, Query};
use crate::core::sort::SortDirection;
use chrono::NaiveDate;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
enum Constraint {
    Compare {
        path: String,
        bound: Bound,
        value: String,
    },
    CompareDate {
        path: String,
        bound: Bound,
        date: NaiveDate,
    },
    Equals {
        path: String,
        value: String,
    },
    EqualsNumber {
        path: String,
        value: f64,
    },
    EqualsBool {
        path: String,
        value: bool,
    },
    MemberOf {
        path: String,
        values: Vec<String>,
    },
    Matches {
        path: String,
        needle: String,
    },
}

/// In-memory [`Query`] implementation over `serde_json::Value` rows
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuery {
    constraints: Vec<Constraint>,
    orderings: Vec<(String, SortDirection)>,
}

impl InMemoryQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Accumulated ordering clauses, in precedence order
    pub fn orderings(&self) -> &[(String, SortDirection)] {
        &self.orderings
    }

    /// Filter and sort the given rows
    pub fn execute(&self, rows: Vec<Value>) -> Vec<Value> {
        let mut rows: Vec<Value> = rows
            .into_iter()
            .filter(|row| self.matches_row(row))
            .collect();

        if !self.orderings.is_empty() {
            rows.sort_by(|a, b| self.compare_rows(a, b));
        }

        rows
    }

    fn matches_row(&self, row: &Value) -> bool {
        self.constraints.iter().all(|constraint| match constraint {
            Constraint::Compare { path, bound, value } => {
                lookup(row, path).is_some_and(|field| {
                    let ordering = compare_scalar(&field, value);
                    bound_holds(*bound, ordering)
                })
            }
            Constraint::CompareDate { path, bound, date } => lookup(row, path)
                .and_then(|field| field_text(&field))
                .and_then(|text| truncate_to_date(&text))
                .is_some_and(|field_date| bound_holds(*bound, field_date.cmp(date))),
            Constraint::Equals { path, value } => lookup(row, path)
                .and_then(|field| field_text(&field))
                .is_some_and(|text| text == *value),
            Constraint::EqualsNumber { path, value } => lookup(row, path)
                .and_then(|field| field_number(&field))
                .is_some_and(|number| number == *value),
            Constraint::EqualsBool { path, value } => lookup(row, path)
                .and_then(|field| field_bool(&field))
                .is_some_and(|flag| flag == *value),
            Constraint::MemberOf { path, values } => lookup(row, path)
                .and_then(|field| field_text(&field))
                .is_some_and(|text| values.contains(&text)),
            Constraint::Matches { path, needle } => lookup(row, path)
                .and_then(|field| field_text(&field))
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
        })
    }

    fn compare_rows(&self, a: &Value, b: &Value) -> Ordering {
        for (path, direction) in &self.orderings {
            let ordering = match (lookup(a, path), lookup(b, path)) {
                (Some(left), Some(right)) => compare_fields(&left, &right),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl Query for InMemoryQuery {
    fn compare(&mut self, path: &str, bound: Bound, value: &str) {
        self.constraints.push(Constraint::Compare {
            path: path.to_string(),
            bound,
            value: value.to_string(),
        });
    }

    fn compare_date(&mut self, path: &str, bound: Bound, date: NaiveDate) {
        self.constraints.push(Constraint::CompareDate {
            path: path.to_string(),
            bound,
            date,
        });
    }

    fn equals(&mut self, path: &str, value: &str) {
        self.constraints.push(Constraint::Equals {
            path: path.to_string(),
            value: value.to_string(),
        });
    }

    fn equals_number(&mut self, path: &str, value: f64) {
        self.constraints.push(Constraint::EqualsNumber {
            path: path.to_string(),
            value,
        });
    }

    fn equals_bool(&mut self, path: &str, value: bool) {
        self.constraints.push(Constraint::EqualsBool {
            path: path.to_string(),
            value,
        });
    }

    fn member_of(&mut self, path: &str, values: &[String]) {
        self.constraints.push(Constraint::MemberOf {
            path: path.to_string(),
            values: values.to_vec(),
        });
    }

    fn matches(&mut self, path: &str, needle: &str) {
        self.constraints.push(Constraint::Matches {
            path: path.to_string(),
            needle: needle.to_string(),
        });
    }

    fn order_by(&mut self, path: &str, direction: SortDirection) {
        self.orderings.push((path.to_string(), direction));
    }
}

/// Resolve a `->`-separated path inside a JSON object
fn lookup(row: &Value, path: &str) -> Option<Value> {
    let mut current = row;
    for segment in path.split("->") {
        current = current.get(segment)?;
    }
    Some(current.clone())
}

fn field_text(field: &Value) -> Option<String> {
    match field {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_number(field: &Value) -> Option<f64> {
    match field {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn field_bool(field: &Value) -> Option<bool> {
    match field {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Compare a row field against a raw bound value
///
/// Numeric when both sides parse as numbers, lexicographic otherwise.
fn compare_scalar(field: &Value, value: &str) -> Ordering {
    if let (Some(left), Ok(right)) = (field_number(field), value.parse::<f64>()) {
        return left.partial_cmp(&right).unwrap_or(Ordering::Equal);
    }
    match field_text(field) {
        Some(text) => text.as_str().cmp(value),
        None => Ordering::Less,
    }
}

fn compare_fields(left: &Value, right: &Value) -> Ordering {
    if let (Some(a), Some(b)) = (field_number(left), field_number(right)) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    match (field_text(left), field_text(right)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Calendar-date truncation: the leading `YYYY-MM-DD` of a stored value
fn truncate_to_date(text: &str) -> Option<NaiveDate> {
    let prefix = text.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn bound_holds(bound: Bound, ordering: Ordering) -> bool {
    match bound {
        Bound::AtLeast => ordering != Ordering::Less,
        Bound::AtMost => ordering != Ordering::Greater,
    }
}
