//! Request parameter parsing and shape normalization
//!
//! This stage turns the raw key/value pairs of a query string into typed
//! intermediate values. No validation happens here — malformed names are
//! caught later by the sanitizer, unknown names by the whitelist.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lower bound key of a date range (`filter[p][start]=...`)
pub const BOUND_START: &str = "start";
/// Upper bound key of a date range (`filter[p][end]=...`)
pub const BOUND_END: &str = "end";
/// Lower bound key of a numeric range (`filter[p][min]=...`)
pub const BOUND_MIN: &str = "min";
/// Upper bound key of a numeric range (`filter[p][max]=...`)
pub const BOUND_MAX: &str = "max";

/// A request-supplied filter value
///
/// The three shapes a value can take after normalization. Only the keys
/// `start`, `end`, `min`, and `max` of a [`RawValue::Bounds`] map are
/// meaningful to predicate selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A single string value
    Scalar(String),
    /// An ordered list of strings (from a comma-delimited value)
    List(Vec<String>),
    /// Named bounds (`start` / `end` / `min` / `max`)
    Bounds(IndexMap<String, String>),
}

impl RawValue {
    /// Get the value as a single string if possible
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RawValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a list if possible
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            RawValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Look up a named bound, treating missing and falsy values as absent
    ///
    /// A bound of `""` or `"0"` imposes no constraint, matching the
    /// when-present-else-skip policy of predicate selection.
    pub fn bound(&self, key: &str) -> Option<&str> {
        match self {
            RawValue::Bounds(map) => map
                .get(key)
                .map(String::as_str)
                .filter(|s| !s.is_empty() && *s != "0"),
            _ => None,
        }
    }

    /// Check whether this value carries a `min` or `max` bound
    pub fn has_range_bounds(&self) -> bool {
        self.bound(BOUND_MIN).is_some() || self.bound(BOUND_MAX).is_some()
    }
}

/// Parsed filter map: property path → value, insertion order preserved
pub type FilterSpec = IndexMap<String, RawValue>;

/// Raw filter and sort parameters extracted from a request
///
/// This is the read-only input shape of the core. It can be built directly
/// from decoded query pairs with [`RequestParams::from_pairs`], or extracted
/// from an axum request (see `core::extractors`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// `filter[<path>]` values, keyed by path
    pub filters: IndexMap<String, RawValue>,
    /// `sort[]` directives, in request order
    pub sorts: Vec<String>,
}

impl RequestParams {
    /// Group decoded query pairs into filter and sort parameters
    ///
    /// Recognized keys:
    /// - `filter[<path>]=<value>` — scalar filter (last occurrence wins)
    /// - `filter[<path>][<bound>]=<value>` — named bound
    /// - `sort[]=<[-]path>` — sort directive, repeatable
    ///
    /// Anything else is ignored: shared query strings routinely carry
    /// unrelated parameters and they must not break filtering.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            match bracket_segments(&key) {
                ("sort", segments) if segments == [""] => {
                    params.sorts.push(value);
                }
                ("filter", segments) => match segments.as_slice() {
                    [path] if !path.is_empty() => {
                        params
                            .filters
                            .insert((*path).to_string(), RawValue::Scalar(value));
                    }
                    [path, bound] if !path.is_empty() && !bound.is_empty() => {
                        let entry = params
                            .filters
                            .entry((*path).to_string())
                            .or_insert_with(|| RawValue::Bounds(IndexMap::new()));
                        // A scalar seen earlier for the same path is replaced.
                        if !matches!(entry, RawValue::Bounds(_)) {
                            *entry = RawValue::Bounds(IndexMap::new());
                        }
                        if let RawValue::Bounds(map) = entry {
                            map.insert((*bound).to_string(), value);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        params
    }
}

/// Split a bracketed query key into its base and bracket segments
///
/// `filter[created_at][start]` → `("filter", ["created_at", "start"])`.
fn bracket_segments(key: &str) -> (&str, Vec<&str>) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new());
    };
    let base = &key[..open];
    let mut segments = Vec::new();
    let mut rest = &key[open..];

    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            // Unbalanced bracket: treat the key as unrecognized.
            return (key, Vec::new());
        };
        segments.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }

    if rest.is_empty() {
        (base, segments)
    } else {
        // Trailing junk after the last bracket: unrecognized.
        (key, Vec::new())
    }
}

/// Normalize raw parameters into a parsed filter spec and sort list
///
/// The only transformation is comma-splitting: a scalar containing a comma
/// that yields more than one non-empty segment becomes a [`RawValue::List`].
/// Lists and bounds pass through unchanged, as do sort directives.
pub fn parse(
    filter_params: IndexMap<String, RawValue>,
    sort_params: Vec<String>,
) -> (FilterSpec, Vec<String>) {
    let filters = filter_params
        .into_iter()
        .map(|(path, value)| (path, split_csv(value)))
        .collect();
    (filters, sort_params)
}

fn split_csv(value: RawValue) -> RawValue {
    match value {
        RawValue::Scalar(s) if s.contains(',') => {
            let segments: Vec<String> = s
                .split(',')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect();
            if segments.len() > 1 {
                RawValue::List(segments)
            } else {
                RawValue::Scalar(s)
            }
        }
        other => other,
    }
}
