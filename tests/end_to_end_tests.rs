//! End-to-end tests: query string → parsed context → predicates → rows
//!
//! These tests run the whole pipeline the way a handler would: extract
//! request parameters, build a filter context against an entity schema,
//! apply it to an in-memory query, and execute over JSON rows.

use serde_json::{Value, json};
use sift::prelude::*;

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn orders_schema() -> TableSchema {
    TableSchema::new(
        ["status", "amount", "paid", "created_at", "customer"],
        ["amount", "created_at", "customer"],
    )
    .with_cast("status", CastKind::String)
    .with_cast("amount", CastKind::Float)
    .with_cast("paid", CastKind::Boolean)
}

fn orders() -> Vec<Value> {
    vec![
        json!({"status": "active", "amount": 120.0, "paid": true,
               "created_at": "2024-02-10T09:00:00Z",
               "customer": {"name": "Acme"}}),
        json!({"status": "active", "amount": 40.0, "paid": false,
               "created_at": "2023-11-02T16:45:00Z",
               "customer": {"name": "Globex"}}),
        json!({"status": "archived", "amount": 75.0, "paid": true,
               "created_at": "2024-05-20T12:00:00Z",
               "customer": {"name": "Initech"}}),
    ]
}

fn run(schema: &TableSchema, query_pairs: &[(&str, &str)]) -> Vec<Value> {
    let params = RequestParams::from_pairs(pairs(query_pairs));
    let context = FilterContext::new(schema, params);
    let query = context.build(InMemoryQuery::new()).expect("should build");
    query.execute(orders())
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_reference_request_shape() {
    // filter[status]=active & filter[created_at][start]=2024-01-01 & sort[]=-name
    // status is string-cast → substring match; created_at gets a date lower
    // bound; the sort key is outside the allow-list and is dropped.
    let schema = TableSchema::new(["status", "created_at"], ["name"])
        .with_cast("status", CastKind::String);
    let params = RequestParams::from_pairs(pairs(&[
        ("filter[status]", "active"),
        ("filter[created_at][start]", "2024-01-01"),
        ("sort[]", "-name"),
    ]));
    let context = FilterContext::new(&schema, params);
    let query = context.build(InMemoryQuery::new()).expect("should build");

    assert_eq!(query.constraint_count(), 2);
    assert_eq!(
        query.orderings(),
        [("name".to_string(), SortDirection::Desc)]
    );

    let result = query.execute(orders());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["status"], "active");
    assert_eq!(result[0]["customer"]["name"], "Acme");
}

#[test]
fn test_substring_filter_matches_case_insensitively() {
    let schema = orders_schema();
    let result = run(&schema, &[("filter[status]", "ACT")]);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_numeric_equality_filter() {
    let schema = orders_schema();
    let result = run(&schema, &[("filter[amount]", "75")]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["status"], "archived");
}

#[test]
fn test_boolean_filter() {
    let schema = orders_schema();
    let result = run(&schema, &[("filter[paid]", "false")]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["customer"]["name"], "Globex");
}

#[test]
fn test_range_filter_lower_bound_only() {
    let schema = orders_schema();
    let result = run(&schema, &[("filter[amount][min]", "75")]);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_range_filter_both_bounds() {
    let schema = orders_schema();
    let result = run(
        &schema,
        &[("filter[amount][min]", "50"), ("filter[amount][max]", "100")],
    );
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["customer"]["name"], "Initech");
}

#[test]
fn test_date_range_filter() {
    let schema = orders_schema();
    let result = run(
        &schema,
        &[
            ("filter[created_at][start]", "2024-01-01"),
            ("filter[created_at][end]", "2024-03-31"),
        ],
    );
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["customer"]["name"], "Acme");
}

#[test]
fn test_membership_filter_from_csv() {
    let schema = orders_schema();
    let result = run(&schema, &[("filter[status]", "archived,cancelled")]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["status"], "archived");
}

#[test]
fn test_nested_property_filter_and_sort() {
    let schema = orders_schema();
    let params = RequestParams::from_pairs(pairs(&[
        ("filter[customer.name]", "acme"),
        ("sort[]", "customer.name"),
    ]));
    let context = FilterContext::new(&schema, params);
    let query = context.build(InMemoryQuery::new()).expect("should build");
    assert_eq!(
        query.orderings(),
        [("customer->name".to_string(), SortDirection::Asc)]
    );
    let result = query.execute(orders());
    assert_eq!(result.len(), 1);
}

#[test]
fn test_sort_precedence_is_left_to_right() {
    let schema = TableSchema::new(Vec::<&str>::new(), ["status", "amount"]);
    let params = RequestParams::from_pairs(pairs(&[
        ("sort[]", "-status"),
        ("sort[]", "amount"),
    ]));
    let context = FilterContext::new(&schema, params);
    let query = context.build(InMemoryQuery::new()).expect("should build");
    let result = query.execute(orders());
    // status descending first ("archived" sorts after "active"), then the
    // two active rows tie-break on ascending amount.
    assert_eq!(result[0]["status"], "archived");
    assert_eq!(result[1]["amount"], 40.0);
    assert_eq!(result[2]["amount"], 120.0);
}

// =============================================================================
// Whitelist and sanitization behavior
// =============================================================================

#[test]
fn test_non_whitelisted_filter_is_silently_ignored() {
    let schema = orders_schema();
    let result = run(&schema, &[("filter[password]", "x"), ("filter[paid]", "true")]);
    // Only the paid filter applies: 2 of 3 rows, not zero.
    assert_eq!(result.len(), 2);
}

#[test]
fn test_non_whitelisted_filter_any_shape_no_error() {
    let schema = orders_schema();
    for (key, value) in [
        ("filter[secret]", "a,b,c"),
        ("filter[secret][min]", "1"),
        ("filter[secret][start]", "2024-01-01"),
    ] {
        let result = run(&schema, &[(key, value)]);
        assert_eq!(result.len(), 3, "{key} should be inert");
    }
}

#[test]
fn test_malformed_whitelisted_name_aborts_build() {
    let schema = TableSchema::new(["bad name"], Vec::<&str>::new());
    let params = RequestParams::from_pairs(pairs(&[("filter[bad name]", "x")]));
    let context = FilterContext::new(&schema, params);
    let err = context
        .build(InMemoryQuery::new())
        .expect_err("should reject");
    assert!(matches!(err, FilterError::InvalidPropertyName { .. }));
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
}

#[test]
fn test_build_is_repeatable_on_fresh_queries() {
    let schema = orders_schema();
    let params = RequestParams::from_pairs(pairs(&[("filter[paid]", "true")]));
    let context = FilterContext::new(&schema, params);

    let first = context.build(InMemoryQuery::new()).expect("should build");
    let second = context.build(InMemoryQuery::new()).expect("should build");
    assert_eq!(first.execute(orders()).len(), 2);
    assert_eq!(second.execute(orders()).len(), 2);
}

// =============================================================================
// Query-inspection helpers
// =============================================================================

#[test]
fn test_sort_toggle_round_trip() {
    let schema = orders_schema();
    let params = RequestParams::from_pairs(pairs(&[("sort[]", "amount")]));
    let context = FilterContext::new(&schema, params);

    assert!(!context.is_sort(None));
    assert!(context.is_sort(Some("amount")));
    assert_eq!(context.sort_direction("amount"), SortDirection::Asc);

    let toggled = context.revert_sort("amount");
    assert_eq!(toggled, "-amount");

    let params = RequestParams::from_pairs(pairs(&[("sort[]", &toggled)]));
    let context = FilterContext::new(&schema, params);
    assert_eq!(context.sort_direction("amount"), SortDirection::Desc);
    assert_eq!(context.revert_sort("amount"), "amount");
}

#[test]
fn test_filter_lookup_after_parsing() {
    let schema = orders_schema();
    let params = RequestParams::from_pairs(pairs(&[
        ("filter[status]", "a,b"),
        ("filter[created_at][start]", "2024-01-01"),
    ]));
    let context = FilterContext::new(&schema, params);

    assert_eq!(
        context.filter("status"),
        Some(RawValue::List(vec!["a".to_string(), "b".to_string()]))
    );
    assert_eq!(
        context.filter("created_at.start"),
        Some(RawValue::Scalar("2024-01-01".to_string()))
    );
    assert_eq!(context.filter("amount"), None);
}

// =============================================================================
// HTTP extraction
// =============================================================================

#[tokio::test]
async fn test_extraction_through_axum_request_parts() {
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    let (mut parts, ()) = Request::builder()
        .uri("/orders?filter[paid]=true&sort[]=-amount&page=3")
        .body(())
        .expect("valid request")
        .into_parts();
    let params = RequestParams::from_request_parts(&mut parts, &())
        .await
        .expect("should extract");

    let schema = orders_schema();
    let context = FilterContext::new(&schema, params);
    let query = context.build(InMemoryQuery::new()).expect("should build");
    let result = query.execute(orders());

    assert_eq!(result.len(), 2);
    assert_eq!(result[0]["amount"], 120.0);
    assert_eq!(result[1]["amount"], 75.0);
}
