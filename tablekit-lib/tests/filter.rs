use std::sync::Arc;

use serde_json::json;
use tablekit_lib::TableError;
use tablekit_lib::filter::{ColumnFilter, FilterSpec, PredicateRegistry, filter, filter_indices};
use tablekit_lib::model::{Record, Value};

fn rows(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

fn sample() -> Vec<Record> {
    rows(json!([
        { "id": 1, "h1": "b", "h2": 2 },
        { "id": 2, "h1": "a", "h2": 2 },
        { "id": 3, "h1": "a", "h2": 1 },
    ]))
}

fn people() -> Vec<Record> {
    rows(json!([
        { "id": 1, "name": "Alice Smith", "age": 34, "active": true },
        { "id": 2, "name": "Bob Stone", "age": 27, "active": false },
        { "id": 3, "name": "Carol Jones", "age": 41.5, "active": true },
        { "id": 4, "name": "dave smithers", "age": 19, "active": false },
    ]))
}

// ============================================================================
// Basic filtering
// ============================================================================

#[test]
fn test_empty_spec_returns_all() {
    let data = sample();
    assert_eq!(filter(&data, &FilterSpec::new()), vec![0, 1, 2]);
}

#[test]
fn test_column_filter_preserves_order() {
    let data = sample();
    let spec = FilterSpec::new().text("h1", "a");
    let ids: Vec<Value> = filter(&data, &spec)
        .into_iter()
        .map(|i| data[i].get("id").cloned().unwrap())
        .collect();
    assert_eq!(ids, vec![Value::Int(2), Value::Int(3)]);
}

#[test]
fn test_substring_is_case_insensitive() {
    let data = people();
    let spec = FilterSpec::new().text("name", "SMITH");
    assert_eq!(filter(&data, &spec), vec![0, 3]);
}

#[test]
fn test_numbers_and_booleans_match_as_text() {
    let data = people();
    assert_eq!(filter(&data, &FilterSpec::new().text("age", "4")), vec![0, 2]);
    assert_eq!(filter(&data, &FilterSpec::new().text("age", "41.5")), vec![2]);
    assert_eq!(filter(&data, &FilterSpec::new().text("active", "TRUE")), vec![0, 2]);
}

#[test]
fn test_empty_filter_value_never_excludes() {
    let data = people();
    let spec = FilterSpec::new().text("name", "").global("");
    assert_eq!(filter(&data, &spec), vec![0, 1, 2, 3]);
}

#[test]
fn test_filter_on_missing_column_imposes_nothing() {
    let data = people();
    let spec = FilterSpec::new().text("nickname", "zzz");
    assert_eq!(filter(&data, &spec), vec![0, 1, 2, 3]);
}

#[test]
fn test_column_filters_combine() {
    let data = people();
    let spec = FilterSpec::new().text("name", "s").text("active", "false");
    assert_eq!(filter(&data, &spec), vec![1, 3]);
}

// ============================================================================
// Global filter
// ============================================================================

#[test]
fn test_global_matches_any_cell() {
    let data = people();
    assert_eq!(filter(&data, &FilterSpec::new().global("jones")), vec![2]);
    assert_eq!(filter(&data, &FilterSpec::new().global("27")), vec![1]);
    assert!(filter(&data, &FilterSpec::new().global("nobody")).is_empty());
}

#[test]
fn test_global_and_column_filters_both_apply() {
    let data = people();
    let spec = FilterSpec::new().global("smith").text("active", "true");
    assert_eq!(filter(&data, &spec), vec![0]);
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn test_predicate_filter() {
    let data = people();
    let older = |text: &str, cell: &Value| {
        let bound: f64 = text.parse().unwrap_or(0.0);
        cell.as_f64().is_some_and(|age| age >= bound)
    };
    let spec = FilterSpec::new().with("age", ColumnFilter::predicate("30", Arc::new(older)));
    assert_eq!(filter(&data, &spec), vec![0, 2]);
}

#[test]
fn test_empty_predicate_value_never_excludes() {
    let data = people();
    let reject_all = |_: &str, _: &Value| false;
    let spec = FilterSpec::new().with("age", ColumnFilter::predicate("", Arc::new(reject_all)));
    assert_eq!(filter(&data, &spec), vec![0, 1, 2, 3]);
}

#[test]
fn test_set_value_keeps_predicate() {
    let data = people();
    let registry = PredicateRegistry::new();
    let mut spec = FilterSpec::new().with(
        "age",
        ColumnFilter::predicate("100", registry.get("less_than").unwrap()),
    );
    assert_eq!(filter(&data, &spec).len(), 4);

    spec.set_value("age", "30");
    assert!(matches!(spec.get("age"), Some(ColumnFilter::Predicate { .. })));
    assert_eq!(filter(&data, &spec), vec![1, 3]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_filter_is_idempotent() {
    let data = people();
    let specs = [
        FilterSpec::new().text("name", "o"),
        FilterSpec::new().global("a").text("active", "t"),
        FilterSpec::new().text("age", "1"),
    ];
    for spec in &specs {
        let once = filter(&data, spec);
        let twice = filter_indices(&data, &once, spec);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_filter_result_is_ordered_subset() {
    let data = people();
    let spec = FilterSpec::new().global("e");
    let kept = filter(&data, &spec);
    assert!(kept.windows(2).all(|w| w[0] < w[1]));
    assert!(kept.iter().all(|&i| i < data.len()));
}

#[test]
fn test_filter_indices_keeps_view_order() {
    let data = people();
    let view = vec![3, 1, 0];
    let spec = FilterSpec::new().text("name", "s");
    assert_eq!(filter_indices(&data, &view, &spec), vec![3, 1, 0]);
}

// ============================================================================
// JSON specs
// ============================================================================

#[test]
fn test_from_json() {
    let registry = PredicateRegistry::new();
    let spec = FilterSpec::from_json(
        &json!({
            "global": "s",
            "age": { "value": "30", "predicate": "greater_than" }
        }),
        &registry,
    )
    .unwrap();
    assert_eq!(spec.len(), 2);
    assert_eq!(filter(&people(), &spec), vec![0, 2]);
}

#[test]
fn test_from_json_missing_predicate_fails() {
    let registry = PredicateRegistry::new();
    let err = FilterSpec::from_json(&json!({ "age": { "value": "30" } }), &registry).unwrap_err();
    assert!(matches!(err, TableError::MalformedFilter { ref key, .. } if key == "age"));
}

#[test]
fn test_from_json_missing_value_fails() {
    let registry = PredicateRegistry::new();
    let err = FilterSpec::from_json(
        &json!({ "age": { "predicate": "greater_than" } }),
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, TableError::MalformedFilter { .. }));
}

#[test]
fn test_from_json_unknown_predicate_fails() {
    let registry = PredicateRegistry::new();
    let err = FilterSpec::from_json(
        &json!({ "age": { "value": "1", "predicate": "between" } }),
        &registry,
    )
    .unwrap_err();
    assert!(err.to_string().contains("between"));
}

#[test]
fn test_from_json_rejects_other_types() {
    let registry = PredicateRegistry::new();
    assert!(FilterSpec::from_json(&json!({ "age": 30 }), &registry).is_err());
    assert!(FilterSpec::from_json(&json!(["age"]), &registry).is_err());
}
