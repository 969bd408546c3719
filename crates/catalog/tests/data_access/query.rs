use artpark_catalog::{DataError, QueryRequest, SCHEMA_HINT};

use crate::helpers::{build_corpus, store, KARNATAKA_ROWS, SERO_ROWS, TAMIL_NADU_ROWS};

fn sero() -> QueryRequest {
    QueryRequest::new("0034", "seromonitoring")
}

#[test]
fn filter_matching_ignores_case() {
    let root = build_corpus();
    let store = store(&root);
    let upper = store.query_table(&sero().with_filter("state.name", "KARNATAKA")).unwrap();
    let lower = store.query_table(&sero().with_filter("state.name", "karnataka")).unwrap();
    assert_eq!(upper.total_rows_after_filter, KARNATAKA_ROWS);
    assert_eq!(lower.total_rows_after_filter, upper.total_rows_after_filter);
}

#[test]
fn comma_separated_values_are_a_union() {
    let root = build_corpus();
    let store = store(&root);
    let both = store
        .query_table(&sero().with_filter("state.name", "KARNATAKA,TAMIL NADU"))
        .unwrap();
    assert_eq!(both.total_rows_after_filter, KARNATAKA_ROWS + TAMIL_NADU_ROWS);
    assert_eq!(both.filters_applied.iter().next().unwrap().value, "KARNATAKA,TAMIL NADU");
}

#[test]
fn filter_order_does_not_change_rows() {
    let root = build_corpus();
    let store = store(&root);
    let a = sero()
        .with_filter("state.name", "karnataka")
        .with_filter("year", "2020")
        .with_limit(500);
    let b = sero()
        .with_filter("year", "2020")
        .with_filter("state.name", "karnataka")
        .with_limit(500);
    let a = store.query_table(&a).unwrap();
    let b = store.query_table(&b).unwrap();
    assert_eq!(a.total_rows_after_filter, 4);
    assert_eq!(a.data, b.data);
}

#[test]
fn limit_bounds_rows_returned_only() {
    let root = build_corpus();
    let result = store(&root).query_table(&sero().with_limit(5)).unwrap();
    assert_eq!(result.rows_returned, 5);
    assert_eq!(result.data.len(), 5);
    assert_eq!(result.total_rows_before_filter, SERO_ROWS);
    assert_eq!(result.total_rows_after_filter, SERO_ROWS);
    assert_eq!(result.limit, 5);
}

#[test]
fn unknown_column_lists_all_columns_sorted() {
    let root = build_corpus();
    let err = store(&root)
        .query_table(&sero().with_filter("State", "KARNATAKA"))
        .unwrap_err();
    let payload = err.to_payload();

    let columns: Vec<&str> = payload["valid_columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(columns.len(), 15);
    let mut sorted = columns.clone();
    sorted.sort();
    assert_eq!(columns, sorted);
    assert_eq!(payload["hint"], SCHEMA_HINT);
}

#[test]
fn stats_note_names_omitted_numeric_columns() {
    let root = build_corpus();
    let result = store(&root).query_table(&sero()).unwrap();
    let stats = &result.summary_stats;
    // year and round count as numeric columns.
    assert_eq!(stats.columns.len(), 10);
    assert!(stats.columns.contains_key("year"));
    let note = stats.note.as_deref().unwrap();
    assert!(note.starts_with("Showing stats for 10 of 13 numeric columns."));
    assert!(note.ends_with("n.districts, pct.protected, cost"));
}

#[test]
fn unknown_dataset_returns_error_without_rows() {
    let root = build_corpus();
    let err = store(&root)
        .query_table(&QueryRequest::new("0000", "seromonitoring"))
        .unwrap_err();
    assert!(matches!(err, DataError::DatasetNotFound(_)));
    assert!(err.to_payload().get("data").is_none());
}
