use serde_json::Value;

use artpark_catalog::{Cell, CsvSummary};

use crate::helpers::{build_corpus, store, SERO_ROWS, STATE_COUNT};

#[test]
fn schema_reports_csv_summary_and_dictionary() {
    let root = build_corpus();
    let schema = store(&root).get_table_schema("0034", "seromonitoring").unwrap();

    assert_eq!(schema.info["source"], "NADCP");
    assert_eq!(schema.data_dictionary.len(), 4);
    match &schema.csv_summary {
        CsvSummary::Loaded {
            total_rows,
            total_columns,
            dtypes,
            ..
        } => {
            assert_eq!(*total_rows, SERO_ROWS);
            assert_eq!(*total_columns, 15);
            assert_eq!(dtypes["state.name"], "object");
            assert_eq!(dtypes["year"], "int64");
            assert_eq!(dtypes["pre.O"], "float64");
        }
        CsvSummary::Unavailable { error } => panic!("csv not loaded: {error}"),
    }
}

#[test]
fn high_cardinality_column_is_omitted_not_listed() {
    let root = build_corpus();
    let schema = store(&root).get_table_schema("0034", "seromonitoring").unwrap();
    let fv = &schema.filter_values;

    assert!(!fv.values.contains_key("lab_code"));
    let omitted = fv.omitted.as_deref().unwrap();
    assert!(omitted.contains("lab_code (51 unique values)"));

    assert_eq!(fv.values["state.name"].len(), STATE_COUNT);
    assert_eq!(fv.values["state.name"][0], Cell::Text("KARNATAKA".to_string()));
    assert_eq!(fv.values["round"].len(), 6);
    assert_eq!(fv.values["year"].first(), Some(&Cell::Int(2019)));
    assert!(!fv.values.contains_key("pre.O"));

    let json = serde_json::to_value(&schema).unwrap();
    assert!(json["filter_values"]["_omitted"].is_string());
    assert!(json["filter_values"].get("lab_code").is_none());
}

#[test]
fn subdirectory_metadata_fills_missing_dictionary() {
    let root = build_corpus();
    let schema = store(&root).get_table_schema("0059", "villages").unwrap();
    assert_eq!(schema.info["about"], "Village population (census extract)");
    assert_eq!(schema.data_dictionary["population"], "Headcount");
    assert!(matches!(schema.csv_summary, CsvSummary::Loaded { .. }));
}

#[test]
fn unknown_table_keeps_schema_call_alive() {
    let root = build_corpus();
    let schema = store(&root).get_table_schema("0087", "lightning").unwrap();
    let json = serde_json::to_value(&schema).unwrap();
    assert!(json["csv_summary"]["error"].is_string());
    assert_eq!(json["filter_values"], Value::Object(Default::default()));
}
