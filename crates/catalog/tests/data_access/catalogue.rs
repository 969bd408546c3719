use artpark_catalog::{DataError, TableOrigin};

use crate::helpers::{build_corpus, store};

#[test]
fn lists_every_dataset() {
    let root = build_corpus();
    let listing = store(&root).list_datasets();

    assert_eq!(listing.total_datasets, 4);
    let ids: Vec<&String> = listing.datasets.keys().collect();
    assert_eq!(ids, vec!["0034", "0055", "0059", "0087"]);

    let sero = &listing.datasets["0034"];
    assert_eq!(sero.num_tables, 1);
    assert_eq!(sero.description, "FMD seromonitoring results by state and round");
}

#[test]
fn metadata_less_dataset_has_one_table_per_csv() {
    let root = build_corpus();
    let store = store(&root);
    let entry = store.catalogue().get("0055").unwrap();

    assert_eq!(entry.table_origin, TableOrigin::Filenames);
    assert_eq!(entry.tables.len(), entry.csv_files.len());
    for (table, file) in entry.tables.iter().zip(&entry.csv_files) {
        assert_eq!(format!("{}.csv", table.name), *file);
    }
}

#[test]
fn unparseable_metadata_falls_back_silently() {
    let root = build_corpus();
    let store = store(&root);
    let entry = store.catalogue().get("0087").unwrap();
    let names: Vec<&str> = entry.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["ka-weather-daily", "stations"]);
}

#[test]
fn dataset_tables_include_subdirectory_inventory() {
    let root = build_corpus();
    let tables = store(&root).get_dataset_tables("0059").unwrap();

    assert!(tables.csv_files.is_empty());
    assert_eq!(tables.subdirectories.len(), 1);
    assert_eq!(tables.subdirectories[0].name, "census");
    assert_eq!(tables.subdirectories[0].csv_files, vec!["villages.csv"]);
    assert_eq!(tables.tables[0].name, "villages");
}

#[test]
fn dataset_tables_for_unknown_dataset_is_error() {
    let root = build_corpus();
    let err = store(&root).get_dataset_tables("0001").unwrap_err();
    assert!(matches!(err, DataError::DatasetNotFound(_)));
    assert_eq!(err.to_payload()["error"], "Dataset '0001' not found.");
}
