//! Table schema extraction: metadata lookup, CSV summary and filter values.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::layout::{list_subdirectories, METADATA_FILE};
use crate::metadata::{MetadataDocument, TableMetadata};
use crate::table::{Cell, ColumnType, Table};

// ── Column classification ───────────────────────────────────────────

/// How a column is treated when listing filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Categorical,
    Temporal,
}

impl ColumnClass {
    /// Largest number of distinct values still listed verbatim.
    pub fn bound(self) -> usize {
        match self {
            ColumnClass::Categorical => 50,
            ColumnClass::Temporal => 100,
        }
    }
}

/// One row of the classification table.
pub struct ClassificationRule {
    pub label: &'static str,
    pub matches: fn(&str, ColumnType) -> bool,
    pub class: ColumnClass,
}

/// Evaluated in order; the first matching rule decides the class.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        label: "text column",
        matches: |_, kind| kind.is_text(),
        class: ColumnClass::Categorical,
    },
    ClassificationRule {
        label: "identifier",
        matches: |name, _| name.contains("ID"),
        class: ColumnClass::Categorical,
    },
    ClassificationRule {
        label: "name",
        matches: |name, _| name.to_lowercase().contains("name"),
        class: ColumnClass::Categorical,
    },
    ClassificationRule {
        label: "temporal",
        matches: |name, _| {
            let lower = name.to_lowercase();
            ["year", "round", "date"].iter().any(|k| lower.contains(k))
        },
        class: ColumnClass::Temporal,
    },
];

/// Class of a column, or `None` if it is not offered for filtering.
pub fn classify(name: &str, kind: ColumnType) -> Option<ColumnClass> {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(name, kind))
        .map(|rule| rule.class)
}

// ── Schema payload ──────────────────────────────────────────────────

/// Representative values per filterable column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterValues {
    #[serde(flatten)]
    pub values: IndexMap<String, Vec<Cell>>,
    #[serde(rename = "_omitted", skip_serializing_if = "Option::is_none")]
    pub omitted: Option<String>,
}

impl FilterValues {
    /// Collect filter values from a loaded table.
    pub fn from_table(table: &Table) -> Self {
        let mut values = IndexMap::new();
        let mut omitted = Vec::new();

        for column in table.columns() {
            let Some(class) = classify(&column.name, column.kind) else {
                continue;
            };
            let distinct = column.distinct_values();
            match distinct.len() {
                0 | 1 => {}
                n if n <= class.bound() => {
                    values.insert(column.name.clone(), distinct);
                }
                n => omitted.push(format!("{} ({} unique values)", column.name, n)),
            }
        }

        let omitted = (!omitted.is_empty()).then(|| {
            format!(
                "These columns have too many unique values to list: {}. \
                 You can still filter on them; use values from the data rows returned by 4_get_data().",
                omitted.join(", ")
            )
        });

        Self { values, omitted }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.omitted.is_none()
    }
}

/// Shape of the backing CSV, or why it could not be read.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CsvSummary {
    Loaded {
        total_rows: usize,
        total_columns: usize,
        columns: Vec<String>,
        dtypes: IndexMap<String, String>,
    },
    Unavailable {
        error: String,
    },
}

impl CsvSummary {
    pub fn from_table(table: &Table) -> Self {
        CsvSummary::Loaded {
            total_rows: table.row_count(),
            total_columns: table.columns().len(),
            columns: table.column_names(),
            dtypes: table
                .columns()
                .iter()
                .map(|c| (c.name.clone(), c.kind.label().to_string()))
                .collect(),
        }
    }
}

/// Result of `get_table_schema`.
#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub dataset_id: String,
    pub table_name: String,
    pub info: Map<String, Value>,
    pub data_dictionary: Map<String, Value>,
    pub csv_summary: CsvSummary,
    pub filter_values: FilterValues,
}

impl TableSchema {
    /// Build the schema of `table_name` from a dataset directory and the
    /// resolved CSV path, if any.
    pub fn describe(
        dataset_id: &str,
        table_name: &str,
        dataset_dir: &Path,
        csv_path: Option<&Path>,
    ) -> Self {
        let metadata = lookup_metadata(dataset_dir, table_name);

        let (csv_summary, filter_values) = match csv_path {
            None => (
                CsvSummary::Unavailable {
                    error: format!(
                        "CSV not found for dataset '{}', table '{}'.",
                        dataset_id, table_name
                    ),
                },
                FilterValues::default(),
            ),
            Some(path) => match Table::read_csv(path) {
                Ok(table) => (CsvSummary::from_table(&table), FilterValues::from_table(&table)),
                Err(e) => (
                    CsvSummary::Unavailable {
                        error: format!("Could not read CSV: {}", e),
                    },
                    FilterValues::default(),
                ),
            },
        };

        Self {
            dataset_id: dataset_id.to_string(),
            table_name: table_name.to_string(),
            info: metadata.info,
            data_dictionary: metadata.data_dictionary,
            csv_summary,
            filter_values,
        }
    }
}

/// Metadata for a table: the dataset document first, then the first sorted
/// subdirectory whose document mentions the table when the top-level entry
/// has no data dictionary.
fn lookup_metadata(dataset_dir: &Path, table_name: &str) -> TableMetadata {
    let top = MetadataDocument::load(dataset_dir)
        .table(table_name)
        .cloned()
        .unwrap_or_default();
    if !top.data_dictionary.is_empty() {
        return top;
    }

    for subdir in list_subdirectories(dataset_dir) {
        let dir = dataset_dir.join(&subdir);
        if !dir.join(METADATA_FILE).is_file() {
            continue;
        }
        let doc = MetadataDocument::load(&dir);
        if doc.contains(table_name) {
            debug!(table = table_name, subdir = %subdir, "metadata found in subdirectory");
            return doc.table(table_name).cloned().unwrap_or(top);
        }
    }
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn classification_is_first_match() {
        assert_eq!(classify("district", ColumnType::Text), Some(ColumnClass::Categorical));
        assert_eq!(classify("LGD_ID", ColumnType::Integer), Some(ColumnClass::Categorical));
        assert_eq!(classify("state.Name", ColumnType::Float), Some(ColumnClass::Categorical));
        assert_eq!(classify("survey_year", ColumnType::Integer), Some(ColumnClass::Temporal));
        assert_eq!(classify("Round", ColumnType::Integer), Some(ColumnClass::Temporal));
        // A text date column is categorical, not temporal.
        assert_eq!(classify("date", ColumnType::Text), Some(ColumnClass::Categorical));
        assert_eq!(classify("id", ColumnType::Integer), None);
        assert_eq!(classify("cases", ColumnType::Float), None);
    }

    #[test]
    fn filter_values_respect_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = String::from("district,year,constant,cases\n");
        for i in 0..51 {
            body.push_str(&format!("D{:02},{},same,{}\n", i, 2000 + (i % 3), i));
        }
        let path = dir.path().join("t.csv");
        write(&path, &body);
        let table = Table::read_csv(&path).unwrap();

        let fv = FilterValues::from_table(&table);
        assert!(!fv.values.contains_key("district"));
        assert!(!fv.values.contains_key("constant"));
        assert!(!fv.values.contains_key("cases"));
        assert_eq!(
            fv.values["year"],
            vec![Cell::Int(2000), Cell::Int(2001), Cell::Int(2002)]
        );
        let omitted = fv.omitted.unwrap();
        assert!(omitted.contains("district (51 unique values)"));
        assert!(omitted.contains("4_get_data()"));
    }

    #[test]
    fn fifty_distinct_values_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = String::from("district\n");
        for i in 0..50 {
            body.push_str(&format!("D{:02}\n", i));
        }
        let path = dir.path().join("t.csv");
        write(&path, &body);
        let fv = FilterValues::from_table(&Table::read_csv(&path).unwrap());
        assert_eq!(fv.values["district"].len(), 50);
        assert!(fv.omitted.is_none());
    }

    #[test]
    fn temporal_columns_list_up_to_one_hundred_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = String::from("year,Survey_Round,Block_Name,cases\n");
        for i in 0..101 {
            body.push_str(&format!("{},{},{},{}\n", 1900 + (i % 100), i, i % 51, i * 2));
        }
        let path = dir.path().join("t.csv");
        write(&path, &body);
        let table = Table::read_csv(&path).unwrap();
        assert_eq!(table.column("Block_Name").unwrap().kind, ColumnType::Integer);

        let fv = FilterValues::from_table(&table);
        assert_eq!(fv.values["year"].len(), 100);
        assert_eq!(fv.values["year"][0], Cell::Int(1900));
        assert_eq!(fv.values["year"][99], Cell::Int(1999));
        assert!(!fv.values.contains_key("Survey_Round"));
        // Numeric, but "name" makes it categorical: 51 values exceed that bound.
        assert!(!fv.values.contains_key("Block_Name"));
        assert!(!fv.values.contains_key("cases"));

        let omitted = fv.omitted.unwrap();
        assert!(omitted.contains("Survey_Round (101 unique values)"));
        assert!(omitted.contains("Block_Name (51 unique values)"));
        assert!(!omitted.contains("year"));
        assert!(!omitted.contains("cases"));
    }

    #[test]
    fn filter_values_serialize_flat() {
        let mut values = IndexMap::new();
        values.insert("state".to_string(), vec![Cell::Text("A".into()), Cell::Text("B".into())]);
        let fv = FilterValues {
            values,
            omitted: Some("too many".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&fv).unwrap(),
            json!({"state": ["A", "B"], "_omitted": "too many"})
        );
    }

    #[test]
    fn describe_reads_metadata_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("metadata.yaml"),
            "tables:\n  sero:\n    info:\n      about: Sero\n    data_dictionary:\n      state: State\n",
        );
        let csv = dir.path().join("sero.csv");
        write(&csv, "state,value\nA,1.5\nB,2\n");

        let schema = TableSchema::describe("0034", "sero", dir.path(), Some(&csv));
        assert_eq!(schema.info["about"], "Sero");
        assert_eq!(schema.data_dictionary["state"], "State");
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["csv_summary"]["total_rows"], 2);
        assert_eq!(json["csv_summary"]["dtypes"], json!({"state": "object", "value": "float64"}));
        assert_eq!(json["filter_values"], json!({"state": ["A", "B"]}));
    }

    #[test]
    fn describe_falls_back_to_subdirectory_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("metadata.yaml"), "tables:\n  other:\n    info: {}\n");
        write(
            &dir.path().join("b-sub").join("metadata.yaml"),
            "tables:\n  village:\n    data_dictionary:\n      pop: later\n",
        );
        write(
            &dir.path().join("a-sub").join("metadata.yaml"),
            "tables:\n  village:\n    info:\n      about: first\n    data_dictionary:\n      pop: Population\n",
        );

        let schema = TableSchema::describe("0059", "village", dir.path(), None);
        assert_eq!(schema.info["about"], "first");
        assert_eq!(schema.data_dictionary["pop"], "Population");
    }

    #[test]
    fn unresolved_or_unreadable_csv_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let schema = TableSchema::describe("0059", "ghost", dir.path(), None);
        assert!(matches!(schema.csv_summary, CsvSummary::Unavailable { .. }));
        assert!(schema.filter_values.is_empty());

        let bad = dir.path().join("bad.csv");
        write(&bad, "a,b\n1,2,3\n");
        let schema = TableSchema::describe("0059", "bad", dir.path(), Some(&bad));
        match schema.csv_summary {
            CsvSummary::Unavailable { error } => assert!(error.starts_with("Could not read CSV")),
            CsvSummary::Loaded { .. } => panic!("overlong record should not load"),
        }

        let short = dir.path().join("short.csv");
        write(&short, "a,b\n1\n2,x\n");
        let schema = TableSchema::describe("0059", "short", dir.path(), Some(&short));
        assert!(matches!(schema.csv_summary, CsvSummary::Loaded { .. }));
    }
}
