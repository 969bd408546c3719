use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A table as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    pub about: String,
    pub source: String,
}

/// Where a dataset's table list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOrigin {
    /// Declared in `metadata.yaml`.
    Metadata,
    /// Inferred 1:1 from CSV filenames.
    Filenames,
}

/// One dataset directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub dataset_id: String,
    pub tables: Vec<TableEntry>,
    pub csv_files: Vec<String>,
    pub table_origin: TableOrigin,
}

/// All datasets under the data root, keyed (and ordered) by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub datasets: BTreeMap<String, DatasetEntry>,
}

/// Per-dataset line of [`DatasetListing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub num_tables: usize,
    pub num_csv_files: usize,
    /// First non-empty table description, or "".
    pub description: String,
    pub csv_files: Vec<String>,
}

/// Result of `list_datasets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListing {
    pub total_datasets: usize,
    pub datasets: BTreeMap<String, DatasetSummary>,
}

/// CSV files found in one subdirectory of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdirectoryInventory {
    pub name: String,
    pub csv_files: Vec<String>,
}

/// A table as described by `get_dataset_tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    pub about: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub num_columns: usize,
    pub columns: Vec<String>,
}

/// Result of `get_dataset_tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetTables {
    pub dataset_id: String,
    pub csv_files: Vec<String>,
    pub subdirectories: Vec<SubdirectoryInventory>,
    pub tables: Vec<TableDescription>,
}
