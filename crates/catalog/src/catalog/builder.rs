use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use super::types::{
    Catalog, DatasetEntry, DatasetListing, DatasetSummary, DatasetTables, SubdirectoryInventory,
    TableDescription, TableEntry, TableOrigin,
};
use crate::layout::{csv_stem, list_csv_files, list_subdirectories};
use crate::metadata::TableSource;
use crate::table::Table;

impl Catalog {
    /// Scan every dataset directory under `data_dir`.
    ///
    /// A missing root yields an empty catalogue.
    pub fn scan(data_dir: &Path) -> Self {
        if !data_dir.is_dir() {
            info!(data_dir = %data_dir.display(), "data directory missing, catalogue is empty");
            return Self::default();
        }

        let datasets: BTreeMap<String, DatasetEntry> = list_subdirectories(data_dir)
            .into_iter()
            .map(|dataset_id| {
                let entry = DatasetEntry::scan(&dataset_id, &data_dir.join(&dataset_id));
                (dataset_id, entry)
            })
            .collect();

        let catalog = Self { datasets };
        info!(
            "Catalogue built: {} datasets, {} tables",
            catalog.datasets.len(),
            catalog.table_count()
        );
        catalog
    }

    pub fn get(&self, dataset_id: &str) -> Option<&DatasetEntry> {
        self.datasets.get(dataset_id)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Total tables across all datasets.
    pub fn table_count(&self) -> usize {
        self.datasets.values().map(|d| d.tables.len()).sum()
    }

    /// Summary view used by `list_datasets`.
    pub fn listing(&self) -> DatasetListing {
        let datasets: BTreeMap<String, DatasetSummary> = self
            .datasets
            .iter()
            .map(|(id, entry)| (id.clone(), entry.summary()))
            .collect();
        DatasetListing {
            total_datasets: datasets.len(),
            datasets,
        }
    }
}

impl DatasetEntry {
    /// Build the entry for one dataset directory.
    pub fn scan(dataset_id: &str, dir: &Path) -> Self {
        let csv_files = list_csv_files(dir);

        let (tables, table_origin): (Vec<TableEntry>, TableOrigin) = match TableSource::for_dataset(dir) {
            TableSource::Described(tables) => (
                tables
                    .into_iter()
                    .map(|(name, meta)| TableEntry {
                        about: meta.about(),
                        source: meta.source(),
                        name,
                    })
                    .collect(),
                TableOrigin::Metadata,
            ),
            TableSource::Inferred => (
                csv_files
                    .iter()
                    .map(|file| TableEntry {
                        name: csv_stem(file).to_string(),
                        about: String::new(),
                        source: String::new(),
                    })
                    .collect(),
                TableOrigin::Filenames,
            ),
        };

        debug!(
            dataset = dataset_id,
            tables = tables.len(),
            csv_files = csv_files.len(),
            origin = ?table_origin,
            "scanned dataset"
        );

        Self {
            dataset_id: dataset_id.to_string(),
            tables,
            csv_files,
            table_origin,
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        let description = self
            .tables
            .iter()
            .map(|t| t.about.as_str())
            .find(|about| !about.is_empty())
            .unwrap_or_default()
            .to_string();
        DatasetSummary {
            num_tables: self.tables.len(),
            num_csv_files: self.csv_files.len(),
            description,
            csv_files: self.csv_files.clone(),
        }
    }
}

impl DatasetTables {
    /// Describe the tables of one dataset directory, read fresh from disk.
    ///
    /// Metadata-declared tables list their data-dictionary columns; inferred
    /// tables list their CSV header (empty if the header cannot be read).
    pub fn scan(dataset_id: &str, dir: &Path) -> Self {
        let csv_files = list_csv_files(dir);

        let subdirectories = list_subdirectories(dir)
            .into_iter()
            .filter_map(|name| {
                let files = list_csv_files(&dir.join(&name));
                (!files.is_empty()).then_some(SubdirectoryInventory {
                    name,
                    csv_files: files,
                })
            })
            .collect();

        let tables = match TableSource::for_dataset(dir) {
            TableSource::Described(tables) => tables
                .into_iter()
                .map(|(name, meta)| {
                    let columns = meta.columns();
                    TableDescription {
                        about: meta.about(),
                        source: meta.source(),
                        comments: Some(meta.comments()),
                        num_columns: columns.len(),
                        columns,
                        name,
                    }
                })
                .collect(),
            TableSource::Inferred => csv_files
                .iter()
                .map(|file| {
                    let columns = Table::read_header(&dir.join(file)).unwrap_or_else(|e| {
                        debug!(dataset = dataset_id, file = %file, error = %e, "header unreadable");
                        Vec::new()
                    });
                    TableDescription {
                        name: csv_stem(file).to_string(),
                        about: String::new(),
                        source: String::new(),
                        comments: None,
                        num_columns: columns.len(),
                        columns,
                    }
                })
                .collect(),
        };

        Self {
            dataset_id: dataset_id.to_string(),
            csv_files,
            subdirectories,
            tables,
        }
    }
}
