use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info};

use artpark_core::DataConfig;

use crate::catalog::{Catalog, DatasetListing, DatasetTables};
use crate::error::DataError;
use crate::executor::{QueryExecutor, QueryResult};
use crate::plan::QueryRequest;
use crate::resolver::PathResolver;
use crate::schema::TableSchema;
use crate::table::Table;

/// Read-only access to the dataset corpus.
///
/// ```text
/// data/
///   0015/
///     metadata.yaml
///     ka-dengue-daily-summary.csv
///   0055/
///     round1.csv .. round6.csv
/// ```
///
/// The catalogue is scanned on first use and kept for the life of the
/// store. Schema and query calls always read metadata and CSVs fresh.
#[derive(Debug)]
pub struct DataStore {
    data_dir: PathBuf,
    resolver: PathResolver,
    catalogue: OnceLock<Catalog>,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            resolver: PathResolver::new(data_dir.clone()),
            data_dir,
            catalogue: OnceLock::new(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// Dataset root directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The cached catalogue, built on first access.
    pub fn catalogue(&self) -> &Catalog {
        self.catalogue.get_or_init(|| {
            info!(data_dir = %self.data_dir.display(), "building catalogue");
            Catalog::scan(&self.data_dir)
        })
    }

    pub fn list_datasets(&self) -> DatasetListing {
        self.catalogue().listing()
    }

    pub fn get_dataset_tables(&self, dataset_id: &str) -> Result<DatasetTables, DataError> {
        let dir = self.dataset_dir(dataset_id)?;
        Ok(DatasetTables::scan(dataset_id, &dir))
    }

    pub fn get_table_schema(
        &self,
        dataset_id: &str,
        table_name: &str,
    ) -> Result<TableSchema, DataError> {
        let dir = self.dataset_dir(dataset_id)?;
        let csv_path = self.resolver.resolve(dataset_id, table_name);
        Ok(TableSchema::describe(dataset_id, table_name, &dir, csv_path.as_deref()))
    }

    pub fn query_table(&self, request: &QueryRequest) -> Result<QueryResult, DataError> {
        self.dataset_dir(&request.dataset_id)?;
        let path = self
            .resolver
            .resolve(&request.dataset_id, &request.table_name)
            .ok_or_else(|| DataError::TableNotFound {
                dataset: request.dataset_id.clone(),
                table: request.table_name.clone(),
            })?;

        let table = Table::read_csv(&path)?;
        let result = QueryExecutor::execute(request, &table)?;
        debug!(
            dataset = %request.dataset_id,
            table = %request.table_name,
            before = result.total_rows_before_filter,
            after = result.total_rows_after_filter,
            returned = result.rows_returned,
            "query complete"
        );
        Ok(result)
    }

    /// Physical CSV backing a logical table, if any.
    pub fn resolve_csv_path(&self, dataset_id: &str, table_name: &str) -> Option<PathBuf> {
        self.resolver.resolve(dataset_id, table_name)
    }

    fn dataset_dir(&self, dataset_id: &str) -> Result<PathBuf, DataError> {
        self.resolver
            .dataset_dir(dataset_id)
            .ok_or_else(|| DataError::DatasetNotFound(dataset_id.to_string()))
    }
}
