//! Read-only data access over a directory of CSV datasets with YAML sidecar
//! metadata: catalogue discovery, table-name resolution, schema extraction
//! and filtered queries.

pub mod catalog;
pub mod error;
pub mod executor;
pub mod layout;
pub mod metadata;
pub mod plan;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod table;

pub use catalog::{
    Catalog, DatasetEntry, DatasetListing, DatasetSummary, DatasetTables, SubdirectoryInventory,
    TableDescription, TableEntry, TableOrigin,
};
pub use error::{DataError, SCHEMA_HINT};
pub use executor::{ColumnStats, QueryExecutor, QueryResult, SummaryStats};
pub use metadata::{MetadataDocument, TableMetadata, TableSource};
pub use plan::{FilterMatcher, FilterSet, QueryRequest};
pub use resolver::PathResolver;
pub use schema::{ColumnClass, CsvSummary, FilterValues, TableSchema, CLASSIFICATION_RULES};
pub use store::DataStore;
pub use table::{Cell, Column, ColumnType, Table};
