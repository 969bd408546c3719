//! Dataset catalogue: which datasets exist, their tables and CSV inventory.
//!
//! Built by scanning the dataset root once; see [`Catalog::scan`].

mod builder;
mod types;

pub use types::{
    Catalog, DatasetEntry, DatasetListing, DatasetSummary, DatasetTables, SubdirectoryInventory,
    TableDescription, TableEntry, TableOrigin,
};
