//! Directory conventions of the dataset corpus.
//!
//! ```text
//! data/
//!   {dataset_id}/
//!     metadata.yaml        <- table definitions + data dictionaries
//!     *.csv                <- data files
//!     {subdir}/            <- optional, one level deep only
//!       metadata.yaml
//!       *.csv
//! ```

use std::path::Path;

/// Name of the sidecar metadata document in a dataset (or subdirectory).
pub const METADATA_FILE: &str = "metadata.yaml";

const CSV_EXTENSION: &str = ".csv";

/// CSV filenames directly inside `dir`, sorted. Missing or unreadable
/// directories yield an empty list.
pub fn list_csv_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(CSV_EXTENSION))
        .collect();
    files.sort();
    files
}

/// Names of the immediate subdirectories of `dir`, sorted.
pub fn list_subdirectories(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    dirs.sort();
    dirs
}

/// Filename without its `.csv` extension.
pub fn csv_stem(filename: &str) -> &str {
    filename.strip_suffix(CSV_EXTENSION).unwrap_or(filename)
}

/// Whether a caller-supplied name can be used as a single path component.
///
/// Dataset ids and table names come from the agent; anything that could
/// escape the dataset root never resolves.
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
