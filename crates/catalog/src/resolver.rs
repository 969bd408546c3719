//! Logical table name -> physical CSV path.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::layout::{csv_stem, is_safe_component, list_csv_files, list_subdirectories};

/// Resolves table names against the dataset root.
///
/// Metadata table names often differ from on-disk filenames (hyphens vs
/// underscores, files in a subdirectory, or one logical table spread over
/// `round1.csv`..`round6.csv`), so resolution walks a fixed precedence:
///
/// 1. `{name}.csv` in the dataset directory
/// 2. `{name, _ -> -}.csv`
/// 3. `{name, - -> _}.csv`
/// 4. the same three candidates inside each subdirectory (sorted)
/// 5. fuzzy: separator- and case-insensitive substring match, either
///    direction, against the dataset directory's CSV stems (sorted)
#[derive(Debug, Clone)]
pub struct PathResolver {
    data_dir: PathBuf,
}

impl PathResolver {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory of a dataset, if it exists.
    pub fn dataset_dir(&self, dataset_id: &str) -> Option<PathBuf> {
        if !is_safe_component(dataset_id) {
            return None;
        }
        let dir = self.data_dir.join(dataset_id);
        dir.is_dir().then_some(dir)
    }

    /// Find the CSV backing `table_name` in `dataset_id`.
    pub fn resolve(&self, dataset_id: &str, table_name: &str) -> Option<PathBuf> {
        let dataset_dir = self.dataset_dir(dataset_id)?;
        if !is_safe_component(table_name) {
            return None;
        }

        let candidates = candidate_filenames(table_name);

        if let Some(path) = first_existing(&dataset_dir, &candidates) {
            debug!(dataset = dataset_id, table = table_name, path = %path.display(), "resolved directly");
            return Some(path);
        }

        for subdir in list_subdirectories(&dataset_dir) {
            if let Some(path) = first_existing(&dataset_dir.join(&subdir), &candidates) {
                debug!(dataset = dataset_id, table = table_name, path = %path.display(), "resolved in subdirectory");
                return Some(path);
            }
        }

        let target = normalize(table_name);
        let fuzzy = list_csv_files(&dataset_dir).into_iter().find(|file| {
            let stem = normalize(csv_stem(file));
            stem.contains(&target) || target.contains(&stem)
        });
        match fuzzy {
            Some(file) => {
                let path = dataset_dir.join(file);
                debug!(dataset = dataset_id, table = table_name, path = %path.display(), "resolved by fuzzy match");
                Some(path)
            }
            None => {
                debug!(dataset = dataset_id, table = table_name, "no CSV matches table");
                None
            }
        }
    }
}

fn candidate_filenames(table_name: &str) -> [String; 3] {
    [
        format!("{}.csv", table_name),
        format!("{}.csv", table_name.replace('_', "-")),
        format!("{}.csv", table_name.replace('-', "_")),
    ]
}

fn first_existing(dir: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.is_file())
}

/// Lowercase and drop `-`/`_`.
fn normalize(name: &str) -> String {
    name.to_lowercase().replace(['-', '_'], "")
}
