//! `metadata.yaml` sidecar documents.
//!
//! A document is best-effort: a missing file, an I/O error, a YAML parse
//! error or a `tables` key of the wrong shape all load as an empty document.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::layout::METADATA_FILE;

/// Parsed metadata document of one directory.
#[derive(Debug, Clone, Default)]
pub struct MetadataDocument {
    /// Table name -> record, in document order.
    pub tables: IndexMap<String, TableRecord>,
}

/// One entry under `tables:`.
#[derive(Debug, Clone)]
pub enum TableRecord {
    Described(TableMetadata),
    /// The entry exists but is not a mapping.
    Malformed,
}

/// `info` and `data_dictionary` blocks of a table, converted to JSON.
#[derive(Debug, Clone, Default)]
pub struct TableMetadata {
    pub info: Map<String, Value>,
    pub data_dictionary: Map<String, Value>,
}

impl TableMetadata {
    pub fn about(&self) -> String {
        info_text(&self.info, "about")
    }

    pub fn source(&self) -> String {
        info_text(&self.info, "source")
    }

    pub fn comments(&self) -> String {
        info_text(&self.info, "comments")
    }

    /// Column names declared in the data dictionary.
    pub fn columns(&self) -> Vec<String> {
        self.data_dictionary.keys().cloned().collect()
    }
}

fn info_text(info: &Map<String, Value>, key: &str) -> String {
    match info.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl MetadataDocument {
    /// Load `metadata.yaml` from `dir`.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(METADATA_FILE);
        if !path.is_file() {
            return Self::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "metadata parse failed, treating as absent");
                Self::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "metadata unreadable, treating as absent");
                Self::default()
            }
        }
    }

    /// Parse a document from YAML text.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        let root: serde_yaml::Value = serde_yaml::from_str(text)?;
        let mut tables = IndexMap::new();

        let Some(serde_yaml::Value::Mapping(entries)) = root.get("tables") else {
            debug!("metadata document has no usable 'tables' mapping");
            return Ok(Self { tables });
        };

        for (key, value) in entries {
            let name = yaml_key(key);
            let record = match value {
                serde_yaml::Value::Mapping(_) => TableRecord::Described(TableMetadata {
                    info: json_object(value.get("info")),
                    data_dictionary: json_object(value.get("data_dictionary")),
                }),
                _ => TableRecord::Malformed,
            };
            tables.insert(name, record);
        }

        Ok(Self { tables })
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    /// Metadata for a table, if its entry is a well-formed mapping.
    pub fn table(&self, table_name: &str) -> Option<&TableMetadata> {
        match self.tables.get(table_name) {
            Some(TableRecord::Described(meta)) => Some(meta),
            _ => None,
        }
    }

    /// Well-formed table entries in document order.
    pub fn described_tables(&self) -> impl Iterator<Item = (&str, &TableMetadata)> {
        self.tables.iter().filter_map(|(name, record)| match record {
            TableRecord::Described(meta) => Some((name.as_str(), meta)),
            TableRecord::Malformed => None,
        })
    }
}

/// Where a dataset's table list comes from, decided once per dataset.
#[derive(Debug, Clone)]
pub enum TableSource {
    /// The metadata document declares at least one well-formed table.
    Described(Vec<(String, TableMetadata)>),
    /// No usable metadata; tables are inferred 1:1 from CSV filenames.
    Inferred,
}

impl TableSource {
    pub fn from_document(doc: &MetadataDocument) -> Self {
        let tables: Vec<(String, TableMetadata)> = doc
            .described_tables()
            .map(|(name, meta)| (name.to_string(), meta.clone()))
            .collect();
        if tables.is_empty() {
            TableSource::Inferred
        } else {
            TableSource::Described(tables)
        }
    }

    /// Load the dataset directory's metadata and decide the source.
    pub fn for_dataset(dataset_dir: &Path) -> Self {
        Self::from_document(&MetadataDocument::load(dataset_dir))
    }
}

fn json_object(value: Option<&serde_yaml::Value>) -> Map<String, Value> {
    match value.map(yaml_to_json) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        other => match yaml_to_json(other) {
            Value::String(s) => s,
            json => json.to_string(),
        },
    }
}

/// Convert YAML into JSON, stringifying non-string mapping keys.
pub fn yaml_to_json(value: &serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
