use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A filtered read of one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub dataset_id: String,
    pub table_name: String,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

impl QueryRequest {
    pub fn new(dataset_id: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            table_name: table_name.into(),
            filters: FilterSet::default(),
            limit: default_limit(),
        }
    }

    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(column, value);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Column filters in the order the caller supplied them.
///
/// Serialized as a JSON object; later duplicates of a column replace the
/// earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(IndexMap<String, String>);

impl FilterSet {
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ColumnFilter<'_>> {
        self.0.iter().map(|(column, value)| ColumnFilter {
            column,
            value,
            matcher: FilterMatcher::parse(value),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::default();
        for (column, value) in iter {
            set.push(column, value);
        }
        set
    }
}

/// One `(column, value)` pair with its parsed matcher.
#[derive(Debug, Clone)]
pub struct ColumnFilter<'a> {
    pub column: &'a str,
    /// Value as supplied, echoed back in results.
    pub value: &'a str,
    pub matcher: FilterMatcher,
}

/// Case-insensitive comparison against a cell's text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMatcher {
    Exact(String),
    /// Comma-separated value: matches any segment.
    AnyOf(Vec<String>),
}

impl FilterMatcher {
    pub fn parse(value: &str) -> Self {
        if value.contains(',') {
            FilterMatcher::AnyOf(value.split(',').map(|v| v.trim().to_lowercase()).collect())
        } else {
            FilterMatcher::Exact(value.to_lowercase())
        }
    }

    /// `text` must already be lowercased.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            FilterMatcher::Exact(expected) => text == expected,
            FilterMatcher::AnyOf(options) => options.iter().any(|o| o == text),
        }
    }
}
