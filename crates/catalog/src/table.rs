//! In-memory tabular data loaded from a CSV file.
//!
//! Columns are typed by best-effort inference over every non-missing cell:
//! a column is `int64` if all values parse as integers, `float64` if all parse
//! as numbers, `bool` if all are true/false literals, and `object` (text)
//! otherwise.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::ser::{Serialize, Serializer};

use crate::error::DataError;

/// Tokens read as missing values.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnType {
    /// Label reported in schema summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "object",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ColumnType::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Text form used for filter comparison.
    ///
    /// Integral floats keep a trailing `.0` so they read the same as their
    /// JSON rendering in returned rows; missing cells compare as "".
    pub fn to_text(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    /// Total order within one column: missing first, numbers numerically,
    /// text lexicographically.
    pub fn sort_cmp(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Missing, Cell::Missing) => Ordering::Equal,
            (Cell::Missing, _) => Ordering::Less,
            (_, Cell::Missing) => Ordering::Greater,
            (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.to_text().cmp(&b.to_text()),
            },
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Missing => serializer.serialize_none(),
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Cell::Float(_) => serializer.serialize_none(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        String::new()
    } else if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// A named, typed column.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
    pub cells: Vec<Cell>,
}

/// A fully-loaded table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Read a whole CSV file.
    ///
    /// Short records are padded with missing cells; a record with more
    /// fields than the header fails the read.
    pub fn read_csv(path: &Path) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::read_failure(path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::read_failure(path, e))?
            .clone();
        let names = dedupe_headers(headers.iter());

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        let mut row_count = 0usize;
        for record in reader.records() {
            let record = record.map_err(|e| DataError::read_failure(path, e))?;
            if record.len() > names.len() {
                return Err(DataError::read_failure(
                    path,
                    format!(
                        "record {} has {} fields, but the header has {}",
                        row_count + 1,
                        record.len(),
                        names.len()
                    ),
                ));
            }
            for (idx, column) in raw.iter_mut().enumerate() {
                column.push(record.get(idx).unwrap_or_default().to_string());
            }
            row_count += 1;
        }

        let columns = names
            .into_iter()
            .zip(raw)
            .map(|(name, values)| Column::infer(name, values))
            .collect();

        Ok(Self { columns, row_count })
    }

    /// Read only the header row, with the same disambiguation as `read_csv`.
    pub fn read_header(path: &Path) -> Result<Vec<String>, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| DataError::read_failure(path, e))?;
        let headers = reader
            .headers()
            .map_err(|e| DataError::read_failure(path, e))?;
        Ok(dedupe_headers(headers.iter()))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl Column {
    fn infer(name: String, values: Vec<String>) -> Self {
        let kind = infer_type(&values);
        let cells = values.into_iter().map(|v| parse_cell(v, kind)).collect();
        Self { name, kind, cells }
    }

    /// Distinct non-missing values, sorted ascending.
    pub fn distinct_values(&self) -> Vec<Cell> {
        let mut values: Vec<Cell> = self.cells.iter().filter(|c| !c.is_missing()).cloned().collect();
        values.sort_by(|a, b| a.sort_cmp(b));
        values.dedup_by(|a, b| a.sort_cmp(b) == Ordering::Equal);
        values
    }
}

fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

fn is_bool_literal(value: &str) -> bool {
    matches!(value, "True" | "False" | "true" | "false" | "TRUE" | "FALSE")
}

fn infer_type(values: &[String]) -> ColumnType {
    let mut non_missing = 0usize;
    let mut ints = 0usize;
    let mut floats = 0usize;
    let mut bools = 0usize;

    for value in values {
        let trimmed = value.trim();
        if is_missing_token(trimmed) {
            continue;
        }
        non_missing += 1;
        if trimmed.parse::<i64>().is_ok() {
            ints += 1;
            floats += 1;
        } else if trimmed.parse::<f64>().is_ok() {
            floats += 1;
        } else if is_bool_literal(trimmed) {
            bools += 1;
        } else {
            // One unparseable value makes the column text.
            return ColumnType::Text;
        }
    }

    if non_missing == 0 {
        ColumnType::Float
    } else if ints == non_missing {
        ColumnType::Integer
    } else if floats == non_missing {
        ColumnType::Float
    } else if bools == non_missing {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

fn parse_cell(value: String, kind: ColumnType) -> Cell {
    let trimmed = value.trim();
    if is_missing_token(trimmed) {
        return Cell::Missing;
    }
    match kind {
        ColumnType::Integer => trimmed.parse().map(Cell::Int).unwrap_or(Cell::Missing),
        ColumnType::Float => trimmed.parse().map(Cell::Float).unwrap_or(Cell::Missing),
        ColumnType::Boolean => Cell::Bool(trimmed.eq_ignore_ascii_case("true")),
        ColumnType::Text => Cell::Text(value),
    }
}

/// Disambiguate repeated header names as `name`, `name.1`, `name.2`, ...
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for header in headers {
        let mut candidate = header.to_string();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}
