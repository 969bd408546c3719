use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::DataError;
use crate::plan::{FilterSet, QueryRequest};
use crate::table::{Cell, Column, Table};

/// Numeric columns summarised per query.
const MAX_STATS_COLUMNS: usize = 10;

/// min / max / mean of one numeric column over the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SummaryStats {
    #[serde(flatten)]
    pub columns: IndexMap<String, ColumnStats>,
    #[serde(rename = "_note", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Result of `query_table`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub dataset_id: String,
    pub table_name: String,
    pub total_rows_before_filter: usize,
    pub total_rows_after_filter: usize,
    pub filters_applied: FilterSet,
    pub rows_returned: usize,
    pub limit: usize,
    pub summary_stats: SummaryStats,
    pub data: Vec<IndexMap<String, Cell>>,
}

/// Runs a [`QueryRequest`] against a loaded [`Table`].
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn execute(request: &QueryRequest, table: &Table) -> Result<QueryResult, DataError> {
        let total_before = table.row_count();
        let mut rows: Vec<usize> = (0..total_before).collect();

        for filter in request.filters.iter() {
            let column = table
                .column(filter.column)
                .ok_or_else(|| DataError::ColumnNotFound {
                    column: filter.column.to_string(),
                    valid_columns: sorted_columns(table),
                })?;
            rows.retain(|&row| {
                let text = column.cells[row].to_text().to_lowercase();
                filter.matcher.matches(&text)
            });
            debug!(column = filter.column, remaining = rows.len(), "filter applied");
        }

        let summary_stats = if rows.is_empty() {
            SummaryStats::default()
        } else {
            summarize(table, &rows)
        };

        let data: Vec<IndexMap<String, Cell>> = rows
            .iter()
            .take(request.limit)
            .map(|&row| {
                table
                    .columns()
                    .iter()
                    .map(|c| (c.name.clone(), c.cells[row].clone()))
                    .collect()
            })
            .collect();

        Ok(QueryResult {
            dataset_id: request.dataset_id.clone(),
            table_name: request.table_name.clone(),
            total_rows_before_filter: total_before,
            total_rows_after_filter: rows.len(),
            filters_applied: request.filters.clone(),
            rows_returned: data.len(),
            limit: request.limit,
            summary_stats,
            data,
        })
    }
}

fn sorted_columns(table: &Table) -> Vec<String> {
    let mut columns = table.column_names();
    columns.sort();
    columns
}

fn summarize(table: &Table, rows: &[usize]) -> SummaryStats {
    let numeric: Vec<&Column> = table.columns().iter().filter(|c| c.kind.is_numeric()).collect();

    let columns = numeric
        .iter()
        .take(MAX_STATS_COLUMNS)
        .map(|c| (c.name.clone(), column_stats(c, rows)))
        .collect();

    let note = (numeric.len() > MAX_STATS_COLUMNS).then(|| {
        let omitted: Vec<&str> = numeric[MAX_STATS_COLUMNS..]
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        format!(
            "Showing stats for {} of {} numeric columns. Omitted: {}",
            MAX_STATS_COLUMNS,
            numeric.len(),
            omitted.join(", ")
        )
    });

    SummaryStats { columns, note }
}

fn column_stats(column: &Column, rows: &[usize]) -> ColumnStats {
    let values: Vec<f64> = rows.iter().filter_map(|&r| column.cells[r].as_f64()).collect();
    if values.is_empty() {
        return ColumnStats {
            min: None,
            max: None,
            mean: None,
        };
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    ColumnStats {
        min: Some(round4(min)),
        max: Some(round4(max)),
        mean: Some(round4(mean)),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(body: &str) -> (tempfile::TempDir, Table) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, body).unwrap();
        let table = Table::read_csv(&path).unwrap();
        (dir, table)
    }

    const BODY: &str = "state,year,cases,rate\n\
        KARNATAKA,2019,10,0.5\n\
        Tamil Nadu,2019,20,\n\
        karnataka,2020,30,1.25\n\
        Kerala,2020,40,0.75\n";

    #[test]
    fn filters_are_case_insensitive_and_cumulative() {
        let (_dir, table) = load(BODY);
        let req = QueryRequest::new("0034", "t").with_filter("state", "KARNATAKA");
        let result = QueryExecutor::execute(&req, &table).unwrap();
        assert_eq!(result.total_rows_before_filter, 4);
        assert_eq!(result.total_rows_after_filter, 2);

        let req = QueryRequest::new("0034", "t")
            .with_filter("state", "karnataka")
            .with_filter("year", "2020");
        let result = QueryExecutor::execute(&req, &table).unwrap();
        assert_eq!(result.total_rows_after_filter, 1);
        assert_eq!(result.data[0]["cases"], Cell::Int(30));
    }

    #[test]
    fn comma_values_are_a_union() {
        let (_dir, table) = load(BODY);
        let req = QueryRequest::new("0034", "t").with_filter("state", "Karnataka, tamil nadu");
        let result = QueryExecutor::execute(&req, &table).unwrap();
        assert_eq!(result.total_rows_after_filter, 3);
        let expected: FilterSet = [("state", "Karnataka, tamil nadu")].into_iter().collect();
        assert_eq!(result.filters_applied, expected);
    }

    #[test]
    fn unknown_column_stops_filtering() {
        let (_dir, table) = load(BODY);
        let req = QueryRequest::new("0034", "t")
            .with_filter("bogus", "x")
            .with_filter("state", "Kerala");
        match QueryExecutor::execute(&req, &table).unwrap_err() {
            DataError::ColumnNotFound {
                column,
                valid_columns,
            } => {
                assert_eq!(column, "bogus");
                assert_eq!(valid_columns, vec!["cases", "rate", "state", "year"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn limit_bounds_rows_not_totals() {
        let (_dir, table) = load(BODY);
        let req = QueryRequest::new("0034", "t").with_limit(1);
        let result = QueryExecutor::execute(&req, &table).unwrap();
        assert_eq!(result.rows_returned, 1);
        assert_eq!(result.total_rows_after_filter, 4);
        assert_eq!(result.data[0]["state"], Cell::Text("KARNATAKA".to_string()));
    }

    #[test]
    fn stats_skip_missing_values() {
        let (_dir, table) = load(BODY);
        let result = QueryExecutor::execute(&QueryRequest::new("0034", "t"), &table).unwrap();
        let json = serde_json::to_value(&result.summary_stats).unwrap();
        assert_eq!(json["cases"], json!({"min": 10.0, "max": 40.0, "mean": 25.0}));
        assert_eq!(json["rate"], json!({"min": 0.5, "max": 1.25, "mean": 0.8333}));
        assert!(json.get("_note").is_none());
        assert!(json.get("state").is_none());
    }

    #[test]
    fn empty_result_has_no_stats() {
        let (_dir, table) = load(BODY);
        let req = QueryRequest::new("0034", "t").with_filter("state", "Goa");
        let result = QueryExecutor::execute(&req, &table).unwrap();
        assert_eq!(result.total_rows_after_filter, 0);
        assert!(result.summary_stats.columns.is_empty());
        assert!(result.data.is_empty());
    }

    #[test]
    fn stats_cover_first_ten_numeric_columns() {
        let header: Vec<String> = (0..12).map(|i| format!("n{}", i)).collect();
        let body = format!("{}\n{}\n", header.join(","), vec!["1"; 12].join(","));
        let (_dir, table) = load(&body);
        let result = QueryExecutor::execute(&QueryRequest::new("0034", "t"), &table).unwrap();
        assert_eq!(result.summary_stats.columns.len(), 10);
        let note = result.summary_stats.note.unwrap();
        assert_eq!(note, "Showing stats for 10 of 12 numeric columns. Omitted: n10, n11");
    }
}
