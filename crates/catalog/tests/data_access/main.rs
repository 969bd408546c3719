/// Integration tests for the data-access layer over a generated corpus:
/// catalogue scan, table resolution, schema extraction and queries.

mod catalogue;
mod helpers;
mod query;
mod resolution;
mod schema;
