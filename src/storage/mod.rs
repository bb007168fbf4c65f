mod csv_file;
mod errors;
mod schema;
mod sqlite_store;
#[cfg(test)]
mod tests;

pub use csv_file::{read_report, read_report_file, write_csv, write_csv_file};
pub use errors::StorageError;
pub use schema::{validate_table_name, Column, ColumnKind, TableRow, TableSchema};
pub use sqlite_store::SqliteStore;
