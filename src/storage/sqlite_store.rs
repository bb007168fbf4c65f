use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{GrowthPoint, ReportRow};
use crate::storage::{StorageError, TableRow, TableSchema};
use crate::types::{GrowthMeasure, SortOrder, DEPOSIT_DEAL_TYPE};

/// Sample trading days (January 2023, profit in cents) inserted by [`SqliteStore::seed_sample_growth`].
const SAMPLE_GROWTH: [(u32, i64); 10] = [
    (1, 10050),
    (2, 15025),
    (3, 20075),
    (4, 5000),
    (5, 30080),
    (6, 7550),
    (7, 18030),
    (8, 25010),
    (9, 12090),
    (10, 9060)
];

/// Relational sink backed by a single SQLite database.
pub struct SqliteStore {
    connection: Connection
}

impl SqliteStore {
    /// Opens (or creates) the database file, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let connection = Connection::open(path)?;
        info!("Database ready at {}", path.display());

        Ok(Self { connection })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self { connection: Connection::open_in_memory()? })
    }

    pub fn table_exists(&self, name: &str) -> Result<bool, StorageError> {
        let found = self.connection
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get::<_, String>(0)
            )
            .optional()?;

        Ok(found.is_some())
    }

    /// Creates the table, dropping any existing table of the same name first.
    pub fn replace_table(&mut self, schema: &TableSchema) -> Result<(), StorageError> {
        if self.table_exists(&schema.name)? {
            debug!("Table {} exists, overwriting it", schema.name);
            self.connection.execute(&format!("DROP TABLE {}", schema.name), [])?;
        }

        self.connection.execute(&schema.create_sql(), [])?;

        Ok(())
    }

    /// Inserts rows in a single transaction. Returns the number of rows inserted.
    pub fn insert_rows<R: TableRow>(&mut self, schema: &TableSchema, rows: &[R]) -> Result<usize, StorageError> {
        let transaction = self.connection.transaction()?;

        {
            let mut statement = transaction.prepare(&schema.insert_sql())?;

            for row in rows {
                statement.execute(params_from_iter(row.values()))?;
            }
        }

        transaction.commit()?;

        Ok(rows.len())
    }

    /// Overwrites `table` with exactly the given rows.
    pub fn write_table<R: TableRow>(&mut self, table: &str, rows: &[R]) -> Result<usize, StorageError> {
        let schema = TableSchema::of::<R>(table)?;

        self.replace_table(&schema)?;
        let inserted = self.insert_rows(&schema, rows)?;

        info!("Inserted {inserted} row(s) into {table}");

        Ok(inserted)
    }

    /// Creates a report table if absent and appends ten sample trading days to it.
    pub fn seed_sample_growth(&mut self, table: &str) -> Result<usize, StorageError> {
        let schema = TableSchema::of::<ReportRow>(table)?;
        self.connection.execute(&schema.create_sql(), [])?;

        let rows: Vec<ReportRow> = SAMPLE_GROWTH.iter()
            .filter_map(|&(day, cents)| sample_row(day, cents))
            .collect();

        let inserted = self.insert_rows(&schema, &rows)?;
        info!("Table {table} and sample data inserted successfully");

        Ok(inserted)
    }

    pub fn load_report(&self, table: &str) -> Result<Vec<ReportRow>, StorageError> {
        let schema = TableSchema::of::<ReportRow>(table)?;
        let columns = ReportRow::header().join(", ");
        let mut statement = self.connection.prepare(&format!("SELECT {columns} FROM {} ORDER BY id", schema.name))?;

        let rows = statement
            .query_map([], |row| {
                Ok(ReportRow {
                    date: date_column(row, 0)?,
                    deal_type: row.get(1)?,
                    volume: decimal_column(row, 2)?,
                    commission: decimal_column(row, 3)?,
                    swap: decimal_column(row, 4)?,
                    profit: decimal_column(row, 5)?,
                    fee: decimal_column(row, 6)?,
                    symbol: row.get(7)?
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Daily growth computed by the database over a stored report table.
    pub fn growth_from_table(&self, table: &str, measure: GrowthMeasure, order: SortOrder) -> Result<Vec<GrowthPoint>, StorageError> {
        let schema = TableSchema::of::<ReportRow>(table)?;
        let amount = match measure {
            GrowthMeasure::Narrow => "profit",
            GrowthMeasure::Wide => "profit + swap + commission + fee"
        };
        let direction = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC"
        };

        let query = format!(
            "SELECT date, SUM({amount}) AS growth FROM {} WHERE type != ?1 GROUP BY date ORDER BY date {direction}",
            schema.name
        );

        let mut statement = self.connection.prepare(&query)?;
        let points = statement
            .query_map([DEPOSIT_DEAL_TYPE], |row| {
                Ok(GrowthPoint {
                    date: date_column(row, 0)?,
                    growth: decimal_column(row, 1)?
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(points)
    }
}

fn sample_row(day: u32, cents: i64) -> Option<ReportRow> {
    Some(ReportRow {
        date: NaiveDate::from_ymd_opt(2023, 1, day)?,
        deal_type: 0,
        volume: Decimal::ZERO,
        commission: Decimal::ZERO,
        swap: Decimal::ZERO,
        profit: Decimal::new(cents, 2),
        fee: Decimal::ZERO,
        symbol: String::new()
    })
}

fn date_column(row: &Row<'_>, index: usize) -> rusqlite::Result<NaiveDate> {
    let value: String = row.get(index)?;

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

fn decimal_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Decimal> {
    let value: Option<f64> = row.get(index)?;

    match value {
        None => Ok(Decimal::ZERO),
        Some(value) => Decimal::from_f64(value).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Real, format!("{value} is not representable").into())
        })
    }
}
