use rusqlite::types::Value;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{DealProfit, DepositRow, GrowthPoint, ReportRow};
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Integer,
    Real,
    Text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind
}

const fn column(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

/// A row type that can be written as a table, flat file or relational.
///
/// `COLUMNS` must list the fields in the same order serde serializes them.
pub trait TableRow {
    const COLUMNS: &'static [Column];

    fn values(&self) -> Vec<Value>;

    fn header() -> Vec<&'static str> {
        Self::COLUMNS.iter().map(|column| column.name).collect()
    }
}

/// A named table with a fixed column list. Every table also gets a surrogate `id` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: &'static [Column]
}

impl TableSchema {
    pub fn new(name: &str, columns: &'static [Column]) -> Result<Self, StorageError> {
        validate_table_name(name)?;

        Ok(Self {
            name: name.to_string(),
            columns
        })
    }

    pub fn of<R: TableRow>(name: &str) -> Result<Self, StorageError> {
        Self::new(name, R::COLUMNS)
    }

    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter()
            .map(|column| format!("{} {}", column.name, sql_type(column.kind)))
            .collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
            self.name,
            columns.join(", ")
        )
    }

    pub fn insert_sql(&self) -> String {
        let names: Vec<&str> = self.columns.iter().map(|column| column.name).collect();
        let placeholders: Vec<String> = (1..=self.columns.len()).map(|index| format!("?{index}")).collect();

        format!("INSERT INTO {} ({}) VALUES ({})", self.name, names.join(", "), placeholders.join(", "))
    }
}

/// Table names are spliced into SQL, so only plain identifiers are accepted.
pub fn validate_table_name(name: &str) -> Result<(), StorageError> {
    let mut characters = name.chars();
    let valid = characters.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && characters.all(|character| character.is_ascii_alphanumeric() || character == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidTableName(name.to_string()))
    }
}

fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Date | ColumnKind::Text => "TEXT",
        ColumnKind::Integer => "INTEGER",
        ColumnKind::Real => "REAL"
    }
}

fn real(value: Decimal) -> Value {
    value.to_f64().map(Value::Real).unwrap_or(Value::Null)
}

impl TableRow for ReportRow {
    const COLUMNS: &'static [Column] = &[
        column("date", ColumnKind::Date),
        column("type", ColumnKind::Integer),
        column("volume", ColumnKind::Real),
        column("commission", ColumnKind::Real),
        column("swap", ColumnKind::Real),
        column("profit", ColumnKind::Real),
        column("fee", ColumnKind::Real),
        column("symbol", ColumnKind::Text)
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.date.to_string()),
            Value::Integer(i64::from(self.deal_type)),
            real(self.volume),
            real(self.commission),
            real(self.swap),
            real(self.profit),
            real(self.fee),
            Value::Text(self.symbol.clone())
        ]
    }
}

impl TableRow for GrowthPoint {
    const COLUMNS: &'static [Column] = &[
        column("date", ColumnKind::Date),
        column("growth", ColumnKind::Real)
    ];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.date.to_string()), real(self.growth)]
    }
}

impl TableRow for DepositRow {
    const COLUMNS: &'static [Column] = &[
        column("date", ColumnKind::Date),
        column("type", ColumnKind::Integer),
        column("deposit", ColumnKind::Real)
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.date.to_string()),
            Value::Integer(i64::from(self.deal_type)),
            real(self.deposit)
        ]
    }
}

impl TableRow for DealProfit {
    const COLUMNS: &'static [Column] = &[
        column("date", ColumnKind::Date),
        column("symbol", ColumnKind::Text),
        column("type", ColumnKind::Integer),
        column("volume", ColumnKind::Real),
        column("total_profit", ColumnKind::Real)
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.date.to_string()),
            Value::Text(self.symbol.clone()),
            Value::Integer(i64::from(self.deal_type)),
            real(self.volume),
            real(self.total_profit)
        ]
    }
}
