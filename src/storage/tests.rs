use super::{
    read_report, read_report_file, validate_table_name, write_csv, write_csv_file, SqliteStore, StorageError,
    TableRow, TableSchema
};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tempfile::tempdir;

use crate::models::{DealProfit, DepositRow, GrowthPoint, ReportRow, REPORT_COLUMNS};
use crate::transform::{growth_columns, TransformError, DEPOSIT_COLUMNS};
use crate::types::{DealTypeCode, GrowthMeasure, SortOrder};

fn create_row(day: &str, deal_type: DealTypeCode, profit: &str, swap: &str) -> Result<ReportRow> {
    Ok(ReportRow {
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d")?,
        deal_type,
        volume: Decimal::from_str("0.10")?,
        commission: Decimal::from(-1),
        swap: Decimal::from_str(swap)?,
        profit: Decimal::from_str(profit)?,
        fee: Decimal::ZERO,
        symbol: "EURUSD".to_string()
    })
}

fn assert_close(actual: &Decimal, expected: f64) -> Result<()> {
    let actual = actual.to_f64().ok_or_else(|| anyhow!("growth not representable"))?;
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    Ok(())
}

#[test]
fn test_table_names_must_be_plain_identifiers() {
    assert!(validate_table_name("fx_history").is_ok());
    assert!(validate_table_name("_tmp2").is_ok());
    assert!(matches!(validate_table_name("2fx"), Err(StorageError::InvalidTableName(_))));
    assert!(validate_table_name("fx-history").is_err());
    assert!(validate_table_name("fx history; --").is_err());
    assert!(validate_table_name("").is_err());
}

#[test]
fn test_schema_descriptor_builds_create_and_insert_statements() -> Result<()> {
    let schema = TableSchema::of::<DepositRow>("fx_deposits")?;

    assert_eq!(
        schema.create_sql(),
        "CREATE TABLE IF NOT EXISTS fx_deposits (id INTEGER PRIMARY KEY AUTOINCREMENT, date TEXT, type INTEGER, deposit REAL)"
    );
    assert_eq!(schema.insert_sql(), "INSERT INTO fx_deposits (date, type, deposit) VALUES (?1, ?2, ?3)");

    Ok(())
}

#[test]
fn test_row_headers_follow_serialization_order() {
    assert_eq!(ReportRow::header(), REPORT_COLUMNS.to_vec());
    assert_eq!(GrowthPoint::header(), vec!["date", "growth"]);
    assert_eq!(DepositRow::header(), vec!["date", "type", "deposit"]);
    assert_eq!(DealProfit::header(), vec!["date", "symbol", "type", "volume", "total_profit"]);
}

#[test]
fn test_csv_writer_emits_header_for_empty_batch() -> Result<()> {
    let mut buffer = Vec::new();
    write_csv::<GrowthPoint, _>(&mut buffer, &[])?;

    assert_eq!(String::from_utf8(buffer)?, "date,growth\n");

    Ok(())
}

#[test]
fn test_report_file_survives_write_and_read() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("nested").join("report.csv");
    let rows = vec![create_row("2023-09-02", 0, "12.5", "-0.3")?, create_row("2023-09-01", 2, "500", "0")?];

    write_csv_file(&path, &rows)?;
    let loaded = read_report_file(&path, &REPORT_COLUMNS)?;

    assert_eq!(loaded, rows);

    Ok(())
}

#[test]
fn test_report_reader_fails_fast_on_missing_columns() {
    let content = "date,type,volume\n2023-01-01,0,0.1\n";

    let result = read_report(content.as_bytes(), &growth_columns(GrowthMeasure::Narrow));

    assert!(matches!(result, Err(StorageError::Schema(TransformError::SchemaMismatch { .. }))));
}

#[test]
fn test_report_reader_ignores_index_columns_and_optional_amounts() -> Result<()> {
    let content = ",date,type,profit\n0,2023-01-01,2,200\n1,2023-01-01,0,10\n";

    let rows = read_report(content.as_bytes(), &DEPOSIT_COLUMNS)?;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].profit, Decimal::from(200));
    assert!(rows[1].fee.is_zero());

    Ok(())
}

#[test]
fn test_report_reader_rejects_wide_measure_without_costs() {
    let content = "date,type,profit\n2023-01-01,0,10\n";

    assert!(read_report(content.as_bytes(), &growth_columns(GrowthMeasure::Wide)).is_err());
    assert!(read_report(content.as_bytes(), &growth_columns(GrowthMeasure::Narrow)).is_ok());
}

#[test]
fn test_write_table_overwrites_existing_rows() -> Result<()> {
    let mut store = SqliteStore::in_memory()?;
    let first = vec![create_row("2023-01-01", 0, "1", "0")?, create_row("2023-01-02", 0, "2", "0")?];
    let second = vec![create_row("2023-02-01", 1, "3", "0")?];

    assert!(!store.table_exists("fx_history")?);
    store.write_table("fx_history", &first)?;
    store.write_table("fx_history", &second)?;

    let loaded = store.load_report("fx_history")?;

    assert!(store.table_exists("fx_history")?);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].date, second[0].date);
    assert_eq!(loaded[0].deal_type, 1);
    assert_eq!(loaded[0].symbol, "EURUSD");

    Ok(())
}

#[test]
fn test_growth_query_excludes_deposits_and_honours_options() -> Result<()> {
    let mut store = SqliteStore::in_memory()?;
    let rows = vec![
        create_row("2023-01-01", 0, "100", "-5")?,
        create_row("2023-01-01", 1, "50", "0")?,
        create_row("2023-01-02", 2, "9999", "0")?,
        create_row("2023-01-03", 0, "-20", "0")?
    ];
    store.write_table("fx_history", &rows)?;

    let narrow = store.growth_from_table("fx_history", GrowthMeasure::Narrow, SortOrder::Ascending)?;
    let wide = store.growth_from_table("fx_history", GrowthMeasure::Wide, SortOrder::Descending)?;

    assert_eq!(narrow.len(), 2);
    assert_close(&narrow[0].growth, 150.0)?;
    assert_close(&narrow[1].growth, -20.0)?;

    assert_eq!(wide[0].date, NaiveDate::parse_from_str("2023-01-03", "%Y-%m-%d")?);
    assert_close(&wide[0].growth, -21.0)?;
    assert_close(&wide[1].growth, 143.0)?;

    Ok(())
}

#[test]
fn test_seed_appends_sample_days_without_dropping_table() -> Result<()> {
    let directory = tempdir()?;
    let mut store = SqliteStore::open(&directory.path().join("seed.db"))?;

    assert_eq!(store.seed_sample_growth("fx_tabtest")?, 10);
    assert_eq!(store.seed_sample_growth("fx_tabtest")?, 10);

    let growth = store.growth_from_table("fx_tabtest", GrowthMeasure::Narrow, SortOrder::Ascending)?;

    assert_eq!(growth.len(), 10);
    assert_close(&growth[0].growth, 201.0)?;
    assert_close(&growth[9].growth, 181.2)?;

    Ok(())
}

#[test]
fn test_invalid_table_name_is_rejected_before_any_sql_runs() -> Result<()> {
    let mut store = SqliteStore::in_memory()?;

    let result = store.write_table::<GrowthPoint>("growth; DROP TABLE x", &[]);

    assert!(matches!(result, Err(StorageError::InvalidTableName(_))));

    Ok(())
}
