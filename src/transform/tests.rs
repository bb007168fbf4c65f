use super::{
    deal_profits, filter_by_type, filter_deposits, growth_columns, require_columns, reshape, split_timestamp,
    GrowthAggregator, TransformError
};

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::models::{RawDeal, ReportRow};
use crate::types::{DealTypeCode, GrowthMeasure, SortOrder};

fn date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value, "%Y-%m-%d")?)
}

fn create_row(day: &str, deal_type: DealTypeCode, profit: &str) -> Result<ReportRow> {
    Ok(ReportRow {
        date: date(day)?,
        deal_type,
        volume: Decimal::ZERO,
        commission: Decimal::ZERO,
        swap: Decimal::ZERO,
        profit: Decimal::from_str(profit)?,
        fee: Decimal::ZERO,
        symbol: String::new()
    })
}

fn create_deal(ticket: u64, time: &str, deal_type: DealTypeCode, profit: &str) -> Result<RawDeal> {
    Ok(RawDeal {
        ticket,
        time: time.to_string(),
        deal_type,
        volume: Decimal::from_str("0.01")?,
        price: Decimal::ZERO,
        commission: Decimal::ZERO,
        swap: Decimal::ZERO,
        profit: Decimal::from_str(profit)?,
        fee: Decimal::ZERO,
        symbol: "EURUSD".to_string()
    })
}

#[test]
fn test_split_timestamp_separates_date_from_time() -> Result<()> {
    let (day, time) = split_timestamp("2023-09-01 14:03:22").ok_or_else(|| anyhow!("split failed"))?;

    assert_eq!(day, date("2023-09-01")?);
    assert_eq!(time, "14:03:22");
    assert!(split_timestamp("2023-09-01").is_none());
    assert!(split_timestamp("01/09/2023 14:03:22").is_none());
    assert!(split_timestamp("2023-09-01 14:03:22 UTC").is_none());
    assert!(split_timestamp("").is_none());

    Ok(())
}

#[test]
fn test_reshape_preserves_row_count_and_order() -> Result<()> {
    let deals = vec![
        create_deal(1, "2023-09-02 10:00:00", 0, "5")?,
        create_deal(2, "2023-09-01 09:00:00", 2, "1000")?,
        create_deal(3, "2023-09-02 23:59:59", 1, "-3.5")?
    ];

    let rows = reshape(&deals)?;

    assert_eq!(rows.len(), deals.len());
    assert_eq!(rows[0].date, date("2023-09-02")?);
    assert_eq!(rows[1].deal_type, 2);
    assert_eq!(rows[2].profit, Decimal::from_str("-3.5")?);
    assert_eq!(rows[2].symbol, "EURUSD");

    Ok(())
}

#[test]
fn test_reshape_aborts_batch_on_malformed_timestamp() -> Result<()> {
    let deals = vec![
        create_deal(1, "2023-09-02 10:00:00", 0, "5")?,
        create_deal(42, "yesterday", 0, "5")?
    ];

    let result = reshape(&deals);

    assert!(matches!(result, Err(TransformError::MalformedTimestamp { ticket: 42, .. })));

    Ok(())
}

#[test]
fn test_narrow_growth_excludes_deposits_and_merges_dates() -> Result<()> {
    let rows = vec![
        create_row("2023-01-01", 0, "100")?,
        create_row("2023-01-01", 0, "50")?,
        create_row("2023-01-02", 2, "9999")?
    ];

    let series = GrowthAggregator::default().aggregate(&rows)?;

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, date("2023-01-01")?);
    assert_eq!(series[0].growth, Decimal::from(150));

    Ok(())
}

#[test]
fn test_empty_batch_yields_empty_series() -> Result<()> {
    let series = GrowthAggregator::new(GrowthMeasure::Wide, SortOrder::Descending).aggregate(&[])?;

    assert!(series.is_empty());

    Ok(())
}

#[test]
fn test_batch_of_only_deposits_yields_empty_series() -> Result<()> {
    let rows = vec![create_row("2023-01-01", 2, "500")?];

    assert!(GrowthAggregator::default().aggregate(&rows)?.is_empty());

    Ok(())
}

#[test]
fn test_wide_growth_applies_swap_commission_and_fee() -> Result<()> {
    let mut row = create_row("2023-01-03", 1, "100")?;
    row.swap = Decimal::from(-5);
    row.commission = Decimal::from(-2);
    row.fee = Decimal::from(-1);

    let wide = GrowthAggregator::new(GrowthMeasure::Wide, SortOrder::Ascending).aggregate(&[row.clone()])?;
    let narrow = GrowthAggregator::new(GrowthMeasure::Narrow, SortOrder::Ascending).aggregate(&[row])?;

    assert_eq!(wide[0].growth, Decimal::from(92));
    assert_eq!(narrow[0].growth, Decimal::from(100));

    Ok(())
}

#[test]
fn test_growth_sort_direction_is_configurable() -> Result<()> {
    let rows = vec![
        create_row("2023-01-02", 0, "1")?,
        create_row("2023-01-03", 0, "1")?,
        create_row("2023-01-01", 0, "1")?
    ];

    let ascending = GrowthAggregator::new(GrowthMeasure::Narrow, SortOrder::Ascending).aggregate(&rows)?;
    let descending = GrowthAggregator::new(GrowthMeasure::Narrow, SortOrder::Descending).aggregate(&rows)?;

    let ascending_dates: Vec<_> = ascending.iter().map(|point| point.date).collect();
    let descending_dates: Vec<_> = descending.iter().map(|point| point.date).collect();

    assert_eq!(ascending_dates, vec![date("2023-01-01")?, date("2023-01-02")?, date("2023-01-03")?]);
    assert_eq!(descending_dates, vec![date("2023-01-03")?, date("2023-01-02")?, date("2023-01-01")?]);

    Ok(())
}

#[test]
fn test_growth_is_idempotent_with_unique_dates_and_exact_sums() -> Result<()> {
    let mut rows = Vec::new();

    for day in 1..=9 {
        for deal in 0..5 {
            let profit = format!("{}.{}", day * 10 - deal, deal + 1);
            rows.push(create_row(&format!("2023-03-0{day}"), deal % 3, &profit)?);
        }
    }

    let aggregator = GrowthAggregator::new(GrowthMeasure::Narrow, SortOrder::Descending);
    let first = aggregator.aggregate(&rows)?;
    let second = aggregator.aggregate(&rows)?;

    assert_eq!(first, second);

    let unique: HashSet<_> = first.iter().map(|point| point.date).collect();
    assert_eq!(unique.len(), first.len());

    for point in &first {
        let expected: Decimal = rows.iter()
            .filter(|row| row.date == point.date && row.deal_type != 2)
            .map(|row| row.profit)
            .sum();

        assert_eq!(point.growth, expected);
    }

    Ok(())
}

#[test]
fn test_growth_overflow_is_reported_not_panicked() -> Result<()> {
    let mut first = create_row("2023-01-01", 0, "0")?;
    first.profit = Decimal::MAX;
    let second = first.clone();

    let result = GrowthAggregator::default().aggregate(&[first, second]);

    match result {
        Err(TransformError::Overflow { date: day }) => assert_eq!(day, date("2023-01-01")?),
        other => panic!("expected overflow, got {other:?}")
    }

    Ok(())
}

#[test]
fn test_wide_growth_overflow_within_single_row() -> Result<()> {
    let mut row = create_row("2023-01-02", 1, "0")?;
    row.profit = Decimal::MAX;
    row.swap = Decimal::ONE;

    let result = GrowthAggregator::new(GrowthMeasure::Wide, SortOrder::Ascending).aggregate(&[row]);

    assert!(matches!(result, Err(TransformError::Overflow { .. })));

    Ok(())
}

#[test]
fn test_deal_profits_overflow_is_reported() -> Result<()> {
    let mut row = create_row("2023-01-03", 0, "0")?;
    row.profit = Decimal::MAX;
    row.commission = Decimal::MAX;

    assert!(matches!(deal_profits(&[row]), Err(TransformError::Overflow { .. })));

    Ok(())
}

#[test]
fn test_deposit_filter_renames_profit_to_deposit() -> Result<()> {
    let rows = vec![
        create_row("2023-01-01", 2, "200")?,
        create_row("2023-01-01", 0, "10")?
    ];

    let deposits = filter_deposits(&rows);

    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].date, date("2023-01-01")?);
    assert_eq!(deposits[0].deal_type, 2);
    assert_eq!(deposits[0].deposit, Decimal::from(200));

    Ok(())
}

#[test]
fn test_deposit_filter_keeps_one_row_per_event() -> Result<()> {
    let rows = vec![
        create_row("2023-01-01", 2, "200")?,
        create_row("2023-01-01", 2, "-50")?,
        create_row("2023-01-02", 0, "10")?
    ];

    assert_eq!(filter_deposits(&rows).len(), 2);
    assert_eq!(filter_by_type(&rows, 0).len(), 1);
    assert!(filter_by_type(&rows, 7).is_empty());

    Ok(())
}

#[test]
fn test_deal_profits_skip_deposits_and_sort_by_date() -> Result<()> {
    let mut late = create_row("2023-01-05", 1, "20")?;
    late.commission = Decimal::from(-1);
    late.swap = Decimal::from_str("-0.5")?;

    let rows = vec![late, create_row("2023-01-04", 2, "1000")?, create_row("2023-01-02", 0, "7")?];
    let profits = deal_profits(&rows)?;

    assert_eq!(profits.len(), 2);
    assert_eq!(profits[0].date, date("2023-01-02")?);
    assert_eq!(profits[1].total_profit, Decimal::from_str("18.5")?);

    Ok(())
}

#[test]
fn test_require_columns_reports_every_missing_column() {
    let headers = StringRecord::from(vec!["date", " type ", "symbol"]);

    let result = require_columns(&headers, &growth_columns(GrowthMeasure::Wide));

    match result {
        Err(TransformError::SchemaMismatch { missing }) => {
            assert_eq!(missing, vec!["profit", "swap", "commission", "fee"]);
        }
        other => panic!("expected schema mismatch, got {other:?}")
    }

    assert!(require_columns(&headers, &["date", "type"]).is_ok());
}
