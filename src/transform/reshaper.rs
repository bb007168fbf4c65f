use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::{RawDeal, ReportRow};
use crate::transform::TransformError;

/// Splits a `date time` timestamp into its calendar date and time-of-day text.
///
/// Returns `None` unless the value holds exactly two whitespace separated parts and
/// the first is an ISO calendar date.
pub fn split_timestamp(value: &str) -> Option<(NaiveDate, &str)> {
    let mut parts = value.split_whitespace();
    let date = parts.next()?;
    let time = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((date, time))
}

/// Projects a batch of raw deals onto the report columns.
///
/// One row comes out for every deal that goes in, in the same order. A single
/// timestamp that cannot be split aborts the whole batch.
pub fn reshape(deals: &[RawDeal]) -> Result<Vec<ReportRow>, TransformError> {
    info!("Reshaping {} deal(s) into report rows", deals.len());

    let rows = deals.iter().map(|deal| {
        let (date, _time) = split_timestamp(&deal.time).ok_or_else(|| TransformError::MalformedTimestamp {
            ticket: deal.ticket,
            value: deal.time.clone()
        })?;

        Ok(ReportRow {
            date,
            deal_type: deal.deal_type,
            volume: deal.volume,
            commission: deal.commission,
            swap: deal.swap,
            profit: deal.profit,
            fee: deal.fee,
            symbol: deal.symbol.clone()
        })
    }).collect::<Result<Vec<_>, TransformError>>()?;

    debug!("Reshaping produced {} row(s)", rows.len());

    Ok(rows)
}
