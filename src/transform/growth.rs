use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{GrowthPoint, ReportRow};
use crate::transform::TransformError;
use crate::types::{GrowthMeasure, SortOrder, DEPOSIT_DEAL_TYPE};

/// Folds report rows into one growth figure per calendar date.
///
/// Balance operations never count towards growth. Holds no state between calls, so
/// the same rows always produce the same series.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GrowthAggregator {
    measure: GrowthMeasure,
    order: SortOrder
}

impl GrowthAggregator {
    pub fn new(measure: GrowthMeasure, order: SortOrder) -> Self {
        Self { measure, order }
    }

    pub fn measure(&self) -> GrowthMeasure {
        self.measure
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn aggregate(&self, rows: &[ReportRow]) -> Result<Vec<GrowthPoint>, TransformError> {
        let mut daily = BTreeMap::<NaiveDate, Decimal>::new();

        for row in rows.iter().filter(|row| row.deal_type != DEPOSIT_DEAL_TYPE) {
            let amount = self.amount(row).ok_or(TransformError::Overflow { date: row.date })?;
            let total = daily.entry(row.date).or_default();

            *total = total.checked_add(amount)
                .ok_or(TransformError::Overflow { date: row.date })?;
        }

        let points = daily.into_iter().map(|(date, growth)| GrowthPoint { date, growth });
        let series: Vec<GrowthPoint> = match self.order {
            SortOrder::Ascending => points.collect(),
            SortOrder::Descending => points.rev().collect()
        };

        debug!("Aggregated {} row(s) into {} growth point(s) [{}/{}]", rows.len(), series.len(), self.measure, self.order);

        Ok(series)
    }

    fn amount(&self, row: &ReportRow) -> Option<Decimal> {
        match self.measure {
            GrowthMeasure::Narrow => Some(row.profit),
            GrowthMeasure::Wide => row.total_profit()
        }
    }
}
