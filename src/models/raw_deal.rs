use chrono::DateTime;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::types::{DealTicket, DealTypeCode};

/// Textual layout of a deal timestamp once it leaves the extraction stage.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single deal as reported by the trading terminal.
///
/// The terminal hands out `time` as epoch seconds. It is rendered to its textual
/// `date time` form at ingestion, so later stages only ever see text; exports that
/// already carry the textual form are accepted unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDeal {
    #[serde(default)]
    pub ticket: DealTicket,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub time: String,
    #[serde(rename = "type")]
    pub deal_type: DealTypeCode,
    #[serde(default)]
    pub volume: Decimal,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default)]
    pub swap: Decimal,
    pub profit: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub symbol: String
}

/// Renders epoch seconds in the textual timestamp layout.
pub fn format_epoch(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0)
        .map(|moment| moment.naive_utc().format(TIMESTAMP_FORMAT).to_string())
}

pub(super) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimestampVisitor;

    impl Visitor<'_> for TimestampVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("epoch seconds or a 'date time' string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            format_epoch(value).ok_or_else(|| E::custom(format!("epoch seconds out of range: {value}")))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            let seconds = i64::try_from(value)
                .map_err(|_| E::custom(format!("epoch seconds out of range: {value}")))?;
            self.visit_i64(seconds)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
            if !value.is_finite() {
                return Err(E::custom(format!("epoch seconds must be finite: {value}")));
            }
            self.visit_i64(value.trunc() as i64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}
