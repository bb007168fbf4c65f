use crate::types::errors::OptionError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which amounts make up the daily growth figure.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GrowthMeasure {
    /// Profit only.
    #[default]
    Narrow,
    /// Profit plus swap, commission and fee.
    Wide
}

impl GrowthMeasure {
    /// Report columns the measure reads, on top of `date` and `type`.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            GrowthMeasure::Narrow => &["profit"],
            GrowthMeasure::Wide => &["profit", "swap", "commission", "fee"]
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[value(alias = "asc")]
    Ascending,
    #[value(alias = "desc")]
    Descending
}

impl Display for GrowthMeasure {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GrowthMeasure::Narrow => write!(formatter, "narrow"),
            GrowthMeasure::Wide => write!(formatter, "wide")
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(formatter, "ascending"),
            SortOrder::Descending => write!(formatter, "descending")
        }
    }
}

impl FromStr for GrowthMeasure {
    type Err = OptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "narrow" => Ok(GrowthMeasure::Narrow),
            "wide" => Ok(GrowthMeasure::Wide),
            _ => Err(OptionError::UnknownMeasure(value.to_string()))
        }
    }
}

impl FromStr for SortOrder {
    type Err = OptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            _ => Err(OptionError::UnknownOrder(value.to_string()))
        }
    }
}
