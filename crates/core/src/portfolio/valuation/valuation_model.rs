use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;
use crate::goals::TargetProgress;

/// Which monetary figure allocation percentages are computed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationBasis {
    #[default]
    CurrentValue,
    Invested,
}

impl AllocationBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationBasis::CurrentValue => "current_value",
            AllocationBasis::Invested => "invested",
        }
    }
}

impl fmt::Display for AllocationBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current_value" | "current-value" | "value" => Ok(AllocationBasis::CurrentValue),
            "invested" => Ok(AllocationBasis::Invested),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown allocation basis '{}', expected 'current_value' or 'invested'",
                other
            ))),
        }
    }
}

/// Calendar period used to group the cumulative series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketGranularity {
    #[default]
    Day,
    Month,
    Year,
}

impl BucketGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketGranularity::Day => "day",
            BucketGranularity::Month => "month",
            BucketGranularity::Year => "year",
        }
    }
}

impl fmt::Display for BucketGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketGranularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(BucketGranularity::Day),
            "month" | "monthly" => Ok(BucketGranularity::Month),
            "year" | "yearly" => Ok(BucketGranularity::Year),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown bucket '{}', expected 'day', 'month' or 'year'",
                other
            ))),
        }
    }
}

/// Report-level choices left to configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationOptions {
    pub basis: AllocationBasis,
    pub granularity: BucketGranularity,
}

/// One instrument's share of the allocation basis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub instrument: String,
    /// Sum of the basis figure over the instrument's rows
    pub value: Decimal,
    /// Share of the basis total, 0-100
    pub percentage: Decimal,
}

/// Running totals at the end of one time bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub bucket: NaiveDate,
    pub label: String,
    pub invested: Decimal,
    pub current_value: Decimal,
}

/// Everything the dashboard shows for one refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub total_invested: Decimal,
    pub total_current_value: Decimal,
    pub profit: Decimal,
    /// Profit relative to the invested total, in percent
    pub profit_pct: Decimal,
    pub allocation_basis: AllocationBasis,
    pub allocation: Vec<AllocationSlice>,
    pub cumulative_series: Vec<SeriesPoint>,
    pub progress: Vec<TargetProgress>,
}
