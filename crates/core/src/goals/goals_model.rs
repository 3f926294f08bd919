//! Goals domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A capital milestone for the plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: String,
    pub target_amount: Decimal,
}

impl Goal {
    pub fn new(target_amount: Decimal) -> Self {
        Self {
            title: format!("€ {}", target_amount.round_dp(0)),
            target_amount,
        }
    }
}

/// How far the current value has come toward one target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetProgress {
    pub target: Decimal,
    /// Fraction reached, clamped to `[0, 1]`
    pub fraction: Decimal,
}
