use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::goals::goals_model::TargetProgress;

/// Parses a comma separated list of targets, keeping the given order.
///
/// Every target must be a positive number.
pub fn parse_targets(spec: &str) -> Result<Vec<Decimal>> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let cleaned = s.replace('_', "");
            let target = Decimal::from_str(&cleaned)
                .map_err(|e| Error::InvalidConfigValue(format!("target '{}': {}", s, e)))?;
            if target <= Decimal::ZERO {
                return Err(Error::InvalidConfigValue(format!(
                    "target '{}' must be positive",
                    s
                )));
            }
            Ok(target)
        })
        .collect()
}

/// `value / target`, clamped to `[0, 1]`. A non-positive target yields 0;
/// a quotient too large for `Decimal` counts as reached.
pub fn progress_fraction(value: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match value.checked_div(target) {
        Some(fraction) => fraction.clamp(Decimal::ZERO, Decimal::ONE),
        None if value.is_sign_negative() => Decimal::ZERO,
        None => Decimal::ONE,
    }
}

/// Progress toward each target, in target order.
pub fn goal_progress(total_current_value: Decimal, targets: &[Decimal]) -> Vec<TargetProgress> {
    targets
        .iter()
        .map(|&target| TargetProgress {
            target,
            fraction: progress_fraction(total_current_value, target),
        })
        .collect()
}
