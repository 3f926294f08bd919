//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_LEDGER_VALUE;
use crate::errors::{Result, ValidationError};

/// One row of the ledger.
///
/// `invested_amount` and `quantity` are supplied independently; nothing
/// ties them to `purchase_price`. Invested totals use the amount, current
/// value uses the quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub instrument: String,
    pub invested_amount: Decimal,
    /// Informational only; not used for valuation
    pub purchase_price: Decimal,
    pub quantity: Decimal,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        instrument: impl Into<String>,
        invested_amount: Decimal,
        purchase_price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            date,
            instrument: instrument.into(),
            invested_amount,
            purchase_price,
            quantity,
        }
    }
}

/// Input model for recording a new purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Defaults to today when omitted
    pub date: Option<NaiveDate>,
    pub instrument: String,
    pub invested_amount: Decimal,
    pub purchase_price: Decimal,
    pub quantity: Decimal,
}

impl NewTransaction {
    /// Checks the fields that do not depend on the instrument catalogue.
    pub fn validate(&self) -> Result<()> {
        if self.instrument.trim().is_empty() {
            return Err(ValidationError::MissingField("instrument".to_string()).into());
        }
        for (field, value) in [
            ("investedAmount", self.invested_amount),
            ("purchasePrice", self.purchase_price),
            ("quantity", self.quantity),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ValidationError::NegativeAmount {
                    field: field.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
            if value > MAX_LEDGER_VALUE {
                return Err(ValidationError::AmountTooLarge {
                    field: field.to_string(),
                    value: value.to_string(),
                    max: MAX_LEDGER_VALUE.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Converts into a ledger row, using `default_date` when no date was given.
    pub fn into_transaction(self, default_date: NaiveDate) -> Transaction {
        Transaction {
            date: self.date.unwrap_or(default_date),
            instrument: self.instrument.trim().to_string(),
            invested_amount: self.invested_amount,
            purchase_price: self.purchase_price,
            quantity: self.quantity,
        }
    }
}
