//! Quote domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::quotes::quotes_errors::LookupError;

/// Instrument id → current price. A missing entry means price 0.
pub type PriceMap = HashMap<String, Decimal>;

/// Outcome of looking up one instrument, before collapsing.
pub type PriceLookup = (String, Result<Decimal, LookupError>);

/// Live price of one catalogue instrument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPrice {
    pub instrument: String,
    pub symbol: String,
    /// Zero when the lookup failed
    pub price: Decimal,
}
