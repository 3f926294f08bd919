//! Fixed-price provider for offline use.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "MANUAL";

/// Answers from a configured symbol → price table. Unknown symbols are
/// reported as not found.
#[derive(Debug, Clone, Default)]
pub struct ManualProvider {
    prices: HashMap<String, Decimal>,
}

impl ManualProvider {
    pub fn new(prices: HashMap<String, Decimal>) -> Self {
        Self { prices }
    }

    /// Parses `SYMBOL=price` pairs separated by commas.
    pub fn parse(spec: &str) -> Result<Self, MarketDataError> {
        let mut prices = HashMap::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (symbol, price) =
                entry
                    .split_once('=')
                    .ok_or_else(|| MarketDataError::ValidationFailed {
                        message: format!("expected SYMBOL=price, got '{}'", entry),
                    })?;
            let price = Decimal::from_str(price.trim()).map_err(|e| {
                MarketDataError::ValidationFailed {
                    message: format!("invalid price for {}: {}", symbol.trim(), e),
                }
            })?;
            prices.insert(symbol.trim().to_string(), price);
        }
        Ok(Self { prices })
    }

    pub fn with_price(mut self, symbol: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(symbol.into(), price);
        self
    }
}

#[async_trait]
impl MarketDataProvider for ManualProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.prices
            .get(symbol)
            .map(|price| Quote::new(symbol, Utc::now(), *price, PROVIDER_ID))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}
