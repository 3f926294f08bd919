//! Adapter from a market-data provider to a [`PriceSourceTrait`].

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use pacfolio_market_data::MarketDataProvider;

use crate::constants::PRICE_DECIMAL_PRECISION;
use crate::instruments::Instrument;
use crate::quotes::quotes_errors::LookupError;
use crate::quotes::quotes_model::{PriceLookup, PriceMap};
use crate::quotes::quotes_traits::PriceSourceTrait;

/// Prices instruments through a market-data provider using each
/// instrument's quote symbol.
pub struct ProviderPriceSource {
    provider: Arc<dyn MarketDataProvider>,
}

impl ProviderPriceSource {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PriceSourceTrait for ProviderPriceSource {
    async fn lookup(&self, instrument: &Instrument) -> Result<Decimal, LookupError> {
        let quote = self
            .provider
            .get_latest_quote(&instrument.symbol)
            .await
            .map_err(|e| LookupError::from_market_data(&instrument.symbol, e))?;

        if !quote.has_price() {
            return Err(LookupError::InvalidPrice {
                symbol: instrument.symbol.clone(),
                price: quote.close.to_string(),
            });
        }

        Ok(quote.close.round_dp(PRICE_DECIMAL_PRECISION))
    }
}

/// Folds per-instrument lookups into a [`PriceMap`]. A failed lookup is
/// logged and priced at zero.
pub fn collapse_lookups(lookups: Vec<PriceLookup>) -> PriceMap {
    lookups
        .into_iter()
        .map(|(instrument, result)| {
            let price = result.unwrap_or_else(|e| {
                warn!("No live price for {}: {}. Using 0.", instrument, e);
                Decimal::ZERO
            });
            (instrument, price)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pacfolio_market_data::errors::MarketDataError;
    use pacfolio_market_data::models::Quote;
    use rust_decimal_macros::dec;

    struct FixedProvider {
        result: std::result::Result<Decimal, MarketDataError>,
    }

    #[async_trait]
    impl MarketDataProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        async fn get_latest_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
            self.result
                .clone()
                .map(|close| Quote::new(symbol, Utc::now(), close, "FIXED"))
        }
    }

    fn source(result: std::result::Result<Decimal, MarketDataError>) -> ProviderPriceSource {
        ProviderPriceSource::new(Arc::new(FixedProvider { result }))
    }

    #[tokio::test]
    async fn test_lookup_rounds_to_four_places() {
        let price = source(Ok(dec!(101.234567)))
            .lookup(&Instrument::new("SWDA.L", "SWDA.L"))
            .await
            .unwrap();
        assert_eq!(price, dec!(101.2346));
    }

    #[tokio::test]
    async fn test_lookup_rejects_negative_price() {
        let err = source(Ok(dec!(-1)))
            .lookup(&Instrument::new("SWDA.L", "SWDA.L"))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidPrice { .. }));
    }

    #[tokio::test]
    async fn test_lookup_treats_zero_as_unavailable() {
        let err = source(Ok(Decimal::ZERO))
            .lookup(&Instrument::new("NSQE.DE", "NSQE.DE"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LookupError::InvalidPrice {
                symbol: "NSQE.DE".to_string(),
                price: "0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_surfaces_provider_failure() {
        let err = source(Err(MarketDataError::SymbolNotFound("X".to_string())))
            .lookup(&Instrument::new("SPY5L", "SPY5L.MI"))
            .await
            .unwrap_err();
        assert_eq!(err, LookupError::NotFound("SPY5L.MI".to_string()));
    }

    #[test]
    fn test_collapse_prices_failures_at_zero() {
        let prices = collapse_lookups(vec![
            ("A".to_string(), Ok(dec!(10.5))),
            ("B".to_string(), Err(LookupError::NotFound("B".to_string()))),
        ]);
        assert_eq!(prices["A"], dec!(10.5));
        assert_eq!(prices["B"], Decimal::ZERO);
    }
}
