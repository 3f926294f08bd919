use async_trait::async_trait;
use futures::future::join_all;
use rust_decimal::Decimal;

use crate::instruments::{Instrument, InstrumentCatalog};
use crate::quotes::quotes_errors::LookupError;
use crate::quotes::quotes_model::{InstrumentPrice, PriceLookup, PriceMap};

/// Source of a current price per instrument.
#[async_trait]
pub trait PriceSourceTrait: Send + Sync {
    /// Current price of one instrument.
    async fn lookup(&self, instrument: &Instrument) -> Result<Decimal, LookupError>;

    /// Looks up several instruments concurrently. Each result is
    /// independent of the others.
    async fn lookup_many(&self, instruments: &[Instrument]) -> Vec<PriceLookup> {
        let lookups = instruments
            .iter()
            .map(|instrument| async move { (instrument.id.clone(), self.lookup(instrument).await) });
        join_all(lookups).await
    }
}

/// Trait for quote service operations
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Instruments the service prices.
    fn catalog(&self) -> &InstrumentCatalog;

    /// Price per catalogue instrument, zero for failed lookups.
    async fn get_instrument_prices(&self) -> Vec<InstrumentPrice>;

    /// Same prices keyed by instrument id, ready for valuation.
    async fn get_latest_prices(&self) -> PriceMap {
        self.get_instrument_prices()
            .await
            .into_iter()
            .map(|p| (p.instrument, p.price))
            .collect()
    }
}
