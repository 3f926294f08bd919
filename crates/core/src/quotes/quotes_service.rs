use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::constants::DEFAULT_PRICE_CACHE_TTL_SECS;
use crate::instruments::{Instrument, InstrumentCatalog};
use crate::quotes::price_source::collapse_lookups;
use crate::quotes::quotes_model::{InstrumentPrice, PriceLookup};
use crate::quotes::quotes_traits::{PriceSourceTrait, QuoteServiceTrait};

struct CachedPrice {
    price: Decimal,
    fetched_at: Instant,
}

/// Prices the instrument catalogue, caching successful lookups for a
/// short time. Failed lookups are never cached and are retried on the
/// next call.
pub struct QuoteService {
    source: Arc<dyn PriceSourceTrait>,
    catalog: InstrumentCatalog,
    ttl: Duration,
    cache: DashMap<String, CachedPrice>,
}

impl QuoteService {
    pub fn new(source: Arc<dyn PriceSourceTrait>, catalog: InstrumentCatalog) -> Self {
        Self::with_ttl(
            source,
            catalog,
            Duration::from_secs(DEFAULT_PRICE_CACHE_TTL_SECS),
        )
    }

    /// A zero TTL disables caching.
    pub fn with_ttl(
        source: Arc<dyn PriceSourceTrait>,
        catalog: InstrumentCatalog,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            catalog,
            ttl,
            cache: DashMap::new(),
        }
    }

    fn cached(&self, instrument_id: &str) -> Option<Decimal> {
        let entry = self.cache.get(instrument_id)?;
        (entry.fetched_at.elapsed() < self.ttl).then_some(entry.price)
    }

    /// Drops every cached price.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    async fn get_instrument_prices(&self) -> Vec<InstrumentPrice> {
        let mut lookups: Vec<PriceLookup> = Vec::with_capacity(self.catalog.len());
        let mut misses: Vec<Instrument> = Vec::new();

        for instrument in self.catalog.instruments() {
            match self.cached(&instrument.id) {
                Some(price) => lookups.push((instrument.id.clone(), Ok(price))),
                None => misses.push(instrument.clone()),
            }
        }

        if !misses.is_empty() {
            debug!("Fetching live prices for {} instrument(s)", misses.len());
            let fetched = self.source.lookup_many(&misses).await;
            for (id, result) in &fetched {
                if let Ok(price) = result {
                    self.cache.insert(
                        id.clone(),
                        CachedPrice {
                            price: *price,
                            fetched_at: Instant::now(),
                        },
                    );
                }
            }
            lookups.extend(fetched);
        }

        let prices = collapse_lookups(lookups);
        self.catalog
            .instruments()
            .iter()
            .map(|instrument| InstrumentPrice {
                instrument: instrument.id.clone(),
                symbol: instrument.symbol.clone(),
                price: prices.get(&instrument.id).copied().unwrap_or(Decimal::ZERO),
            })
            .collect()
    }
}
