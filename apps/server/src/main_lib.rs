use std::sync::Arc;

use anyhow::Context;
use pacfolio_core::{
    goals::Goal,
    quotes::{PriceSourceTrait, ProviderPriceSource, QuoteService, QuoteServiceTrait},
    transactions::{CsvLedgerStore, LedgerStoreTrait, TransactionService, TransactionServiceTrait},
    ValuationService, ValuationServiceTrait,
};
use pacfolio_market_data::{ManualProvider, MarketDataProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, PriceProviderKind};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub quote_service: Arc<dyn QuoteServiceTrait + Send + Sync>,
    pub valuation_service: Arc<dyn ValuationServiceTrait + Send + Sync>,
    pub goals: Vec<Goal>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn MarketDataProvider>> {
    let provider: Arc<dyn MarketDataProvider> = match config.price_provider {
        PriceProviderKind::Yahoo => Arc::new(
            YahooProvider::new()?.with_request_timeout(config.price_request_timeout),
        ),
        PriceProviderKind::Manual => Arc::new(
            ManualProvider::parse(&config.manual_prices).context("Invalid PAC_MANUAL_PRICES")?,
        ),
    };
    Ok(provider)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let ledger: Arc<dyn LedgerStoreTrait> = Arc::new(
        CsvLedgerStore::new(config.ledger_path.clone())
            .with_context(|| format!("Cannot open ledger {}", config.ledger_path.display()))?,
    );
    tracing::info!("Ledger path in use: {}", config.ledger_path.display());

    let provider = build_provider(config)?;
    tracing::info!(
        "Pricing {} instrument(s) with the {} provider",
        config.instruments.len(),
        provider.id()
    );
    let price_source: Arc<dyn PriceSourceTrait> = Arc::new(ProviderPriceSource::new(provider));
    let quote_service: Arc<dyn QuoteServiceTrait + Send + Sync> = Arc::new(QuoteService::with_ttl(
        price_source,
        config.instruments.clone(),
        config.price_cache_ttl,
    ));

    let transaction_service = Arc::new(TransactionService::new(
        ledger.clone(),
        config.instruments.clone(),
    ));
    let valuation_service = Arc::new(ValuationService::new(
        ledger,
        quote_service.clone(),
        config.targets.clone(),
        config.valuation,
    ));

    Ok(Arc::new(AppState {
        transaction_service,
        quote_service,
        valuation_service,
        goals: config.targets.iter().copied().map(Goal::new).collect(),
    }))
}
