//! Yahoo Finance market data provider.
//!
//! Latest prices come from the intraday chart of the current session. When
//! that yields nothing usable (an error, or a zero price outside trading
//! hours) the provider falls back to the last close of the recent daily
//! history.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Per-request budget before a lookup counts as timed out.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    request_timeout: Duration,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self {
            connector,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Overrides the per-request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(
        symbol: &str,
        yahoo_quote: yahoo::Quote,
    ) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        // Close price is required
        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote {
            symbol: symbol.to_string(),
            timestamp,
            open: Decimal::from_f64_retain(yahoo_quote.open),
            high: Decimal::from_f64_retain(yahoo_quote.high),
            low: Decimal::from_f64_retain(yahoo_quote.low),
            close,
            volume: Decimal::from_u64(yahoo_quote.volume),
            source: PROVIDER_ID.to_string(),
        })
    }

    fn map_yahoo_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        }
    }

    /// Fetches a chart for `symbol` and returns its most recent quote.
    async fn fetch_last_quote(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Quote, MarketDataError> {
        let response = tokio::time::timeout(
            self.request_timeout,
            self.connector.get_quote_range(symbol, interval, range),
        )
        .await
        .map_err(|_| MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        })?
        .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let yahoo_quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::NoDataForRange
        })?;

        Self::yahoo_quote_to_quote(symbol, yahoo_quote)
    }

    /// Latest traded price of the current session.
    async fn fetch_latest_quote_primary(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.fetch_last_quote(symbol, "1m", "1d").await
    }

    /// Last close of the recent daily history.
    async fn fetch_latest_quote_backup(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.fetch_last_quote(symbol, "1d", "5d").await
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching latest quote for {} from Yahoo", symbol);

        match self.fetch_latest_quote_primary(symbol).await {
            Ok(quote) if quote.has_price() => return Ok(quote),
            Ok(_) => debug!("Primary quote for {} has no price, trying backup", symbol),
            Err(e) => debug!(
                "Primary quote fetch failed for {}: {}, trying backup",
                symbol, e
            ),
        }

        self.fetch_latest_quote_backup(symbol).await
    }
}
