//! Price lookup error types.

use thiserror::Error;

use pacfolio_market_data::errors::MarketDataError;

/// Why a single instrument has no usable live price.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Symbol not found: {0}")]
    NotFound(String),

    #[error("Price unavailable for {symbol}: {reason}")]
    Unavailable { symbol: String, reason: String },

    #[error("Invalid price {price} for {symbol}")]
    InvalidPrice { symbol: String, price: String },
}

impl LookupError {
    /// Maps a provider failure for `symbol` into a lookup failure.
    pub fn from_market_data(symbol: &str, err: MarketDataError) -> Self {
        match err {
            MarketDataError::SymbolNotFound(_) => LookupError::NotFound(symbol.to_string()),
            other => LookupError::Unavailable {
                symbol: symbol.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
