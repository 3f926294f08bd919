//! Pacfolio Market Data Crate
//!
//! Fetches the latest traded price for a quote symbol. Callers depend on
//! the [`MarketDataProvider`] trait; two implementations ship with the
//! crate:
//!
//! - [`YahooProvider`] - live prices from Yahoo Finance
//! - [`ManualProvider`] - a fixed symbol → price table for offline use
//!
//! # Core Types
//!
//! - [`Quote`] - Latest price with optional OHLCV detail
//! - [`MarketDataError`] - Why a quote could not be produced

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::manual::ManualProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
