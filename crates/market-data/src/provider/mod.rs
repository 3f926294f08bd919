//! Market data providers.

pub mod manual;
mod traits;
pub mod yahoo;

pub use traits::MarketDataProvider;
