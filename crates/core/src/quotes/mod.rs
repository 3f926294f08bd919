//! Live price lookups.
//!
//! The valuation only ever sees a [`PriceMap`]. Getting there is the job of
//! this module:
//!
//! ```text
//! QuoteService → PriceSourceTrait → ProviderPriceSource → market-data provider
//!      ↓
//! collapse_lookups (failure → 0) → PriceMap
//! ```
//!
//! Each instrument is looked up independently, so one failing symbol never
//! affects the others. Failures stay explicit as [`LookupError`] until
//! [`collapse_lookups`] turns them into a zero price.

mod price_source;
mod quotes_errors;
mod quotes_model;
mod quotes_service;
mod quotes_traits;

pub use price_source::{collapse_lookups, ProviderPriceSource};
pub use quotes_errors::LookupError;
pub use quotes_model::{InstrumentPrice, PriceLookup, PriceMap};
pub use quotes_service::QuoteService;
pub use quotes_traits::{PriceSourceTrait, QuoteServiceTrait};
