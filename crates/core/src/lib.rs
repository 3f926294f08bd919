//! Pacfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for tracking a recurring
//! investment plan: the transaction ledger, the instrument catalogue,
//! live price lookups and the portfolio valuation that turns them into
//! a report. It is storage-agnostic; the ledger and the price source are
//! traits that callers implement or pick from the provided adapters.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod instruments;
pub mod portfolio;
pub mod quotes;
pub mod transactions;
pub mod utils;

// Re-export common types from the portfolio module
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
