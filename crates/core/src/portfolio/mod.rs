//! Portfolio module - valuation of the plan's ledger against live prices.

pub mod valuation;

pub use valuation::*;
