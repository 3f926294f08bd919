//! Transactions module - the append-only investment ledger.
//!
//! The ledger is exposed through [`LedgerStoreTrait`] so the valuation
//! never touches storage directly. Rows are validated on write by
//! [`TransactionService`]; stores only persist what they are given.

mod csv_ledger;
mod memory_ledger;
mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_service_tests;

pub use csv_ledger::CsvLedgerStore;
pub use memory_ledger::InMemoryLedgerStore;
pub use transactions_model::{NewTransaction, Transaction};
pub use transactions_service::TransactionService;
pub use transactions_traits::{LedgerStoreTrait, TransactionServiceTrait};
