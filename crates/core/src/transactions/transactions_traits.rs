use async_trait::async_trait;

use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction};

/// Append-only storage for ledger rows.
///
/// Implementations must return a consistent snapshot from `read_all`;
/// rows are never updated or deleted.
#[async_trait]
pub trait LedgerStoreTrait: Send + Sync {
    /// Reads every row in insertion order.
    fn read_all(&self) -> Result<Vec<Transaction>>;

    /// Appends one row and returns it as stored.
    async fn append(&self, transaction: Transaction) -> Result<Transaction>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// All rows, newest first.
    fn get_transactions(&self) -> Result<Vec<Transaction>>;

    /// Validates and appends a new row.
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
}
