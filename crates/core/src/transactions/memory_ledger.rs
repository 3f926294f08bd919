use async_trait::async_trait;
use std::sync::RwLock;

use crate::errors::{LedgerError, Result};
use crate::transactions::transactions_model::Transaction;
use crate::transactions::transactions_traits::LedgerStoreTrait;

/// Ledger kept in process memory. Used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    rows: RwLock<Vec<Transaction>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(rows: Vec<Transaction>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl LedgerStoreTrait for InMemoryLedgerStore {
    fn read_all(&self) -> Result<Vec<Transaction>> {
        let rows = self.rows.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(rows.clone())
    }

    async fn append(&self, transaction: Transaction) -> Result<Transaction> {
        let mut rows = self.rows.write().map_err(|_| LedgerError::LockPoisoned)?;
        rows.push(transaction.clone());
        Ok(transaction)
    }
}
