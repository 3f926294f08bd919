use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::errors::{Result, ValidationError};
use crate::instruments::InstrumentCatalog;
use crate::transactions::transactions_model::{NewTransaction, Transaction};
use crate::transactions::transactions_traits::{LedgerStoreTrait, TransactionServiceTrait};
use crate::utils::time_utils::valuation_date_today;

/// Validates user-submitted transactions and forwards them to the ledger.
pub struct TransactionService {
    ledger: Arc<dyn LedgerStoreTrait>,
    catalog: InstrumentCatalog,
}

impl TransactionService {
    pub fn new(ledger: Arc<dyn LedgerStoreTrait>, catalog: InstrumentCatalog) -> Self {
        Self { ledger, catalog }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut transactions = self.ledger.read_all()?;
        // Stable sort keeps insertion order among rows of the same day
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        debug!("Loaded {} ledger rows", transactions.len());
        Ok(transactions)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;

        let instrument = new_transaction.instrument.trim();
        if !self.catalog.contains(instrument) {
            return Err(ValidationError::UnknownInstrument(instrument.to_string()).into());
        }

        let transaction = new_transaction.into_transaction(valuation_date_today());
        let stored = self.ledger.append(transaction).await?;
        info!(
            "Recorded {} purchase of {} units for {} on {}",
            stored.instrument, stored.quantity, stored.invested_amount, stored.date
        );
        Ok(stored)
    }
}
