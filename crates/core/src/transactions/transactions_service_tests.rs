#[cfg(test)]
mod tests {
    use crate::errors::{Error, LedgerError, Result, ValidationError};
    use crate::instruments::InstrumentCatalog;
    use crate::transactions::{
        InMemoryLedgerStore, LedgerStoreTrait, NewTransaction, Transaction, TransactionService,
        TransactionServiceTrait,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    // --- Failing ledger ---
    struct BrokenLedger;

    #[async_trait]
    impl LedgerStoreTrait for BrokenLedger {
        fn read_all(&self) -> Result<Vec<Transaction>> {
            Err(LedgerError::Io("disk unplugged".to_string()).into())
        }

        async fn append(&self, _transaction: Transaction) -> Result<Transaction> {
            Err(LedgerError::Io("disk unplugged".to_string()).into())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn purchase(instrument: &str) -> NewTransaction {
        NewTransaction {
            date: Some(date(2024, 4, 2)),
            instrument: instrument.to_string(),
            invested_amount: dec!(250),
            purchase_price: dec!(96.4),
            quantity: dec!(2.5934),
        }
    }

    fn service_with(ledger: Arc<dyn LedgerStoreTrait>) -> TransactionService {
        TransactionService::new(ledger, InstrumentCatalog::default())
    }

    #[tokio::test]
    async fn test_create_transaction_appends_to_ledger() {
        let ledger = Arc::new(InMemoryLedgerStore::new());
        let service = service_with(ledger.clone());

        let stored = service.create_transaction(purchase("SWDA.L")).await.unwrap();

        assert_eq!(stored.instrument, "SWDA.L");
        assert_eq!(stored.date, date(2024, 4, 2));
        assert_eq!(ledger.read_all().unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_create_transaction_rejects_unknown_instrument() {
        let ledger = Arc::new(InMemoryLedgerStore::new());
        let service = service_with(ledger.clone());

        let err = service.create_transaction(purchase("VWCE")).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownInstrument(ref id)) if id == "VWCE"
        ));
        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_transaction_rejects_negative_amount_before_writing() {
        let ledger = Arc::new(InMemoryLedgerStore::new());
        let service = service_with(ledger.clone());

        let mut tx = purchase("SPY5L");
        tx.invested_amount = dec!(-10);
        let err = service.create_transaction(tx).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::NegativeAmount { .. })
        ));
        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_transaction_defaults_to_today() {
        let ledger = Arc::new(InMemoryLedgerStore::new());
        let service = service_with(ledger);

        let mut tx = purchase("NSQE.DE");
        tx.date = None;
        let stored = service.create_transaction(tx).await.unwrap();

        assert_eq!(stored.date, crate::utils::time_utils::valuation_date_today());
    }

    #[test]
    fn test_get_transactions_newest_first_stable_within_day() {
        let ledger = Arc::new(InMemoryLedgerStore::with_transactions(vec![
            Transaction::new(date(2024, 1, 1), "A", dec!(1), dec!(1), dec!(1)),
            Transaction::new(date(2024, 3, 1), "B", dec!(2), dec!(1), dec!(2)),
            Transaction::new(date(2024, 3, 1), "C", dec!(3), dec!(1), dec!(3)),
        ]));
        let service = service_with(ledger);

        let instruments: Vec<String> = service
            .get_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.instrument)
            .collect();
        assert_eq!(instruments, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_ledger_failures_surface_to_caller() {
        let service = service_with(Arc::new(BrokenLedger));

        assert!(matches!(service.get_transactions(), Err(Error::Ledger(_))));
        assert!(matches!(
            service.create_transaction(purchase("SWDA.L")).await,
            Err(Error::Ledger(_))
        ));
    }
}
