use async_trait::async_trait;
use log::{debug, error};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;

use crate::portfolio::valuation::valuation_calculator::compute_report;
use crate::portfolio::valuation::valuation_model::{ValuationOptions, ValuationReport};
use crate::quotes::QuoteServiceTrait;
use crate::transactions::LedgerStoreTrait;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Options used when a request does not override them.
    fn default_options(&self) -> ValuationOptions;

    /// Capital milestones progress is measured against.
    fn targets(&self) -> &[Decimal];

    /// Builds a fresh report from the current ledger and live prices.
    ///
    /// Never fails: an unreadable ledger is valued as empty and missing
    /// prices count as zero.
    async fn get_report(&self, options: Option<ValuationOptions>) -> ValuationReport;
}

/// Gathers a ledger snapshot and a price map, then hands both to the
/// valuation calculator.
pub struct ValuationService {
    ledger: Arc<dyn LedgerStoreTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    targets: Vec<Decimal>,
    default_options: ValuationOptions,
}

impl ValuationService {
    pub fn new(
        ledger: Arc<dyn LedgerStoreTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        targets: Vec<Decimal>,
        default_options: ValuationOptions,
    ) -> Self {
        Self {
            ledger,
            quote_service,
            targets,
            default_options,
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    fn default_options(&self) -> ValuationOptions {
        self.default_options
    }

    fn targets(&self) -> &[Decimal] {
        &self.targets
    }

    async fn get_report(&self, options: Option<ValuationOptions>) -> ValuationReport {
        let started = Instant::now();
        let options = options.unwrap_or(self.default_options);

        let transactions = self.ledger.read_all().unwrap_or_else(|e| {
            error!("Failed to read ledger, valuing an empty portfolio: {}", e);
            Vec::new()
        });
        let prices = self.quote_service.get_latest_prices().await;

        let report = compute_report(&transactions, &prices, &self.targets, &options);
        debug!(
            "Valued {} ledger rows ({} basis, {} buckets) in {:?}",
            transactions.len(),
            options.basis,
            options.granularity,
            started.elapsed()
        );
        report
    }
}
