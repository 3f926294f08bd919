//! Pure valuation of a ledger snapshot.
//!
//! Nothing here performs I/O or fails: missing prices count as zero,
//! every division by a zero total yields zero, and sums and products
//! saturate at the bounds of `Decimal` instead of overflowing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::goals::goal_progress;
use crate::portfolio::valuation::valuation_model::{
    AllocationBasis, AllocationSlice, BucketGranularity, SeriesPoint, ValuationOptions,
    ValuationReport,
};
use crate::quotes::PriceMap;
use crate::transactions::Transaction;
use crate::utils::time_utils::{month_start, year_start};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Maps a transaction date to the key of the time bucket it belongs to.
///
/// The key is itself a date (the bucket's first day) so buckets sort
/// chronologically.
pub trait Bucketing {
    fn bucket(&self, date: NaiveDate) -> NaiveDate;

    /// Display label of a bucket key.
    fn label(&self, bucket: NaiveDate) -> String {
        bucket.format("%Y-%m-%d").to_string()
    }
}

impl Bucketing for BucketGranularity {
    fn bucket(&self, date: NaiveDate) -> NaiveDate {
        match self {
            BucketGranularity::Day => date,
            BucketGranularity::Month => month_start(date),
            BucketGranularity::Year => year_start(date),
        }
    }

    fn label(&self, bucket: NaiveDate) -> String {
        let format = match self {
            BucketGranularity::Day => "%Y-%m-%d",
            BucketGranularity::Month => "%Y-%m",
            BucketGranularity::Year => "%Y",
        };
        bucket.format(format).to_string()
    }
}

impl<F> Bucketing for F
where
    F: Fn(NaiveDate) -> NaiveDate,
{
    fn bucket(&self, date: NaiveDate) -> NaiveDate {
        self(date)
    }
}

/// Per-bucket sums, ascending by bucket, from which running totals are
/// produced on demand. Each call to [`CumulativeSeries::iter`] starts over
/// from zero.
#[derive(Debug, Clone, Default)]
pub struct CumulativeSeries {
    buckets: Vec<BucketTotals>,
}

#[derive(Debug, Clone)]
struct BucketTotals {
    bucket: NaiveDate,
    label: String,
    invested: Decimal,
    current_value: Decimal,
}

impl CumulativeSeries {
    /// Groups `(date, invested, current value)` rows into buckets.
    pub fn from_rows<B, I>(rows: I, bucketing: &B) -> Self
    where
        B: Bucketing + ?Sized,
        I: IntoIterator<Item = (NaiveDate, Decimal, Decimal)>,
    {
        let mut grouped: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for (date, invested, current_value) in rows {
            let entry = grouped
                .entry(bucketing.bucket(date))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 = entry.0.saturating_add(invested);
            entry.1 = entry.1.saturating_add(current_value);
        }

        let buckets = grouped
            .into_iter()
            .map(|(bucket, (invested, current_value))| BucketTotals {
                bucket,
                label: bucketing.label(bucket),
                invested,
                current_value,
            })
            .collect();

        Self { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Running totals in ascending bucket order.
    pub fn iter(&self) -> impl Iterator<Item = SeriesPoint> + '_ {
        self.buckets.iter().scan(
            (Decimal::ZERO, Decimal::ZERO),
            |(invested, current_value), totals| {
                *invested = invested.saturating_add(totals.invested);
                *current_value = current_value.saturating_add(totals.current_value);
                Some(SeriesPoint {
                    bucket: totals.bucket,
                    label: totals.label.clone(),
                    invested: *invested,
                    current_value: *current_value,
                })
            },
        )
    }
}

/// Current value of one ledger row: quantity times the instrument's price,
/// zero when the price is missing.
pub fn row_current_value(transaction: &Transaction, prices: &PriceMap) -> Decimal {
    let price = prices
        .get(&transaction.instrument)
        .copied()
        .unwrap_or(Decimal::ZERO);
    transaction.quantity.saturating_mul(price)
}

fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / total * 100`, or zero when `total` is zero. A quotient outside
/// the `Decimal` range saturates to `Decimal::MAX` (or `MIN` when the signs
/// differ).
fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(total) {
        Some(ratio) => ratio.saturating_mul(HUNDRED),
        None if part.is_sign_negative() != total.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

fn allocation(
    transactions: &[Transaction],
    current_values: &[Decimal],
    basis: AllocationBasis,
) -> Vec<AllocationSlice> {
    let mut grouped: BTreeMap<&str, Decimal> = BTreeMap::new();
    for (transaction, current_value) in transactions.iter().zip(current_values) {
        let amount = match basis {
            AllocationBasis::CurrentValue => *current_value,
            AllocationBasis::Invested => transaction.invested_amount,
        };
        let slot = grouped
            .entry(transaction.instrument.as_str())
            .or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(amount);
    }

    let total = saturating_sum(grouped.values().copied());
    grouped
        .into_iter()
        .map(|(instrument, value)| AllocationSlice {
            instrument: instrument.to_string(),
            value,
            percentage: percentage_of(value, total),
        })
        .collect()
}

/// Computes the report with an explicit allocation basis and any bucketing
/// strategy.
pub fn compute_report_with<B>(
    transactions: &[Transaction],
    prices: &PriceMap,
    targets: &[Decimal],
    basis: AllocationBasis,
    bucketing: &B,
) -> ValuationReport
where
    B: Bucketing + ?Sized,
{
    let current_values: Vec<Decimal> = transactions
        .iter()
        .map(|t| row_current_value(t, prices))
        .collect();

    let total_invested = saturating_sum(transactions.iter().map(|t| t.invested_amount));
    let total_current_value = saturating_sum(current_values.iter().copied());
    let profit = total_current_value.saturating_sub(total_invested);

    let series = CumulativeSeries::from_rows(
        transactions
            .iter()
            .zip(&current_values)
            .map(|(t, value)| (t.date, t.invested_amount, *value)),
        bucketing,
    );

    ValuationReport {
        total_invested,
        total_current_value,
        profit,
        profit_pct: percentage_of(profit, total_invested),
        allocation_basis: basis,
        allocation: allocation(transactions, &current_values, basis),
        cumulative_series: series.iter().collect(),
        progress: goal_progress(total_current_value, targets),
    }
}

/// Computes the valuation report for a ledger snapshot and a price map.
///
/// # Arguments
///
/// * `transactions` - Every ledger row; may be empty.
/// * `prices` - Current price per instrument id; missing ids are priced at zero.
/// * `targets` - Capital milestones, in display order.
/// * `options` - Allocation basis and series granularity.
pub fn compute_report(
    transactions: &[Transaction],
    prices: &PriceMap,
    targets: &[Decimal],
    options: &ValuationOptions,
) -> ValuationReport {
    compute_report_with(
        transactions,
        prices,
        targets,
        options.basis,
        &options.granularity,
    )
}
