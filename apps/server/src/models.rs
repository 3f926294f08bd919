use chrono::NaiveDate;
use pacfolio_core::{
    goals as core_goals, instruments as core_instruments, quotes as core_quotes,
    transactions as core_transactions, AllocationSlice as CoreAllocationSlice,
    SeriesPoint as CoreSeriesPoint, ValuationReport as CoreValuationReport,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub instrument: String,
    pub invested_amount: Decimal,
    pub purchase_price: Decimal,
    pub quantity: Decimal,
}

impl From<core_transactions::Transaction> for Transaction {
    fn from(t: core_transactions::Transaction) -> Self {
        Self {
            date: t.date,
            instrument: t.instrument,
            invested_amount: t.invested_amount,
            purchase_price: t.purchase_price,
            quantity: t.quantity,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Defaults to today (Europe/Rome) when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub instrument: String,
    pub invested_amount: Decimal,
    pub purchase_price: Decimal,
    pub quantity: Decimal,
}

impl From<NewTransaction> for core_transactions::NewTransaction {
    fn from(t: NewTransaction) -> Self {
        Self {
            date: t.date,
            instrument: t.instrument,
            invested_amount: t.invested_amount,
            purchase_price: t.purchase_price,
            quantity: t.quantity,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub symbol: String,
}

impl From<&core_instruments::Instrument> for Instrument {
    fn from(i: &core_instruments::Instrument) -> Self {
        Self {
            id: i.id.clone(),
            symbol: i.symbol.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPrice {
    pub instrument: String,
    pub symbol: String,
    pub price: Decimal,
}

impl From<core_quotes::InstrumentPrice> for InstrumentPrice {
    fn from(p: core_quotes::InstrumentPrice) -> Self {
        Self {
            instrument: p.instrument,
            symbol: p.symbol,
            price: p.price,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: String,
    pub target_amount: Decimal,
}

impl From<core_goals::Goal> for Goal {
    fn from(g: core_goals::Goal) -> Self {
        Self {
            title: g.title,
            target_amount: g.target_amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub instrument: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

impl From<CoreAllocationSlice> for AllocationSlice {
    fn from(s: CoreAllocationSlice) -> Self {
        Self {
            instrument: s.instrument,
            value: s.value,
            percentage: s.percentage,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub bucket: NaiveDate,
    pub label: String,
    pub invested: Decimal,
    pub current_value: Decimal,
}

impl From<CoreSeriesPoint> for SeriesPoint {
    fn from(p: CoreSeriesPoint) -> Self {
        Self {
            bucket: p.bucket,
            label: p.label,
            invested: p.invested,
            current_value: p.current_value,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TargetProgress {
    pub target: Decimal,
    pub fraction: Decimal,
}

impl From<core_goals::TargetProgress> for TargetProgress {
    fn from(p: core_goals::TargetProgress) -> Self {
        Self {
            target: p.target,
            fraction: p.fraction,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub total_invested: Decimal,
    pub total_current_value: Decimal,
    pub profit: Decimal,
    pub profit_pct: Decimal,
    /// `current_value` or `invested`
    pub allocation_basis: String,
    pub allocation: Vec<AllocationSlice>,
    pub cumulative_series: Vec<SeriesPoint>,
    pub progress: Vec<TargetProgress>,
}

impl From<CoreValuationReport> for ValuationReport {
    fn from(r: CoreValuationReport) -> Self {
        Self {
            total_invested: r.total_invested,
            total_current_value: r.total_current_value,
            profit: r.profit,
            profit_pct: r.profit_pct,
            allocation_basis: r.allocation_basis.to_string(),
            allocation: r.allocation.into_iter().map(Into::into).collect(),
            cumulative_series: r.cumulative_series.into_iter().map(Into::into).collect(),
            progress: r.progress.into_iter().map(Into::into).collect(),
        }
    }
}
