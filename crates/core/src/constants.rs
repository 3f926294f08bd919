use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Long-term capital milestones, in ascending order.
pub const DEFAULT_TARGETS: [Decimal; 3] = [dec!(100000), dec!(250000), dec!(500000)];

/// Largest amount, price or quantity a ledger row may carry.
pub const MAX_LEDGER_VALUE: Decimal = dec!(1000000000000);

/// Decimal precision for live prices
pub const PRICE_DECIMAL_PRECISION: u32 = 4;

/// Default file name of the CSV ledger
pub const DEFAULT_LEDGER_PATH: &str = "transazioni_pac.csv";

/// Header row of the CSV ledger: date, instrument, invested amount,
/// purchase price, quantity.
pub const LEDGER_HEADERS: [&str; 5] = ["Data", "ETF", "Importo", "Prezzo", "Quantità"];

/// Default instrument catalogue as `(instrument id, quote symbol)` pairs.
pub const DEFAULT_INSTRUMENTS: [(&str, &str); 3] = [
    ("SPY5L", "SPY5L.MI"),
    ("SWDA.L", "SWDA.L"),
    ("NSQE.DE", "NSQE.DE"),
];

/// Seconds a successful price lookup stays fresh
pub const DEFAULT_PRICE_CACHE_TTL_SECS: u64 = 5;
