//! File-backed ledger in the plan's CSV layout.
//!
//! ```text
//! Data,ETF,Importo,Prezzo,Quantità
//! 2024-01-05,SWDA.L,200,95.12,2.1026
//! ```

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use crate::constants::{LEDGER_HEADERS, MAX_LEDGER_VALUE};
use crate::errors::{LedgerError, Result};
use crate::transactions::transactions_model::Transaction;
use crate::transactions::transactions_traits::LedgerStoreTrait;
use crate::utils::time_utils::parse_ledger_date;

const COL_DATE: usize = 0;
const COL_INSTRUMENT: usize = 1;
const COL_INVESTED: usize = 2;
const COL_PRICE: usize = 3;
const COL_QUANTITY: usize = 4;

/// Append-only CSV ledger.
///
/// Reads are lenient: a numeric cell that does not parse counts as zero and
/// a row with an unreadable date is skipped. Both are logged. Writes are
/// serialized through an internal lock and only writes create the file.
pub struct CsvLedgerStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLedgerStore {
    /// Opens the ledger at `path`, creating it with a header row if it is
    /// missing or empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_exists(&self) -> std::result::Result<(), LedgerError> {
        let is_empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if !is_empty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(LEDGER_HEADERS)?;
        writer.flush()?;
        debug!("Created ledger {}", self.path.display());
        Ok(())
    }

    /// Maps each expected column to its position in the file's header row.
    fn column_positions(headers: &StringRecord) -> std::result::Result<[usize; 5], LedgerError> {
        let mut positions = [0usize; 5];
        for (slot, expected) in LEDGER_HEADERS.iter().enumerate() {
            positions[slot] = headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == *expected)
                .ok_or_else(|| {
                    LedgerError::Malformed(format!("missing column '{}' in header", expected))
                })?;
        }
        Ok(positions)
    }

    fn parse_row(
        record: &StringRecord,
        columns: &[usize; 5],
        line: u64,
    ) -> Option<Transaction> {
        let cell = |slot: usize| record.get(columns[slot]).unwrap_or("").trim();

        let date = match parse_ledger_date(cell(COL_DATE)) {
            Ok(date) => date,
            Err(e) => {
                warn!("Skipping ledger line {}: unreadable date ({})", line, e);
                return None;
            }
        };

        Some(Transaction {
            date,
            instrument: cell(COL_INSTRUMENT).to_string(),
            invested_amount: lenient_decimal(cell(COL_INVESTED), LEDGER_HEADERS[COL_INVESTED], line),
            purchase_price: lenient_decimal(cell(COL_PRICE), LEDGER_HEADERS[COL_PRICE], line),
            quantity: lenient_decimal(cell(COL_QUANTITY), LEDGER_HEADERS[COL_QUANTITY], line),
        })
    }

    /// Writes a newline first if a hand-edited file lost its trailing one.
    fn terminate_last_line(file: &mut File) -> std::io::Result<()> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(());
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Parses a numeric cell, falling back to zero. Values whose magnitude
/// exceeds [`MAX_LEDGER_VALUE`] also read as zero.
fn lenient_decimal(raw: &str, column: &str, line: u64) -> Decimal {
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    let value = match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "Ledger line {}: '{}' in column {} is not a number, using 0",
                line, raw, column
            );
            return Decimal::ZERO;
        }
    };
    if value.abs() > MAX_LEDGER_VALUE {
        warn!(
            "Ledger line {}: {} in column {} exceeds {}, using 0",
            line, raw, column, MAX_LEDGER_VALUE
        );
        return Decimal::ZERO;
    }
    value
}

#[async_trait]
impl LedgerStoreTrait for CsvLedgerStore {
    fn read_all(&self) -> Result<Vec<Transaction>> {
        // Reads never write; a missing or empty file has no rows yet.
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 => return Ok(Vec::new()),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::from(e).into()),
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(LedgerError::from)?;

        let columns = Self::column_positions(reader.headers().map_err(LedgerError::from)?)?;

        let mut transactions = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(LedgerError::from)?;
            if record.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            // +2: one for the header, one for 1-based line numbers
            if let Some(tx) = Self::parse_row(&record, &columns, idx as u64 + 2) {
                transactions.push(tx);
            }
        }
        Ok(transactions)
    }

    async fn append(&self, transaction: Transaction) -> Result<Transaction> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LedgerError::LockPoisoned)?;
        self.ensure_exists()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(LedgerError::from)?;
        Self::terminate_last_line(&mut file).map_err(LedgerError::from)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record([
                transaction.date.format("%Y-%m-%d").to_string(),
                transaction.instrument.clone(),
                transaction.invested_amount.normalize().to_string(),
                transaction.purchase_price.normalize().to_string(),
                transaction.quantity.normalize().to_string(),
            ])
            .map_err(LedgerError::from)?;
        writer.flush().map_err(LedgerError::from)?;

        Ok(transaction)
    }
}
