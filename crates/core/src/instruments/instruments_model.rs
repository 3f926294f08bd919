//! Instrument catalogue models.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INSTRUMENTS;
use crate::errors::{Error, Result};

/// A tradable fund as recorded in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Identifier used in the ledger's instrument column
    pub id: String,
    /// Symbol understood by the quote provider (e.g. `SWDA.L`, `SPY5L.MI`)
    pub symbol: String,
}

impl Instrument {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
        }
    }
}

/// Ordered set of instruments the plan buys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    /// Builds a catalogue, rejecting blank or duplicate ids.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self> {
        for (idx, instrument) in instruments.iter().enumerate() {
            if instrument.id.trim().is_empty() || instrument.symbol.trim().is_empty() {
                return Err(Error::InvalidConfigValue(format!(
                    "instrument #{} needs both an id and a symbol",
                    idx + 1
                )));
            }
            if instruments[..idx].iter().any(|i| i.id == instrument.id) {
                return Err(Error::InvalidConfigValue(format!(
                    "duplicate instrument id '{}'",
                    instrument.id
                )));
            }
        }
        Ok(Self { instruments })
    }

    /// Parses `ID=SYMBOL` pairs separated by commas. An entry without `=`
    /// uses the id as its symbol.
    pub fn parse(spec: &str) -> Result<Self> {
        let instruments = spec
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((id, symbol)) => Instrument::new(id.trim(), symbol.trim()),
                None => Instrument::new(entry, entry),
            })
            .collect();
        Self::new(instruments)
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Default for InstrumentCatalog {
    fn default() -> Self {
        Self {
            instruments: DEFAULT_INSTRUMENTS
                .iter()
                .map(|(id, symbol)| Instrument::new(*id, *symbol))
                .collect(),
        }
    }
}
