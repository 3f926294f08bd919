//! Instruments module - the catalogue of tradable funds.

mod instruments_model;

pub use instruments_model::{Instrument, InstrumentCatalog};
