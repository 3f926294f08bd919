//! Core error types for the Pacfolio application.
//!
//! The valuation itself never fails; these errors belong to the
//! collaborators around it (ledger storage, input validation and
//! configuration). Price lookup failures stay per instrument as
//! [`crate::quotes::LookupError`].

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Storage-agnostic error type for ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The backing file could not be opened, created or written.
    #[error("Ledger I/O failed: {0}")]
    Io(String),

    /// A row could not be encoded or the file structure is unusable.
    #[error("Malformed ledger: {0}")]
    Malformed(String),

    /// The write lock was poisoned by a panicking writer.
    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must not be negative (got {value})")]
    NegativeAmount { field: String, value: String },

    #[error("Field '{field}' exceeds the maximum of {max} (got {value})")]
    AmountTooLarge {
        field: String,
        value: String,
        max: String,
    },

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            LedgerError::Io(err.to_string())
        } else {
            LedgerError::Malformed(err.to_string())
        }
    }
}
