use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::errors::{Result, ValidationError};

/// Default timezone for transaction dates.
/// The plan is run from an Italian brokerage account, so "today" is the
/// calendar day in Rome.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::Europe::Rome;

/// Converts a UTC instant to a valuation date in the given timezone.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Convenience function that uses the default valuation timezone.
pub fn valuation_date_today() -> NaiveDate {
    valuation_date_from_utc(Utc::now(), DEFAULT_VALUATION_TZ)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the year containing `date`.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// Parses a ledger date.
///
/// Accepts a plain `YYYY-MM-DD` date or a `YYYY-MM-DD HH:MM:SS` timestamp
/// (older ledgers were written by a dataframe export and carry a time part).
pub fn parse_ledger_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField("Data".to_string()).into());
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .map_err(|_| date_err.into()),
    }
}
