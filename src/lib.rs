//! Spendbook turns a flat list of personal-finance transactions into the
//! reports a tracking app shows its user: side-by-side period summaries,
//! month-over-month trends, category distributions, and budget utilization.
//!
//! The crate is pure computation. Persistence and HTTP live outside; the
//! [store] module defines the read interfaces this crate consumes, and every
//! report function is a deterministic function of its inputs.

#![warn(missing_docs)]

use time::Date;

pub mod budget;
pub mod charts;
pub mod currency;
pub mod dates;
pub mod logging;
pub mod period;
pub mod registry;
pub mod reports;
pub mod store;
pub mod summary;
pub mod timezone;
pub mod transaction;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_utils;

pub use budget::{BudgetStatus, BudgetTier, compute_budget_status};
pub use period::{PERIOD_COUNT, Period, generate_periods};
pub use registry::{
    BUDGET_FILTER, CategoryRegistry, EXPENSE_FILTER, HOUSEHOLD_FILTER, SpendFilter, is_income,
};
pub use summary::{PeriodSummary, compute_opening_balance, compute_period_summary};
pub use transaction::{Transaction, TransactionRecord, ingest};
pub use trend::{
    PercentChange, Polarity, TrendDirection, compute_category_distribution, compute_daily_trend,
    compute_monthly_trend, percent_change,
};

/// The errors that may occur while assembling reports.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A monetary amount could not be parsed from the given text.
    ///
    /// A string that contains no digits at all is rejected rather than
    /// silently treated as zero, so that malformed records are counted as
    /// skipped instead of deflating totals.
    #[error("could not parse \"{0}\" as a monetary amount")]
    InvalidAmount(String),

    /// A transaction date could not be parsed as a calendar date.
    ///
    /// Callers should pass in the original date string. Records with
    /// unparsable dates are skipped per-record, never fatal to a report.
    #[error("could not parse \"{0}\" as a calendar date")]
    InvalidDate(String),

    /// An attempt was made to create a second budget for a category that
    /// already has one.
    ///
    /// The store layer must reject the write before it happens. Rollups
    /// still tolerate duplicates that already exist in stored data by
    /// summing their limits.
    #[error("the category \"{0}\" already has a budget")]
    DuplicateBudget(String),

    /// An error occurred while getting the local date from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The requested resource was not found in the external store.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The external store failed to produce a collection.
    ///
    /// This aborts the whole report; there is no partial-result policy in
    /// this crate.
    #[error("the external store failed: {0}")]
    StoreError(String),
}

/// Returns today's date anchored to the given canonical timezone, falling
/// back to UTC when no timezone is configured.
///
/// Reports compare transactions against the user's calendar day, not the
/// server's, so the reference date must be resolved through the user's
/// timezone before any period math happens.
pub fn reference_date(canonical_timezone: Option<&str>) -> Result<Date, Error> {
    match canonical_timezone {
        Some(name) => timezone::local_date(name),
        None => Ok(time::OffsetDateTime::now_utc().date()),
    }
}
