//! Read interfaces to the external datastore.
//!
//! Persistence is not this crate's concern: something else owns the
//! database and its CRUD surface. Reports only ever read, through the
//! traits defined here, and treat a failed fetch as fatal to the whole
//! computation ([crate::Error::StoreError]).

use std::ops::RangeInclusive;

use time::{Date, Month};

use crate::{Error, budget::BudgetWithCategory, registry::Category, transaction::TransactionRecord};

/// Handles the retrieval of transaction records.
pub trait TransactionStore {
    /// Retrieve transaction records from the store in the way defined by
    /// `query`.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<TransactionRecord>, Error>;
}

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query].
#[derive(Debug, Default)]
pub struct TransactionQuery {
    /// Include transactions within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Include transactions within a single calendar month.
    pub month: Option<(i32, Month)>,
    /// Selects up to the first N (`limit`) transactions.
    pub limit: Option<u64>,
    /// Orders transactions by date in the order `sort_date`. None returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// Handles the retrieval of transaction categories.
pub trait CategoryStore {
    /// Get all categories, in the store's display order.
    fn get_all(&self) -> Result<Vec<Category>, Error>;
}

/// Handles the retrieval of budgets.
///
/// Implementers must reject the creation of a second budget for an
/// already-budgeted category with [Error::DuplicateBudget]; the rollup
/// still tolerates duplicates that predate that invariant.
pub trait BudgetStore {
    /// Get all budgets, each joined with its category. Budgets whose
    /// category has been deleted are returned with `category: None`, not
    /// omitted.
    fn get_all(&self) -> Result<Vec<BudgetWithCategory>, Error>;
}
