//! Shared helpers for constructing test data.

use time::Date;

use crate::transaction::Transaction;

/// Builds a canonical transaction with an auto-derived ID.
pub(crate) fn tx(category: &str, description: &str, amount: f64, date: Date) -> Transaction {
    Transaction {
        id: format!("{category}-{description}-{date}"),
        date,
        category: category.to_owned(),
        description: description.to_owned(),
        amount,
        comment: None,
    }
}
