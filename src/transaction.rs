//! The canonical transaction model and one-shot ingestion.
//!
//! External stores hand back loosely-typed records: amounts that may be
//! numbers or currency strings, dates that may carry a time-of-day.
//! Everything is converted to the canonical form exactly once, here, so the
//! aggregation code downstream never re-parses field values.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, currency::parse_amount, registry::is_income};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A transaction as it arrives from the external store, before ingestion.
///
/// Field types are deliberately loose to match what real stores produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Calendar date, as `yyyy-mm-dd` optionally followed by a time-of-day.
    pub date: String,
    /// Free-text category label.
    pub category: String,
    /// Free-text description label.
    pub description: String,
    /// Monetary value, as a number or a string with currency symbols.
    pub amount: AmountField,
    /// Optional free-text annotation. Not used in aggregation.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A monetary field that may be stored as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    /// Already numeric.
    Number(f64),
    /// Text such as `"$1,234.50"`.
    Text(String),
}

/// A transaction in canonical form: day-granular date, non-negative amount
/// magnitude, trimmed labels.
///
/// Direction (money in or out) is derived from the category, never from the
/// sign of the stored amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Opaque unique identifier.
    pub id: String,
    /// The calendar day the transaction happened.
    pub date: Date,
    /// Category label, trimmed.
    pub category: String,
    /// Description label, trimmed.
    pub description: String,
    /// Amount magnitude. Always `>= 0`.
    pub amount: f64,
    /// Optional free-text annotation.
    pub comment: Option<String>,
}

impl Transaction {
    /// Whether this transaction is income rather than spending.
    pub fn is_income(&self) -> bool {
        is_income(&self.category)
    }
}

impl TryFrom<&TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: &TransactionRecord) -> Result<Self, Self::Error> {
        let amount = match &record.amount {
            AmountField::Number(value) if value.is_finite() => *value,
            AmountField::Number(value) => {
                return Err(Error::InvalidAmount(value.to_string()));
            }
            AmountField::Text(text) => parse_amount(text)?,
        };

        Ok(Self {
            id: record.id.clone(),
            date: parse_record_date(&record.date)?,
            category: record.category.trim().to_owned(),
            description: record.description.trim().to_owned(),
            amount: amount.abs(),
            comment: record.comment.clone(),
        })
    }
}

/// Parses the day part of a stored date string, tolerating a trailing
/// time-of-day such as `"2025-03-15T09:30:00.000Z"`.
fn parse_record_date(value: &str) -> Result<Date, Error> {
    let day_part = value.get(..10).unwrap_or(value);

    Date::parse(day_part, DATE_FORMAT).map_err(|_| Error::InvalidDate(value.to_owned()))
}

/// The outcome of converting a batch of records into canonical form.
#[derive(Debug, Default, PartialEq)]
pub struct Ingest {
    /// Records that converted cleanly, in input order.
    pub transactions: Vec<Transaction>,
    /// How many records were skipped because a field would not parse.
    pub skipped: usize,
}

/// Converts records to canonical [Transaction]s, skipping records whose
/// amount or date does not parse.
///
/// Skips are per-record and counted, never fatal: a report built from the
/// result can say "3 records skipped" instead of presenting a silently
/// incomplete total.
pub fn ingest(records: &[TransactionRecord]) -> Ingest {
    let mut outcome = Ingest::default();

    for record in records {
        match Transaction::try_from(record) {
            Ok(transaction) => outcome.transactions.push(transaction),
            Err(error) => {
                tracing::warn!("skipping transaction {}: {error}", record.id);
                outcome.skipped += 1;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{AmountField, Transaction, TransactionRecord, ingest};

    fn record(id: &str, date: &str, amount: AmountField) -> TransactionRecord {
        TransactionRecord {
            id: id.to_owned(),
            date: date.to_owned(),
            category: "Food & Dining".to_owned(),
            description: "Groceries".to_owned(),
            amount,
            comment: None,
        }
    }

    #[test]
    fn converts_numeric_amounts() {
        let record = record("t1", "2025-03-15", AmountField::Number(250.5));

        let transaction = Transaction::try_from(&record).unwrap();

        assert_eq!(transaction.amount, 250.5);
        assert_eq!(transaction.date, date!(2025 - 03 - 15));
    }

    #[test]
    fn converts_text_amounts_with_symbols() {
        let record = record("t1", "2025-03-15", AmountField::Text("$1,250.50".to_owned()));

        let transaction = Transaction::try_from(&record).unwrap();

        assert_eq!(transaction.amount, 1250.5);
    }

    #[test]
    fn negative_amounts_become_magnitudes() {
        let record = record("t1", "2025-03-15", AmountField::Number(-99.0));

        let transaction = Transaction::try_from(&record).unwrap();

        assert_eq!(transaction.amount, 99.0);
    }

    #[test]
    fn tolerates_timestamps_in_date_fields() {
        let record = record(
            "t1",
            "2025-03-15T09:30:00.000Z",
            AmountField::Number(10.0),
        );

        let transaction = Transaction::try_from(&record).unwrap();

        assert_eq!(transaction.date, date!(2025 - 03 - 15));
    }

    #[test]
    fn trims_category_and_description() {
        let mut raw = record("t1", "2025-03-15", AmountField::Number(10.0));
        raw.category = " Income ".to_owned();
        raw.description = " Salary ".to_owned();

        let transaction = Transaction::try_from(&raw).unwrap();

        assert_eq!(transaction.category, "Income");
        assert_eq!(transaction.description, "Salary");
        assert!(transaction.is_income());
    }

    #[test]
    fn ingest_skips_unparsable_amounts_and_counts_them() {
        let records = vec![
            record("t1", "2025-03-15", AmountField::Number(100.0)),
            record("t2", "2025-03-15", AmountField::Text("abc".to_owned())),
            record("t3", "2025-03-15", AmountField::Number(50.0)),
        ];

        let outcome = ingest(&records);

        assert_eq!(outcome.transactions.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.transactions[0].id, "t1");
        assert_eq!(outcome.transactions[1].id, "t3");
    }

    #[test]
    fn ingest_skips_unparsable_dates() {
        let records = vec![
            record("t1", "not a date", AmountField::Number(100.0)),
            record("t2", "2025-13-40", AmountField::Number(100.0)),
        ];

        let outcome = ingest(&records);

        assert!(outcome.transactions.is_empty());
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn record_amounts_deserialize_from_number_or_text() {
        let json = r#"[
            {"id": "a", "date": "2025-01-02", "category": "Health", "description": "Gym", "amount": 45.0},
            {"id": "b", "date": "2025-01-03", "category": "Health", "description": "Gym", "amount": "$45.00", "comment": "annual"}
        ]"#;

        let records: Vec<TransactionRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].amount, AmountField::Number(45.0));
        assert_eq!(records[1].amount, AmountField::Text("$45.00".to_owned()));
        assert_eq!(records[1].comment.as_deref(), Some("annual"));
    }
}
