//! The aggregation engine: buckets transactions into comparison periods and
//! rolls up category, income, expense and balance totals.

use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;
use time::Date;

use crate::{
    dates::{format_month_year, months_back, previous_month},
    period::{PERIOD_COUNT, generate_periods},
    registry::is_income,
    transaction::Transaction,
};

/// The full period-bucketed summary table for a transaction set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// Labels of the five periods, in generator order.
    pub period_labels: Vec<String>,
    /// Per-category rollups: "Income" first, then alphabetical.
    pub categories: Vec<CategoryRollup>,
    /// Income totals per period.
    pub total_income: [f64; PERIOD_COUNT],
    /// Non-income totals per period.
    pub total_expense: [f64; PERIOD_COUNT],
    /// `total_income - total_expense`, per period.
    pub balance: [f64; PERIOD_COUNT],
}

/// One category's totals per period, with its description breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRollup {
    /// The category name as found on the transactions.
    pub name: String,
    /// The category total per period, summed over all descriptions.
    pub totals: [f64; PERIOD_COUNT],
    /// Per-description amounts, sorted alphabetically by description.
    pub descriptions: Vec<DescriptionRollup>,
}

/// One (category, description) row of per-period amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionRollup {
    /// The description label as found on the transactions.
    pub description: String,
    /// The amount per period.
    pub amounts: [f64; PERIOD_COUNT],
}

/// Aggregates `transactions` into the five comparison periods anchored to
/// `reference`.
///
/// A transaction is added to every period whose window contains its date,
/// so a transaction dated on the reference date counts in both "Today" and
/// "Current Month". Grouping is purely by the category and description
/// strings found on the transactions; unknown categories aggregate like any
/// other.
pub fn compute_period_summary(transactions: &[Transaction], reference: Date) -> PeriodSummary {
    let periods = generate_periods(reference);

    let mut grouped: HashMap<&str, HashMap<&str, [f64; PERIOD_COUNT]>> = HashMap::new();
    let mut total_income = [0.0; PERIOD_COUNT];
    let mut total_expense = [0.0; PERIOD_COUNT];

    for transaction in transactions {
        for (index, period) in periods.iter().enumerate() {
            if !period.contains(transaction.date) {
                continue;
            }

            let amounts = grouped
                .entry(transaction.category.as_str())
                .or_default()
                .entry(transaction.description.as_str())
                .or_insert([0.0; PERIOD_COUNT]);
            amounts[index] += transaction.amount;

            if transaction.is_income() {
                total_income[index] += transaction.amount;
            } else {
                total_expense[index] += transaction.amount;
            }
        }
    }

    let mut categories: Vec<CategoryRollup> = grouped
        .into_iter()
        .map(|(name, by_description)| {
            let mut descriptions: Vec<DescriptionRollup> = by_description
                .into_iter()
                .map(|(description, amounts)| DescriptionRollup {
                    description: description.to_owned(),
                    amounts,
                })
                .collect();
            descriptions.sort_by(|a, b| a.description.cmp(&b.description));

            let mut totals = [0.0; PERIOD_COUNT];
            for row in &descriptions {
                for (slot, amount) in totals.iter_mut().zip(row.amounts) {
                    *slot += amount;
                }
            }

            CategoryRollup {
                name: name.to_owned(),
                totals,
                descriptions,
            }
        })
        .collect();
    categories.sort_by(|a, b| income_first(&a.name, &b.name));

    let mut balance = [0.0; PERIOD_COUNT];
    for index in 0..PERIOD_COUNT {
        balance[index] = total_income[index] - total_expense[index];
    }

    PeriodSummary {
        period_labels: periods.into_iter().map(|period| period.label).collect(),
        categories,
        total_income,
        total_expense,
        balance,
    }
}

/// Sorts "Income" before everything else, then alphabetically.
fn income_first(a: &str, b: &str) -> Ordering {
    match (is_income(a), is_income(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// The net balance carried forward from the calendar month before
/// `reference`: that month's income minus its non-income spending.
pub fn compute_opening_balance(transactions: &[Transaction], reference: Date) -> f64 {
    let (year, month) = previous_month(reference.year(), reference.month());

    let mut income = 0.0;
    let mut expense = 0.0;
    for transaction in transactions {
        if transaction.date.year() != year || transaction.date.month() != month {
            continue;
        }

        if transaction.is_income() {
            income += transaction.amount;
        } else {
            expense += transaction.amount;
        }
    }

    income - expense
}

/// One calendar month's income, expenses, investments, and savings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRollup {
    /// The month label, e.g. `"Mar-25"`.
    pub label: String,
    /// Total of "Income" transactions.
    pub income: f64,
    /// Total of spending other than income and investments.
    pub expenses: f64,
    /// Total of "Investment" transactions.
    pub investments: f64,
    /// `income - expenses`.
    pub savings: f64,
}

/// Rolls up the last `months` calendar months ending at `reference`'s
/// month, most recent first. Months with no transactions are present with
/// zeroed totals.
pub fn compute_monthly_rollup(
    transactions: &[Transaction],
    reference: Date,
    months: u32,
) -> Vec<MonthlyRollup> {
    (0..months)
        .map(|offset| {
            let (year, month) = months_back(reference.year(), reference.month(), offset);
            let first_of_month =
                Date::from_calendar_date(year, month, 1).expect("invalid month start date");

            let mut rollup = MonthlyRollup {
                label: format_month_year(first_of_month),
                income: 0.0,
                expenses: 0.0,
                investments: 0.0,
                savings: 0.0,
            };

            for transaction in transactions {
                if transaction.date.year() != year || transaction.date.month() != month {
                    continue;
                }

                if transaction.is_income() {
                    rollup.income += transaction.amount;
                } else if transaction.category.eq_ignore_ascii_case("Investment") {
                    rollup.investments += transaction.amount;
                } else {
                    rollup.expenses += transaction.amount;
                }
            }

            rollup.savings = rollup.income - rollup.expenses;
            rollup
        })
        .collect()
}
