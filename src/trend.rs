//! Period-over-period change math and chart-ready series.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};
use time::Date;

use crate::{
    period::{PERIOD_COUNT, generate_periods},
    registry::SpendFilter,
    transaction::Transaction,
};

/// Pie segments below this share of the total suppress their inline label
/// but keep their legend entry.
const LABEL_SHARE_THRESHOLD: f64 = 5.0;

/// The change between two period totals.
///
/// A zero denominator is carried as a distinguished variant rather than
/// being coerced to `0`, infinity, or NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    /// Both periods were zero; nothing changed.
    Zero,
    /// The prior period was zero but the current one is not, so a
    /// percentage is undefined.
    Undefined,
    /// The signed percentage change from the prior period.
    Changed(f64),
}

impl std::fmt::Display for PercentChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentChange::Zero => write!(f, "0%"),
            PercentChange::Undefined => write!(f, "N/A"),
            PercentChange::Changed(value) => write!(f, "{value:+.2}%"),
        }
    }
}

impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Computes the percentage change from `previous` to `current`.
pub fn percent_change(current: f64, previous: f64) -> PercentChange {
    if previous == 0.0 {
        if current == 0.0 {
            PercentChange::Zero
        } else {
            PercentChange::Undefined
        }
    } else {
        PercentChange::Changed(((current - previous) / previous) * 100.0)
    }
}

/// Month-over-month changes for a row of period amounts: current month vs
/// last month, and each trailing month vs the one before it. "Today" is
/// never percent-compared.
pub fn month_over_month(amounts: &[f64; PERIOD_COUNT]) -> [PercentChange; 3] {
    [
        percent_change(amounts[1], amounts[2]),
        percent_change(amounts[2], amounts[3]),
        percent_change(amounts[3], amounts[4]),
    ]
}

/// Which direction of change counts as an improvement for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Spending rows: a decrease is good.
    LowerIsBetter,
    /// Income and balance rows: an increase is good.
    HigherIsBetter,
}

/// A change classified against a row's [Polarity], for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    /// The change moved the row the desirable way.
    Improving,
    /// The change moved the row the undesirable way.
    Worsening,
    /// No change.
    Flat,
    /// The change is undefined, so no direction can be assigned.
    Unknown,
}

/// Classifies a change for display. The polarity parameter is what flips
/// "increase is bad" for expense rows into "increase is good" for income
/// and balance rows.
pub fn direction(change: PercentChange, polarity: Polarity) -> TrendDirection {
    let value = match change {
        PercentChange::Undefined => return TrendDirection::Unknown,
        PercentChange::Zero => return TrendDirection::Flat,
        PercentChange::Changed(value) => value,
    };

    if value == 0.0 {
        TrendDirection::Flat
    } else if (value > 0.0) == (polarity == Polarity::HigherIsBetter) {
        TrendDirection::Improving
    } else {
        TrendDirection::Worsening
    }
}

/// One pie segment of the category distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    /// The category name.
    pub name: String,
    /// The summed amount for the category.
    pub value: f64,
    /// This category's share of the distribution total, in percent.
    pub percentage: f64,
    /// Whether the segment is large enough to carry an inline label.
    /// Small segments stay in the legend only.
    pub show_label: bool,
}

/// Sums amounts per category under `filter` and converts them into pie
/// segments, largest first. Categories with a zero total are omitted.
pub fn compute_category_distribution(
    transactions: &[Transaction],
    filter: &SpendFilter<'_>,
) -> Vec<DistributionEntry> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for transaction in transactions {
        if filter.excludes(&transaction.category) {
            continue;
        }
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let overall: f64 = totals.values().sum();
    if overall == 0.0 {
        return Vec::new();
    }

    let mut entries: Vec<DistributionEntry> = totals
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(name, value)| {
            let percentage = value / overall * 100.0;
            DistributionEntry {
                name: name.to_owned(),
                value,
                percentage,
                show_label: percentage >= LABEL_SHARE_THRESHOLD,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
}

/// One day's total spending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    /// The calendar day.
    pub date: Date,
    /// Total non-income spending that day.
    pub amount: f64,
}

/// Sums non-income spending per calendar day, ascending by date.
///
/// The series is sparse: days with no transactions are absent, not zero.
pub fn compute_daily_trend(transactions: &[Transaction]) -> Vec<DailyPoint> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();
    for transaction in transactions {
        if transaction.is_income() {
            continue;
        }
        *totals.entry(transaction.date).or_insert(0.0) += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(date, amount)| DailyPoint { date, amount })
        .collect()
}

/// One (category, description) row of the monthly trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrendRow {
    /// The category the description belongs to.
    pub category: String,
    /// The description label.
    pub description: String,
    /// The row's sum across all period slots, used for ordering.
    pub total: f64,
    /// The amount per period, in generator order.
    pub amounts: [f64; PERIOD_COUNT],
}

/// Builds the grouped-bar trend rows: one row per non-income (category,
/// description) pair with a value per comparison period, heaviest rows
/// first.
pub fn compute_monthly_trend(transactions: &[Transaction], reference: Date) -> Vec<MonthlyTrendRow> {
    let periods = generate_periods(reference);

    let mut grouped: HashMap<(&str, &str), [f64; PERIOD_COUNT]> = HashMap::new();
    for transaction in transactions {
        if transaction.is_income() {
            continue;
        }

        for (index, period) in periods.iter().enumerate() {
            if period.contains(transaction.date) {
                grouped
                    .entry((transaction.category.as_str(), transaction.description.as_str()))
                    .or_insert([0.0; PERIOD_COUNT])[index] += transaction.amount;
            }
        }
    }

    let mut rows: Vec<MonthlyTrendRow> = grouped
        .into_iter()
        .map(|((category, description), amounts)| MonthlyTrendRow {
            category: category.to_owned(),
            description: description.to_owned(),
            total: amounts.iter().sum(),
            amounts,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                (a.category.as_str(), a.description.as_str())
                    .cmp(&(b.category.as_str(), b.description.as_str()))
            })
    });

    rows
}
