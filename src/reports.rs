//! Report assembly: fetch through the store interfaces, ingest once, run
//! the engine, and attach skip accounting.
//!
//! Each function here backs one presentation surface. They are the only
//! places where store access, ingestion, and the pure computations meet;
//! everything below them is deterministic.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    budget::{BudgetStatus, compute_budget_status},
    dates::{month_range, months_back, previous_month},
    registry::{BUDGET_FILTER, EXPENSE_FILTER, is_income},
    store::{BudgetStore, CategoryStore, TransactionQuery, TransactionStore},
    summary::{
        MonthlyRollup, PeriodSummary, compute_monthly_rollup, compute_opening_balance,
        compute_period_summary,
    },
    transaction::{Transaction, ingest},
    trend::{
        DailyPoint, DistributionEntry, MonthlyTrendRow, PercentChange, Polarity, TrendDirection,
        compute_category_distribution, compute_daily_trend, compute_monthly_trend, direction,
        month_over_month,
    },
};

/// How many calendar months the monthly rollup table covers.
const ROLLUP_MONTHS: u32 = 6;

/// Headline figures for the current month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    /// Income received this month.
    pub total_income: f64,
    /// Non-income, non-investment spending this month.
    pub total_spending: f64,
    /// Investments made this month.
    pub total_investment: f64,
    /// Income minus all non-income outflow this month.
    pub net_savings: f64,
    /// The balance carried forward from last month.
    pub opening_balance: f64,
    /// Records skipped during ingestion.
    pub skipped: usize,
}

/// Builds the current-month overview.
pub fn overview_report<T: TransactionStore>(
    transactions: &T,
    reference: Date,
) -> Result<OverviewReport, Error> {
    // The opening balance needs last month too, so fetch both months.
    let (prior_year, prior_month) = previous_month(reference.year(), reference.month());
    let start = *month_range(prior_year, prior_month).start();
    let end = *month_range(reference.year(), reference.month()).end();

    let records = transactions.get_query(TransactionQuery {
        date_range: Some(start..=end),
        ..Default::default()
    })?;
    let outcome = ingest(&records);

    let mut total_income = 0.0;
    let mut total_outflow = 0.0;
    let mut total_investment = 0.0;
    for transaction in current_month(&outcome.transactions, reference) {
        if transaction.is_income() {
            total_income += transaction.amount;
        } else {
            total_outflow += transaction.amount;
            if transaction.category.eq_ignore_ascii_case("Investment") {
                total_investment += transaction.amount;
            }
        }
    }

    tracing::debug!(
        "overview over {} transactions ({} skipped)",
        outcome.transactions.len(),
        outcome.skipped
    );

    Ok(OverviewReport {
        total_income,
        total_spending: total_outflow - total_investment,
        total_investment,
        net_savings: total_income - total_outflow,
        opening_balance: compute_opening_balance(&outcome.transactions, reference),
        skipped: outcome.skipped,
    })
}

/// The period summary table plus its skip count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummaryReport {
    /// The aggregated table.
    pub summary: PeriodSummary,
    /// Records skipped during ingestion.
    pub skipped: usize,
}

/// Builds the five-period summary table.
pub fn period_summary_report<T: TransactionStore>(
    transactions: &T,
    reference: Date,
) -> Result<PeriodSummaryReport, Error> {
    // The oldest period is three months back; nothing before that can land
    // in any bucket.
    let (oldest_year, oldest_month) = months_back(reference.year(), reference.month(), 3);
    let start = *month_range(oldest_year, oldest_month).start();
    let end = *month_range(reference.year(), reference.month()).end();

    let records = transactions.get_query(TransactionQuery {
        date_range: Some(start..=end),
        ..Default::default()
    })?;
    let outcome = ingest(&records);

    Ok(PeriodSummaryReport {
        summary: compute_period_summary(&outcome.transactions, reference),
        skipped: outcome.skipped,
    })
}

/// A percent change paired with its presentation direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendCell {
    /// The period-over-period change.
    pub change: PercentChange,
    /// Whether the change is an improvement under the row's polarity.
    pub direction: TrendDirection,
}

fn trend_cells(amounts: &[f64; crate::PERIOD_COUNT], polarity: Polarity) -> [TrendCell; 3] {
    month_over_month(amounts).map(|change| TrendCell {
        change,
        direction: direction(change, polarity),
    })
}

/// Everything the analytics page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// All-time income.
    pub total_income: f64,
    /// All-time non-income spending.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
    /// Balance as a share of income, or `None` when there is no income.
    pub savings_rate: Option<f64>,
    /// The five-period summary table.
    pub summary: PeriodSummary,
    /// Month-over-month changes for the income row (increase is good).
    pub income_trend: [TrendCell; 3],
    /// Month-over-month changes for the expenditure row (increase is bad).
    pub expense_trend: [TrendCell; 3],
    /// Month-over-month changes for the balance row (increase is good).
    pub balance_trend: [TrendCell; 3],
    /// Pie segments of spending by category.
    pub distribution: Vec<DistributionEntry>,
    /// Sparse daily spending series.
    pub daily_trend: Vec<DailyPoint>,
    /// Grouped-bar rows of spending by description per period.
    pub monthly_trend: Vec<MonthlyTrendRow>,
    /// Income/expenses/investments/savings for the last six months.
    pub monthly_rollup: Vec<MonthlyRollup>,
    /// Records skipped during ingestion.
    pub skipped: usize,
}

/// Builds the analytics report over the full transaction history.
pub fn analytics_report<T: TransactionStore>(
    transactions: &T,
    reference: Date,
) -> Result<AnalyticsReport, Error> {
    let records = transactions.get_query(TransactionQuery::default())?;
    let outcome = ingest(&records);

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    for transaction in &outcome.transactions {
        if transaction.is_income() {
            total_income += transaction.amount;
        } else {
            total_expense += transaction.amount;
        }
    }
    let balance = total_income - total_expense;

    let savings_rate = if total_income == 0.0 {
        None
    } else {
        Some(balance / total_income * 100.0)
    };

    let summary = compute_period_summary(&outcome.transactions, reference);
    let income_trend = trend_cells(&summary.total_income, Polarity::HigherIsBetter);
    let expense_trend = trend_cells(&summary.total_expense, Polarity::LowerIsBetter);
    let balance_trend = trend_cells(&summary.balance, Polarity::HigherIsBetter);

    Ok(AnalyticsReport {
        total_income,
        total_expense,
        balance,
        savings_rate,
        income_trend,
        expense_trend,
        balance_trend,
        distribution: compute_category_distribution(&outcome.transactions, &EXPENSE_FILTER),
        daily_trend: compute_daily_trend(&outcome.transactions),
        monthly_trend: compute_monthly_trend(&outcome.transactions, reference),
        monthly_rollup: compute_monthly_rollup(&outcome.transactions, reference, ROLLUP_MONTHS),
        summary,
        skipped: outcome.skipped,
    })
}

/// Budget utilization for the current month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    /// One row per budgeted category, plus flagged orphans.
    pub statuses: Vec<BudgetStatus>,
    /// Categories without a budget, in store order. Having no budget is
    /// normal, not an error.
    pub unbudgeted: Vec<String>,
    /// Records skipped during ingestion.
    pub skipped: usize,
}

/// Builds the budget page: utilization per budgeted category and the list
/// of categories that could still be budgeted.
pub fn budget_report<T, B, C>(
    transactions: &T,
    budgets: &B,
    categories: &C,
    reference: Date,
) -> Result<BudgetReport, Error>
where
    T: TransactionStore,
    B: BudgetStore,
    C: CategoryStore,
{
    let budget_rows = budgets.get_all()?;
    let all_categories = categories.get_all()?;

    let records = transactions.get_query(TransactionQuery {
        month: Some((reference.year(), reference.month())),
        ..Default::default()
    })?;
    let outcome = ingest(&records);

    let statuses = compute_budget_status(&budget_rows, &outcome.transactions, reference, &BUDGET_FILTER);

    let unbudgeted = all_categories
        .iter()
        .filter(|category| !is_income(&category.name))
        .filter(|category| {
            !statuses
                .iter()
                .any(|row| !row.orphaned && row.category == category.name)
        })
        .map(|category| category.name.clone())
        .collect();

    Ok(BudgetReport {
        statuses,
        unbudgeted,
        skipped: outcome.skipped,
    })
}

fn current_month(transactions: &[Transaction], reference: Date) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(move |t| {
        t.date.year() == reference.year() && t.date.month() == reference.month()
    })
}
