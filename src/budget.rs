//! Budget utilization rollup for the current month.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    registry::{Category, SpendFilter},
    transaction::Transaction,
};

/// A monthly spending cap attached to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Opaque unique identifier.
    pub id: String,
    /// The ID of the category this budget caps.
    pub category_id: String,
    /// The monthly cap. Positive by invariant; the store layer rejects
    /// non-positive limits.
    pub limit: f64,
}

/// A budget joined with its category, as returned by the external store.
///
/// `category` is `None` when the referenced category has been deleted; the
/// rollup flags such budgets instead of dropping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetWithCategory {
    /// The budget record.
    pub budget: Budget,
    /// The joined category, if it still exists.
    pub category: Option<Category>,
}

/// How much of a budget the current month has consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The budgeted category's name, or the dangling category ID for an
    /// orphaned budget.
    pub category: String,
    /// The monthly cap. Duplicate budgets for one category are summed.
    pub limit: f64,
    /// Current-month spending against this budget.
    pub spent: f64,
    /// `spent / limit` as a percentage, clamped to `0..=100` for display.
    pub utilization: f64,
    /// The unclamped `spent / limit` ratio for alerting, or `None` when the
    /// limit is zero.
    pub ratio: Option<f64>,
    /// The alert tier for this row.
    pub tier: BudgetTier,
    /// Whether the budget's category no longer exists.
    pub orphaned: bool,
}

/// Alert tiers for budget utilization. Boundary values belong to the lower
/// tier: exactly 50% is still [BudgetTier::Ok], exactly 75% is still
/// [BudgetTier::Warning].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// At most half of the budget used.
    Ok,
    /// More than half but at most three quarters used.
    Warning,
    /// More than three quarters used.
    Critical,
}

impl BudgetTier {
    fn from_percent(percent: f64) -> Self {
        if percent <= 50.0 {
            Self::Ok
        } else if percent <= 75.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

/// Rolls each budget up against the current month's spending.
///
/// The current month is the calendar month of `reference`. Categories in
/// `filter` contribute no spending. Budgets sharing a category are summed
/// into one row; budgets whose category was deleted come back as flagged
/// orphan rows rather than being dropped or failing the whole rollup.
pub fn compute_budget_status(
    budgets: &[BudgetWithCategory],
    transactions: &[Transaction],
    reference: Date,
    filter: &SpendFilter<'_>,
) -> Vec<BudgetStatus> {
    let mut rows: Vec<BudgetStatus> = Vec::new();

    for entry in budgets {
        let Some(category) = &entry.category else {
            tracing::warn!(
                "budget {} references missing category {}",
                entry.budget.id,
                entry.budget.category_id
            );
            rows.push(status_row(entry.budget.category_id.clone(), entry.budget.limit, 0.0, true));
            continue;
        };

        // A category may carry several budget records if historical data
        // predates the one-budget-per-category invariant; sum their limits
        // into the existing row.
        if let Some(row) = rows
            .iter_mut()
            .find(|row| !row.orphaned && row.category == category.name)
        {
            *row = status_row(row.category.clone(), row.limit + entry.budget.limit, row.spent, false);
            continue;
        }

        let spent = if filter.excludes(&category.name) {
            0.0
        } else {
            transactions
                .iter()
                .filter(|t| {
                    t.date.year() == reference.year()
                        && t.date.month() == reference.month()
                        && t.category.eq_ignore_ascii_case(&category.name)
                        && !filter.excludes(&t.category)
                })
                .map(|t| t.amount)
                .sum()
        };

        rows.push(status_row(category.name.clone(), entry.budget.limit, spent, false));
    }

    rows.sort_by(|a, b| (a.orphaned, a.category.as_str()).cmp(&(b.orphaned, b.category.as_str())));
    rows
}

fn status_row(category: String, limit: f64, spent: f64, orphaned: bool) -> BudgetStatus {
    let (utilization, ratio, tier) = if limit > 0.0 {
        let percent = spent / limit * 100.0;
        (
            percent.clamp(0.0, 100.0),
            Some(spent / limit),
            BudgetTier::from_percent(percent),
        )
    } else {
        let tier = if spent > 0.0 {
            BudgetTier::Critical
        } else {
            BudgetTier::Ok
        };
        (0.0, None, tier)
    };

    BudgetStatus {
        category,
        limit,
        spent,
        utilization,
        ratio,
        tier,
        orphaned,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        registry::{BUDGET_FILTER, Category},
        test_utils::tx,
    };

    use super::{Budget, BudgetStatus, BudgetTier, BudgetWithCategory, compute_budget_status};

    const REFERENCE: time::Date = date!(2025 - 03 - 15);

    fn budget(id: &str, category: Option<&str>, limit: f64) -> BudgetWithCategory {
        BudgetWithCategory {
            budget: Budget {
                id: id.to_owned(),
                category_id: format!("cat-{id}"),
                limit,
            },
            category: category.map(|name| Category {
                id: format!("cat-{id}"),
                name: name.to_owned(),
                descriptions: Vec::new(),
            }),
        }
    }

    #[test]
    fn tier_boundaries_belong_to_the_lower_tier() {
        let budgets = vec![budget("b1", Some("Travel"), 1000.0)];

        let exactly_half = vec![tx("Travel", "Flights", 500.0, REFERENCE)];
        let status = compute_budget_status(&budgets, &exactly_half, REFERENCE, &BUDGET_FILTER);
        assert_eq!(status[0].tier, BudgetTier::Ok);

        let exactly_three_quarters = vec![tx("Travel", "Flights", 750.0, REFERENCE)];
        let status =
            compute_budget_status(&budgets, &exactly_three_quarters, REFERENCE, &BUDGET_FILTER);
        assert_eq!(status[0].tier, BudgetTier::Warning);

        let just_over = vec![tx("Travel", "Flights", 751.0, REFERENCE)];
        let status = compute_budget_status(&budgets, &just_over, REFERENCE, &BUDGET_FILTER);
        assert_eq!(status[0].tier, BudgetTier::Critical);
    }

    #[test]
    fn utilization_is_clamped_but_ratio_is_not() {
        let budgets = vec![budget("b1", Some("Travel"), 500.0)];
        let transactions = vec![tx("Travel", "Flights", 750.0, REFERENCE)];

        let status = compute_budget_status(&budgets, &transactions, REFERENCE, &BUDGET_FILTER);

        assert_eq!(status[0].utilization, 100.0);
        assert_eq!(status[0].ratio, Some(1.5));
        assert_eq!(status[0].tier, BudgetTier::Critical);
    }

    #[test]
    fn only_current_month_spending_counts() {
        let budgets = vec![budget("b1", Some("Travel"), 1000.0)];
        let transactions = vec![
            tx("Travel", "Flights", 200.0, REFERENCE),
            tx("Travel", "Hotels", 999.0, date!(2025 - 02 - 15)),
            tx("Travel", "Hotels", 999.0, date!(2024 - 03 - 15)),
        ];

        let status = compute_budget_status(&budgets, &transactions, REFERENCE, &BUDGET_FILTER);

        assert_eq!(status[0].spent, 200.0);
    }

    #[test]
    fn excluded_categories_contribute_no_spending() {
        let budgets = vec![budget("b1", Some("Investment"), 1000.0)];
        let transactions = vec![tx("Investment", "Index funds", 800.0, REFERENCE)];

        let status = compute_budget_status(&budgets, &transactions, REFERENCE, &BUDGET_FILTER);

        assert_eq!(status[0].spent, 0.0);
        assert_eq!(status[0].tier, BudgetTier::Ok);
    }

    #[test]
    fn duplicate_budgets_for_one_category_are_summed() {
        let budgets = vec![
            budget("b1", Some("Travel"), 400.0),
            budget("b2", Some("Travel"), 600.0),
        ];
        let transactions = vec![tx("Travel", "Flights", 500.0, REFERENCE)];

        let status = compute_budget_status(&budgets, &transactions, REFERENCE, &BUDGET_FILTER);

        assert_eq!(status.len(), 1);
        assert_eq!(status[0].limit, 1000.0);
        assert_eq!(status[0].spent, 500.0);
        assert_eq!(status[0].tier, BudgetTier::Ok);
    }

    #[test]
    fn orphaned_budgets_are_flagged_not_dropped() {
        let budgets = vec![
            budget("b1", Some("Travel"), 400.0),
            budget("b2", None, 600.0),
        ];

        let status = compute_budget_status(&budgets, &[], REFERENCE, &BUDGET_FILTER);

        assert_eq!(status.len(), 2);
        let orphan: &BudgetStatus = status.iter().find(|row| row.orphaned).unwrap();
        assert_eq!(orphan.category, "cat-b2");
        assert_eq!(orphan.spent, 0.0);
    }

    #[test]
    fn rows_sort_by_category_with_orphans_last() {
        let budgets = vec![
            budget("b1", None, 100.0),
            budget("b2", Some("Travel"), 100.0),
            budget("b3", Some("Health"), 100.0),
        ];

        let status = compute_budget_status(&budgets, &[], REFERENCE, &BUDGET_FILTER);

        let names: Vec<&str> = status.iter().map(|row| row.category.as_str()).collect();
        assert_eq!(names, ["Health", "Travel", "cat-b1"]);
    }

    #[test]
    fn zero_limit_has_no_ratio() {
        let budgets = vec![budget("b1", Some("Travel"), 0.0)];
        let transactions = vec![tx("Travel", "Flights", 10.0, REFERENCE)];

        let status = compute_budget_status(&budgets, &transactions, REFERENCE, &BUDGET_FILTER);

        assert_eq!(status[0].ratio, None);
        assert_eq!(status[0].utilization, 0.0);
        assert_eq!(status[0].tier, BudgetTier::Critical);
    }
}
