//! The category taxonomy and the shared spend-filter policy.
//!
//! Which categories count towards which totals is decided here, once, as
//! named filters. Report code takes a [SpendFilter] parameter instead of
//! hardcoding its own exclusion list, so "expenses", "household spending"
//! and "budget utilization" cannot drift apart.

use serde::{Deserialize, Serialize};

/// A transaction category as stored externally, carrying its registered
/// descriptions in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque unique identifier assigned by the external store.
    pub id: String,
    /// Globally unique display name, used as the grouping key everywhere.
    pub name: String,
    /// The sub-labels selectable when entering a transaction.
    pub descriptions: Vec<String>,
}

/// The default category taxonomy with each category's registered
/// descriptions.
const DEFAULT_TAXONOMY: &[(&str, &[&str])] = &[
    ("Food & Dining", &["Groceries", "Restaurants", "Takeout", "Coffee", "Snacks"]),
    ("Transportation", &["Gas", "Public Transit", "Ride Share", "Parking", "Car Maintenance"]),
    ("Housing", &["Rent", "Mortgage", "Utilities", "Home Maintenance", "Furniture"]),
    ("Entertainment", &["Movies", "Streaming", "Games", "Concerts", "Hobbies"]),
    ("Shopping", &["Clothing", "Electronics", "Home Goods", "Gifts", "Other"]),
    ("Health", &["Insurance", "Doctor", "Pharmacy", "Gym", "Wellness"]),
    ("Education", &["Tuition", "Books", "Courses", "Supplies", "Other"]),
    ("Travel", &["Flights", "Hotels", "Activities", "Food", "Other"]),
    ("Income", &["Salary", "Bonus", "Investment", "Freelance", "Other"]),
    ("Other", &["Miscellaneous", "Gifts", "Donations", "Fees", "Other"]),
];

/// An ordered mapping from category name to its registered descriptions.
///
/// The registry only informs data entry and display; aggregation never
/// validates against it, so categories found on transactions but missing
/// here still roll up normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: Vec<(String, Vec<String>)>,
}

impl CategoryRegistry {
    /// Builds a registry from externally-loaded categories, preserving
    /// their order.
    pub fn from_categories(categories: &[Category]) -> Self {
        Self {
            entries: categories
                .iter()
                .map(|category| (category.name.clone(), category.descriptions.clone()))
                .collect(),
        }
    }

    /// The registered descriptions for `category_name`, or an empty slice
    /// for an unknown category.
    pub fn descriptions_for(&self, category_name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category_name))
            .map(|(_, descriptions)| descriptions.as_slice())
            .unwrap_or(&[])
    }

    /// The category names in registry order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            entries: DEFAULT_TAXONOMY
                .iter()
                .map(|(name, descriptions)| {
                    (
                        (*name).to_owned(),
                        descriptions.iter().map(|d| (*d).to_owned()).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Whether a category name denotes income. The comparison ignores case so
/// `"income"` and `"INCOME"` behave identically.
pub fn is_income(category_name: &str) -> bool {
    category_name.eq_ignore_ascii_case("Income")
}

/// A named set of categories excluded from a spending rollup.
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendFilter<'a> {
    excluded: &'a [&'a str],
}

/// Excludes only income. Used for expenditure totals.
pub const EXPENSE_FILTER: SpendFilter<'static> = SpendFilter {
    excluded: &["Income"],
};

/// Excludes income, investments, and fixed housing outgoings. Used for
/// discretionary "household expenses" views.
pub const HOUSEHOLD_FILTER: SpendFilter<'static> = SpendFilter {
    excluded: &["Income", "Investment", "Rent", "Mortgage", "Utilities"],
};

/// Excludes income and investments. Used for budget utilization.
pub const BUDGET_FILTER: SpendFilter<'static> = SpendFilter {
    excluded: &["Income", "Investment"],
};

impl<'a> SpendFilter<'a> {
    /// A filter excluding exactly the given category names.
    pub fn new(excluded: &'a [&'a str]) -> Self {
        Self { excluded }
    }

    /// Whether `category_name` is excluded from rollups under this filter.
    pub fn excludes(&self, category_name: &str) -> bool {
        self.excluded
            .iter()
            .any(|name| name.eq_ignore_ascii_case(category_name))
    }
}
