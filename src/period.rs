//! Comparison windows for side-by-side reporting.
//!
//! Every period summary is computed over the same fixed set of five windows
//! anchored to a reference date: today, the current calendar month, and the
//! three months before it.

use serde::Serialize;
use time::{Date, Month};

use crate::dates::{format_date, format_month_year, months_back};

/// The number of periods produced by [generate_periods].
pub const PERIOD_COUNT: usize = 5;

/// A named time window with a date-membership rule.
///
/// Periods are lenses, not a partition: "Today" is contained in "Current
/// Month", so a transaction dated on the reference date belongs to both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    /// The display label for this window, e.g. `"Mar-25"`.
    pub label: String,
    #[serde(skip)]
    span: PeriodSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodSpan {
    Day(Date),
    Month { year: i32, month: Month },
}

impl Period {
    /// Whether `date` falls inside this window. Time-of-day never matters;
    /// membership is decided at day granularity.
    pub fn contains(&self, date: Date) -> bool {
        match self.span {
            PeriodSpan::Day(day) => date == day,
            PeriodSpan::Month { year, month } => date.year() == year && date.month() == month,
        }
    }
}

/// Generates the five comparison windows anchored to `reference`, in fixed
/// order: today, the current month, then the three preceding calendar
/// months, most recent first.
pub fn generate_periods(reference: Date) -> [Period; PERIOD_COUNT] {
    let today = Period {
        label: format!("Today ({})", format_date(reference, "dd/MM/yyyy")),
        span: PeriodSpan::Day(reference),
    };

    let current_month = Period {
        label: format!("Current Month ({})", format_month_year(reference)),
        span: PeriodSpan::Month {
            year: reference.year(),
            month: reference.month(),
        },
    };

    let trailing = |offset: u32| {
        let (year, month) = months_back(reference.year(), reference.month(), offset);
        let first_of_month =
            Date::from_calendar_date(year, month, 1).expect("invalid month start date");

        Period {
            label: format_month_year(first_of_month),
            span: PeriodSpan::Month { year, month },
        }
    };

    [today, current_month, trailing(1), trailing(2), trailing(3)]
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{PERIOD_COUNT, generate_periods};

    #[test]
    fn generates_five_periods_with_labels() {
        let periods = generate_periods(date!(2025 - 03 - 15));

        let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Today (15/03/2025)",
                "Current Month (Mar-25)",
                "Feb-25",
                "Jan-25",
                "Dec-24",
            ]
        );
        assert_eq!(periods.len(), PERIOD_COUNT);
    }

    #[test]
    fn today_and_current_month_both_match_the_reference_date() {
        let periods = generate_periods(date!(2025 - 03 - 15));

        assert!(periods[0].contains(date!(2025 - 03 - 15)));
        assert!(periods[1].contains(date!(2025 - 03 - 15)));
    }

    #[test]
    fn current_month_matches_other_days_today_does_not() {
        let periods = generate_periods(date!(2025 - 03 - 15));

        assert!(!periods[0].contains(date!(2025 - 03 - 14)));
        assert!(periods[1].contains(date!(2025 - 03 - 14)));
        assert!(periods[1].contains(date!(2025 - 03 - 31)));
    }

    #[test]
    fn trailing_months_are_mutually_exclusive() {
        let periods = generate_periods(date!(2025 - 03 - 15));
        let last_month = date!(2025 - 02 - 28);

        let matches: Vec<usize> = (0..PERIOD_COUNT)
            .filter(|&i| periods[i].contains(last_month))
            .collect();
        assert_eq!(matches, vec![2]);
    }

    #[test]
    fn trailing_months_cross_year_boundaries() {
        let periods = generate_periods(date!(2025 - 01 - 10));

        assert_eq!(periods[2].label, "Dec-24");
        assert_eq!(periods[4].label, "Oct-24");
        assert!(periods[4].contains(date!(2024 - 10 - 01)));
        assert!(!periods[4].contains(date!(2025 - 10 - 01)));
    }

    #[test]
    fn dates_outside_all_windows_match_nothing() {
        let periods = generate_periods(date!(2025 - 03 - 15));
        let ancient = date!(2024 - 06 - 01);

        assert!(periods.iter().all(|p| !p.contains(ancient)));
    }
}
