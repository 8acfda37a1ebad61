//! Calendar helpers and display formatting for dates.
//!
//! Formatting here is deliberately locale-free: month names come from a
//! fixed table of English three-letter abbreviations so that report labels
//! are stable regardless of the host system's locale settings.

use time::{Date, Month};

/// Renders `date` using a small pattern language.
///
/// Supported tokens: `dd` (zero-padded day), `MM` (zero-padded month),
/// `yyyy` (four-digit year), `yy` (two-digit year). Any other characters
/// pass through unchanged.
pub fn format_date(date: Date, pattern: &str) -> String {
    let day = format!("{:02}", date.day());
    let month = format!("{:02}", month_number(date.month()));
    let year = date.year().to_string();
    let short_year = two_digit_year(date);

    // `yyyy` must be replaced before `yy` so a four-digit pattern is not
    // consumed as two two-digit tokens.
    pattern
        .replace("dd", &day)
        .replace("MM", &month)
        .replace("yyyy", &year)
        .replace("yy", &short_year)
}

/// Renders a month as `"Mar-25"`: three-letter English abbreviation plus a
/// two-digit year.
pub fn format_month_year(date: Date) -> String {
    format!("{}-{}", month_abbrev(date.month()), two_digit_year(date))
}

/// The fixed three-letter English abbreviation for a month.
pub fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// The calendar month immediately before the given (year, month).
pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        _ => (year, month.previous()),
    }
}

/// Steps back `count` calendar months from the given (year, month).
pub fn months_back(year: i32, month: Month, count: u32) -> (i32, Month) {
    let mut current = (year, month);
    for _ in 0..count {
        current = previous_month(current.0, current.1);
    }
    current
}

/// The inclusive date range covering one calendar month.
pub fn month_range(year: i32, month: Month) -> std::ops::RangeInclusive<Date> {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    start..=end
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub(crate) fn month_number(month: Month) -> u8 {
    match month {
        Month::January => 1,
        Month::February => 2,
        Month::March => 3,
        Month::April => 4,
        Month::May => 5,
        Month::June => 6,
        Month::July => 7,
        Month::August => 8,
        Month::September => 9,
        Month::October => 10,
        Month::November => 11,
        Month::December => 12,
    }
}

fn two_digit_year(date: Date) -> String {
    let year = date.year().to_string();
    year[year.len().saturating_sub(2)..].to_owned()
}
