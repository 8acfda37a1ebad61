//! Parsing and display formatting for monetary amounts.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::Error;

/// Parses a monetary amount from text that may carry currency symbols,
/// grouping separators, or surrounding whitespace.
///
/// All characters other than digits, `.` and `-` are stripped before
/// parsing, so `"$1,234.50"` and `"1234.5"` both parse to `1234.5`.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the stripped string contains no digits
/// or does not form a valid decimal number.
pub fn parse_amount(value: &str) -> Result<f64, Error> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if !cleaned.bytes().any(|byte| byte.is_ascii_digit()) {
        return Err(Error::InvalidAmount(value.to_owned()));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::InvalidAmount(value.to_owned()))
}

/// Formats the absolute value of `amount` as a currency string with two
/// decimal places and thousands grouping, e.g. `"$1,234.50"`.
///
/// The sign is never part of the string. Callers decide how to present
/// negativity (color, a leading minus, parentheses).
pub fn format_currency(amount: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let amount = amount.abs();

    let mut formatted_string = if amount > 0.0 {
        fmt.fmt_string(amount)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{format_currency, parse_amount};

    #[test]
    fn parse_amount_accepts_plain_decimal() {
        assert_eq!(parse_amount("1234.5").unwrap(), 1234.5);
    }

    #[test]
    fn parse_amount_strips_currency_symbols_and_separators() {
        assert_eq!(parse_amount("$1,234.50").unwrap(), 1234.5);
        assert_eq!(parse_amount(" 99 ").unwrap(), 99.0);
    }

    #[test]
    fn parse_amount_keeps_sign() {
        assert_eq!(parse_amount("-42.25").unwrap(), -42.25);
    }

    #[test]
    fn parse_amount_rejects_text_without_digits() {
        assert_eq!(
            parse_amount("abc"),
            Err(Error::InvalidAmount("abc".to_owned()))
        );
        assert_eq!(parse_amount(""), Err(Error::InvalidAmount("".to_owned())));
        assert_eq!(
            parse_amount("$-."),
            Err(Error::InvalidAmount("$-.".to_owned()))
        );
    }

    #[test]
    fn parse_amount_rejects_malformed_decimals() {
        assert_eq!(
            parse_amount("1.2.3"),
            Err(Error::InvalidAmount("1.2.3".to_owned()))
        );
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(1234567.89), "$1,234,567.89");
    }

    #[test]
    fn format_currency_pads_to_two_decimals() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(5.0), "$5.00");
    }

    #[test]
    fn format_currency_drops_the_sign() {
        assert_eq!(format_currency(-250.75), "$250.75");
    }

    #[test]
    fn format_currency_renders_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
    }
}
