//! Utility functions for money parsing and formatting
//!
//! This module provides the single place where brokerage money text is turned
//! into `Decimal` values and where `Decimal` values are turned back into
//! display strings, so every table and summary line agrees on the format.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "$" prefix
    Usd,
    /// No currency symbol (for table cells already labelled with "($)")
    None,
}

/// Parse a brokerage money cell such as `+$50.00`, `-$3.10` or `12.5`.
///
/// Only `$` and `+` are stripped; anything else that is not a plain number
/// (blank cells, `--`, `n/a`) yields `None` rather than an error.
///
/// # Examples
/// ```
/// use dividend_report::utils::parse_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_money("+$50.00"), Some(dec!(50.00)));
/// assert_eq!(parse_money("-$1.25"), Some(dec!(-1.25)));
/// assert_eq!(parse_money("--"), None);
/// ```
pub fn parse_money(text: &str) -> Option<Decimal> {
    let cleaned = text.replace(['$', '+'], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal value using US conventions:
/// - Thousands separator: `,` (comma)
/// - Decimal separator: `.` (period)
///
/// # Arguments
/// * `value` - The decimal value to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
/// * `symbol` - Whether to include currency symbol
///
/// # Examples
/// ```
/// use dividend_report::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::Usd),
///     "$1,234.56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 12, CurrencySymbol::None),
///     "    1,234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = value.round_dp(2);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    // Add thousands separators (,) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::Usd => "$",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{}.{}", sign, prefix, with_separators, decimal_part);

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as dollars with symbol: "$1,234.56", "-$500.00"
///
/// # Examples
/// ```
/// use dividend_report::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "$1,234.56");
/// assert_eq!(format_currency(dec!(-500)), "-$500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Usd)
}

/// Format number only (no symbol): "1,234.56"
pub fn format_amount(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}

/// Format an optional amount, "N/A" when absent.
pub fn format_optional_amount(value: Option<Decimal>) -> String {
    value
        .map(format_amount)
        .unwrap_or_else(|| "N/A".to_string())
}
