//! Value normalizers for raw row fields.
//!
//! Bank exports disagree on how to write dates and money. These functions
//! fold the accepted representations into exact values; anything outside
//! them is a hard error carrying the offending string.

use crate::error::ImportError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Accepted date patterns, tried in this order. The first match wins.
///
/// Several patterns are structurally ambiguous (`03/04/2024` parses under
/// both slash forms), so the ordering is a policy decision, not a
/// fallback chain: US month-first beats day-first.
pub const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%m-%d-%Y",
];

/// Currency symbols stripped before decimal parsing.
const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '₹'];

/// Parse a date string against [`DATE_FORMATS`], first match wins.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ImportError> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    Err(ImportError::DateFormat {
        value: raw.to_string(),
    })
}

/// Parse a currency-formatted string into an exact decimal.
///
/// Strips currency symbols, thousands-separator commas, and whitespace,
/// then treats an enclosing parenthesis pair as negation (accounting
/// convention: `(45.23)` is `-45.23`). Whatever remains must parse as a
/// decimal in full.
pub fn parse_amount(raw: &str) -> Result<Decimal, ImportError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    let (negated, digits) = if cleaned.len() >= 2 && cleaned.starts_with('(') && cleaned.ends_with(')')
    {
        (true, &cleaned[1..cleaned.len() - 1])
    } else {
        (false, cleaned.as_str())
    };

    // Inside parentheses the accounting form supplies the sign; an
    // explicit sign on top of that is a malformed value, not double
    // negation.
    if negated && !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(ImportError::AmountFormat {
            value: raw.to_string(),
        });
    }

    let value = Decimal::from_str(digits).map_err(|_| ImportError::AmountFormat {
        value: raw.to_string(),
    })?;

    Ok(if negated { -value } else { value })
}
