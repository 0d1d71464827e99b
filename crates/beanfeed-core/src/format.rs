//! Ledger text rendering.
//!
//! Serializes [`Transaction`] records into plain-text ledger entries for
//! external tools to consume. One entry is a header line, at most one
//! posting line, and one comment line per metadata entry:
//!
//! ```text
//! 2024-01-15 * "Chase" "Grocery Store"
//!   Assets:US:Chase:Checking  -45.23 USD
//!   ; order_id: ORD123
//! ```
//!
//! Narrations are rendered verbatim; no escaping or trimming is applied.
//! Account names are not validated here, that is the downstream ledger
//! tool's job.

use crate::Transaction;
use std::fmt::Write;

/// Default currency code for posting lines.
///
/// The source files carry no currency column, so the code is fixed per
/// render call rather than per transaction. Known limitation.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Format a single transaction as a ledger entry.
///
/// The posting line is emitted only when `account` is configured.
pub fn format_entry(
    txn: &Transaction,
    institution: &str,
    account: Option<&str>,
    currency: &str,
) -> String {
    let mut out = String::new();

    write!(
        out,
        "{} * \"{}\" \"{}\"",
        txn.date, institution, txn.narration
    )
    .unwrap();

    if let Some(account) = account {
        write!(out, "\n  {}  {} {}", account, txn.amount, currency).unwrap();
    }

    for (key, value) in &txn.metadata {
        write!(out, "\n  ; {key}: {value}").unwrap();
    }

    out
}

/// Render a whole import file for one institution.
///
/// The file begins with two comment lines (source institution and
/// transaction count), then one entry per transaction separated by a blank
/// line.
pub fn render_import_file(
    transactions: &[Transaction],
    institution: &str,
    account: Option<&str>,
    currency: &str,
) -> String {
    let mut out = String::new();

    writeln!(out, "; Imported transactions from {institution}").unwrap();
    writeln!(out, "; Total transactions: {}", transactions.len()).unwrap();
    writeln!(out).unwrap();

    for txn in transactions {
        out.push_str(&format_entry(txn, institution, account, currency));
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn grocery() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Grocery Store",
            dec!(-45.23),
        )
    }

    #[test]
    fn test_header_and_posting() {
        let entry = format_entry(
            &grocery(),
            "Chase",
            Some("Assets:US:Chase:Checking"),
            DEFAULT_CURRENCY,
        );
        let mut lines = entry.lines();
        assert_eq!(
            lines.next().unwrap(),
            "2024-01-15 * \"Chase\" \"Grocery Store\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "  Assets:US:Chase:Checking  -45.23 USD"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_no_account_no_posting() {
        let entry = format_entry(&grocery(), "Chase", None, DEFAULT_CURRENCY);
        assert_eq!(entry.lines().count(), 1);
        assert!(!entry.contains("USD"));
    }

    #[test]
    fn test_metadata_comments_in_order() {
        let txn = grocery()
            .with_meta("order_id", "ORD123")
            .with_meta("trade_type", "BUY");
        let entry = format_entry(&txn, "Zerodha", None, DEFAULT_CURRENCY);
        let lines: Vec<_> = entry.lines().collect();
        assert_eq!(lines[1], "  ; order_id: ORD123");
        assert_eq!(lines[2], "  ; trade_type: BUY");
    }

    #[test]
    fn test_render_import_file() {
        let txns = vec![
            grocery(),
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Salary Deposit",
                dec!(2500.00),
            ),
        ];
        let text = render_import_file(&txns, "Chase", Some("Assets:US:Chase:Checking"), "USD");

        assert!(text.starts_with("; Imported transactions from Chase\n; Total transactions: 2\n\n"));
        assert!(text.contains("2024-01-15 * \"Chase\" \"Grocery Store\""));
        assert!(text.contains("  Assets:US:Chase:Checking  2500.00 USD"));
        // Entries are separated by a blank line.
        assert!(text.contains("USD\n\n2024-01-16"));
    }

    #[test]
    fn test_render_empty_file() {
        let text = render_import_file(&[], "Chase", None, "USD");
        assert_eq!(
            text,
            "; Imported transactions from Chase\n; Total transactions: 0\n\n"
        );
    }
}
