//! Canonical transaction record.
//!
//! A [`Transaction`] is the pipeline's unit of output: whatever the source
//! file looked like, the row mapper either produces a fully populated
//! transaction or fails the row. Partially populated records do not exist.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized transaction, independent of source format.
///
/// # Examples
///
/// ```
/// use beanfeed_core::Transaction;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let txn = Transaction::new(
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     "Grocery Store",
///     dec!(-45.23),
/// )
/// .with_meta("order_id", "ORD123");
///
/// assert_eq!(txn.narration, "Grocery Store");
/// assert_eq!(txn.metadata.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The calendar date the transaction occurred on.
    pub date: NaiveDate,
    /// Free-text description, copied verbatim from the source.
    pub narration: String,
    /// Exact decimal amount, sign-preserving.
    pub amount: Decimal,
    /// Extra source fields preserved verbatim, in configured order.
    pub metadata: Vec<(String, String)>,
}

impl Transaction {
    /// Create a new transaction with no metadata.
    #[must_use]
    pub fn new(date: NaiveDate, narration: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            narration: narration.into(),
            amount,
            metadata: Vec::new(),
        }
    }

    /// Append a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Look up a metadata value by key.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
