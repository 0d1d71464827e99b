//! Price directive for synthetic commodities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dated price for one commodity, quoted in a base currency.
///
/// Renders as a ledger price directive:
///
/// ```
/// use beanfeed_core::PricePoint;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let p = PricePoint::new(
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     "I-USD",
///     dec!(1.05),
///     "USD",
/// );
/// assert_eq!(p.to_string(), "2024-01-15 price I-USD 1.05 USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// The date the price applies to.
    pub date: NaiveDate,
    /// The commodity being priced (e.g. `I-USD`).
    pub commodity: String,
    /// The price value.
    pub value: Decimal,
    /// The currency the price is quoted in.
    pub currency: String,
}

impl PricePoint {
    /// Create a new price point.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        commodity: impl Into<String>,
        value: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            commodity: commodity.into(),
            value,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for PricePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} price {} {} {}",
            self.date, self.commodity, self.value, self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        let p = PricePoint::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "I-USD",
            dec!(1.02),
            "USD",
        );
        assert_eq!(p.to_string(), "2024-03-01 price I-USD 1.02 USD");
    }

    #[test]
    fn test_display_keeps_two_decimals() {
        let p = PricePoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "I-USD",
            dec!(1.00),
            "USD",
        );
        assert_eq!(p.to_string(), "2024-01-01 price I-USD 1.00 USD");
    }
}
