//! Synthetic inflation-adjusted price series.
//!
//! Given a CPI series, this crate synthesizes price directives for an
//! inflation-adjusted commodity (e.g. `I-USD`) so a ledger tool can show
//! portfolio values in "real" terms. The price on the base date is 1.0 and
//! every other date is priced as `cpi / base_cpi`, rounded to two decimal
//! places half-up.
//!
//! # Example
//!
//! ```
//! use beanfeed_inflation::CpiSeries;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let mut series = CpiSeries::new();
//! series.insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), dec!(300.0));
//! series.insert(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), dec!(306.0));
//!
//! let prices = series.generate_prices(
//!     "I-USD",
//!     "USD",
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! );
//! assert_eq!(prices[0].value, dec!(1.00));
//! assert_eq!(prices[1].value, dec!(1.02));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use beanfeed_core::PricePoint;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::fmt::Write;
use thiserror::Error;

/// Errors loading CPI data.
#[derive(Debug, Error)]
pub enum InflationError {
    /// A month key is not in `YYYY-MM` form.
    #[error("invalid month key: {key}")]
    InvalidMonth {
        /// The offending key.
        key: String,
    },

    /// The CPI document could not be deserialized.
    #[error("failed to parse CPI data: {message}")]
    Parse {
        /// What went wrong.
        message: String,
    },
}

/// A CPI time series, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpiSeries {
    points: BTreeMap<NaiveDate, Decimal>,
}

impl CpiSeries {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the CPI value for a date.
    pub fn insert(&mut self, date: NaiveDate, value: Decimal) {
        self.points.insert(date, value);
    }

    /// Build a series from `YYYY-MM` month keys, pinned to the first of
    /// each month.
    pub fn from_monthly<'a, I>(entries: I) -> Result<Self, InflationError>
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut series = Self::new();
        for (key, value) in entries {
            series.insert(parse_month_key(key)?, value);
        }
        Ok(series)
    }

    /// Parse a YAML mapping of `YYYY-MM` keys to CPI values.
    pub fn from_yaml(text: &str) -> Result<Self, InflationError> {
        let raw: BTreeMap<String, Decimal> =
            serde_yaml::from_str(text).map_err(|e| InflationError::Parse {
                message: e.to_string(),
            })?;
        Self::from_monthly(raw.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// Number of data points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The CPI value for an exact date, if present.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<Decimal> {
        self.points.get(&date).copied()
    }

    /// The series date closest to `target` by absolute day distance.
    ///
    /// Ties resolve toward the earlier date (ascending scan, strict
    /// improvement required).
    #[must_use]
    pub fn nearest(&self, target: NaiveDate) -> Option<NaiveDate> {
        let mut best: Option<(NaiveDate, i64)> = None;
        for date in self.points.keys() {
            let distance = (*date - target).num_days().abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((*date, distance));
            }
        }
        best.map(|(date, _)| date)
    }

    /// Generate one price point per CPI entry, normalized so the base date
    /// prices at 1.00.
    ///
    /// A base date absent from the series snaps to the nearest present
    /// date. An empty series yields no prices.
    #[must_use]
    pub fn generate_prices(
        &self,
        commodity: &str,
        currency: &str,
        base_date: NaiveDate,
    ) -> Vec<PricePoint> {
        // An exact hit has distance zero, so nearest() covers both cases.
        let Some(base_date) = self.nearest(base_date) else {
            return Vec::new();
        };
        let base_cpi = self.points[&base_date];

        self.points
            .iter()
            .map(|(date, cpi)| {
                let mut value = (cpi / base_cpi)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                value.rescale(2);
                PricePoint::new(*date, commodity, value, currency)
            })
            .collect()
    }
}

fn parse_month_key(key: &str) -> Result<NaiveDate, InflationError> {
    let invalid = || InflationError::InvalidMonth {
        key: key.to_string(),
    };
    let (year, month) = key.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Inflation rate between two CPI readings: `(end - start) / start`,
/// rounded to four decimal places half-up. A zero start yields zero.
#[must_use]
pub fn inflation_rate(cpi_start: Decimal, cpi_end: Decimal) -> Decimal {
    if cpi_start.is_zero() {
        return Decimal::ZERO;
    }
    ((cpi_end - cpi_start) / cpi_start)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Deflate a nominal value by an inflation rate: `nominal / (1 + rate)`,
/// rounded to two decimal places half-up.
#[must_use]
pub fn adjust_for_inflation(nominal: Decimal, rate: Decimal) -> Decimal {
    (nominal / (Decimal::ONE + rate)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a complete price file: comment header, a commodity directive
/// with a display name, then one price directive per line.
#[must_use]
pub fn render_price_file(
    series: &CpiSeries,
    commodity: &str,
    currency: &str,
    base_date: NaiveDate,
) -> String {
    let prices = series.generate_prices(commodity, currency, base_date);

    let mut out = String::new();
    writeln!(out, "; Inflation-adjusted prices for {commodity}").unwrap();
    writeln!(out, "; Base date: {base_date}").unwrap();
    writeln!(out, "; Generated {} price entries", prices.len()).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "{base_date} commodity {commodity}").unwrap();
    writeln!(out, "  name: \"Inflation-adjusted {currency}\"").unwrap();
    writeln!(out).unwrap();

    for price in &prices {
        writeln!(out, "{price}").unwrap();
    }
    out
}
