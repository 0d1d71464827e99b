//! Core types for beanfeed.
//!
//! This crate defines the canonical records that flow through the ingestion
//! pipeline, independent of any source format:
//!
//! - [`Transaction`]: a normalized transaction (date, narration, exact
//!   decimal amount, ordered metadata)
//! - [`PricePoint`]: a dated price for a synthetic commodity
//! - [`format`]: rendering of both into plain-text ledger entries
//!
//! Amounts are always [`rust_decimal::Decimal`]; binary floating point never
//! appears in monetary values.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod format;
pub mod price;
pub mod transaction;

pub use price::PricePoint;
pub use transaction::Transaction;
