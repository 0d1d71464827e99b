//! Beanfeed CLI tools.
//!
//! This crate provides the command-line surface over the beanfeed library
//! crates:
//!
//! - `beanfeed-ingest`: run every configured institution's CSV imports and
//!   write one ledger file per institution
//! - `beanfeed-inflation`: synthesize inflation-adjusted price directives
//!   from a CPI series
//!
//! # Example Usage
//!
//! ```bash
//! beanfeed-ingest --config-dir ingestion/config --data-dir data --output-dir ledger/includes
//! beanfeed-inflation --cpi cpi-us.yaml --commodity I-USD --base-date 2023-01-01
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod matcher;
pub mod report;
