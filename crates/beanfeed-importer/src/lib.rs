//! Configuration-driven import pipeline for beanfeed.
//!
//! Bank and brokerage CSV exports all carry the same information under
//! different column names, date formats, and amount conventions. This crate
//! maps them onto canonical [`Transaction`](beanfeed_core::Transaction)
//! records through a declarative per-institution configuration instead of
//! one hand-written importer per bank.
//!
//! # Example
//!
//! ```
//! use beanfeed_importer::{CsvImporter, SourceConfig};
//!
//! let config = SourceConfig::from_yaml(r#"
//! institution: Chase
//! driver: csv
//! file_pattern: "chase-*.csv"
//! account: Assets:US:Chase:Checking
//! columns:
//!   date: Date
//!   narration: Description
//!   amount: Amount
//! "#)?;
//!
//! let importer = CsvImporter::new(config)?;
//! let txns = importer.parse_str("Date,Description,Amount\n2024-01-15,Coffee,-4.50\n")?;
//! assert_eq!(txns.len(), 1);
//! # Ok::<(), beanfeed_importer::ImportError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod csv_driver;
pub mod error;
pub mod normalize;

pub use config::{load_dir, ColumnMap, ConfigScan, Driver, SourceConfig};
pub use csv_driver::CsvImporter;
pub use error::ImportError;
