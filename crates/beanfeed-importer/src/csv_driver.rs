//! Generic CSV driver.
//!
//! Consumes a delimited text file, skips a configured number of leading
//! non-tabular lines, treats the next line as the header, and maps every
//! data row through the configured [`ColumnMap`](crate::ColumnMap) into a
//! canonical [`Transaction`].
//!
//! Parsing is restartable: the same input always yields the same sequence,
//! and nothing is cached between invocations. A single bad row aborts the
//! whole file's parse; the batch runner decides what to do with that.

use crate::config::{Driver, SourceConfig};
use crate::error::ImportError;
use crate::normalize;
use beanfeed_core::Transaction;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// CSV importer for one institution's files.
pub struct CsvImporter {
    config: SourceConfig,
}

impl CsvImporter {
    /// Create an importer from a validated configuration.
    ///
    /// Fails if the configuration names a different driver.
    pub fn new(config: SourceConfig) -> Result<Self, ImportError> {
        if config.driver != Driver::Csv {
            return Err(ImportError::config(format!(
                "invalid driver type for CSV importer: {:?}",
                config.driver
            )));
        }
        Ok(Self { config })
    }

    /// The configuration this importer was built from.
    #[must_use]
    pub const fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Parse a file into transactions.
    ///
    /// The file is read fully into memory first; institutional exports are
    /// bounded in size.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Transaction>, ImportError> {
        let content = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&content)
    }

    /// Parse in-memory content into transactions.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Transaction>, ImportError> {
        let lines: Vec<&str> = content.lines().collect();

        // Line `skip_header_lines` (0-indexed) is the header row. Skipping
        // past the end of the file is defined as an empty import, not an
        // error.
        if self.config.skip_header_lines >= lines.len() {
            return Ok(Vec::new());
        }
        let tabular = lines[self.config.skip_header_lines..].join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(tabular.as_bytes());

        // Header order defines field names; rows may be shorter or longer
        // than the header.
        let headers: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect();

        let mut transactions = Vec::new();
        for record in reader.records() {
            let record = record?;
            transactions.push(self.map_row(&record, &headers)?);
        }
        Ok(transactions)
    }

    /// Map one raw row onto a canonical transaction.
    ///
    /// Normalizer errors propagate unchanged so the caller sees the exact
    /// offending value. Metadata is best-effort: configured fields absent
    /// from the row are skipped, not errors.
    fn map_row(
        &self,
        record: &csv::StringRecord,
        headers: &HashMap<String, usize>,
    ) -> Result<Transaction, ImportError> {
        let columns = &self.config.columns;

        let date = normalize::parse_date(field(record, headers, &columns.date)?)?;
        let narration = field(record, headers, &columns.narration)?;
        let amount = normalize::parse_amount(field(record, headers, &columns.amount)?)?;

        let mut txn = Transaction::new(date, narration, amount);
        for key in &columns.meta {
            if let Some(value) = headers.get(key).and_then(|i| record.get(*i)) {
                txn = txn.with_meta(key.clone(), value);
            }
        }
        Ok(txn)
    }
}

/// Look up a configured field in a row, by header name.
fn field<'a>(
    record: &'a csv::StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, ImportError> {
    headers
        .get(name)
        .and_then(|i| record.get(*i))
        .ok_or_else(|| ImportError::MissingColumn {
            field: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn chase() -> CsvImporter {
        let config = SourceConfig::from_yaml(
            r#"
institution: Chase
driver: csv
file_pattern: "chase-*.csv"
account: Assets:US:Chase:Checking
columns:
  date: Date
  narration: Description
  amount: Amount
"#,
        )
        .unwrap();
        CsvImporter::new(config).unwrap()
    }

    #[test]
    fn test_parse_simple_file() {
        let content = "Date,Description,Amount\n\
                       2024-01-15,Grocery Store,-45.23\n\
                       2024-01-16,Salary Deposit,2500.00\n\
                       2024-01-17,Gas Station,-35.50\n";

        let txns = chase().parse_str(content).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(
            txns[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(txns[0].narration, "Grocery Store");
        assert_eq!(txns[0].amount, dec!(-45.23));
        assert_eq!(txns[1].amount, dec!(2500.00));
        assert_eq!(txns[2].amount, dec!(-35.50));
    }

    #[test]
    fn test_header_only_is_empty() {
        let txns = chase().parse_str("Date,Description,Amount\n").unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_skip_header_lines() {
        let config = SourceConfig::from_yaml(
            r#"
institution: TestBank
driver: csv
file_pattern: "*.csv"
skip_header_lines: 2
columns:
  date: Date
  narration: Description
  amount: Amount
"#,
        )
        .unwrap();
        let importer = CsvImporter::new(config).unwrap();

        let content = "Account Statement\n\
                       Report Date: 2024-01-31\n\
                       Date,Description,Amount\n\
                       2024-01-15,Test Transaction,100.00\n";
        let txns = importer.parse_str(content).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].narration, "Test Transaction");
    }

    #[test]
    fn test_skip_past_end_of_file_is_empty() {
        let config = SourceConfig::from_yaml(
            r#"
institution: TestBank
driver: csv
file_pattern: "*.csv"
skip_header_lines: 10
columns:
  date: Date
  narration: Description
  amount: Amount
"#,
        )
        .unwrap();
        let importer = CsvImporter::new(config).unwrap();
        let txns = importer.parse_str("Date,Description,Amount\nonly,two,lines\n").unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_metadata_columns() {
        let config = SourceConfig::from_yaml(
            r#"
institution: Zerodha
driver: csv
file_pattern: "tradebook-*.csv"
columns:
  date: trade_date
  narration: symbol
  amount: net_amount
  meta: [order_id, trade_type]
"#,
        )
        .unwrap();
        let importer = CsvImporter::new(config).unwrap();

        let content = "trade_date,symbol,net_amount,order_id,trade_type\n\
                       2024-01-10,RELIANCE,-15000.50,ORD123,BUY\n\
                       2024-01-11,TCS,8500.00,ORD124,SELL\n";
        let txns = importer.parse_str(content).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].narration, "RELIANCE");
        assert_eq!(
            txns[0].metadata,
            vec![
                ("order_id".to_string(), "ORD123".to_string()),
                ("trade_type".to_string(), "BUY".to_string()),
            ]
        );
        assert_eq!(txns[1].meta("trade_type"), Some("SELL"));
    }

    #[test]
    fn test_absent_meta_field_skipped() {
        let config = SourceConfig::from_yaml(
            r#"
institution: Zerodha
driver: csv
file_pattern: "*.csv"
columns:
  date: Date
  narration: Description
  amount: Amount
  meta: [order_id]
"#,
        )
        .unwrap();
        let importer = CsvImporter::new(config).unwrap();
        let txns = importer
            .parse_str("Date,Description,Amount\n2024-01-15,Coffee,-4.50\n")
            .unwrap();
        assert!(txns[0].metadata.is_empty());
    }

    #[test]
    fn test_missing_mapped_column_aborts() {
        let content = "Date,Description\n2024-01-15,Grocery Store\n";
        let err = chase().parse_str(content).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { field } if field == "Amount"));
    }

    #[test]
    fn test_surplus_fields_ignored() {
        let content = "Date,Description,Amount\n2024-01-15,Coffee,-4.50,extra,columns\n";
        let txns = chase().parse_str(content).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, dec!(-4.50));
    }

    #[test]
    fn test_bad_row_aborts_whole_file() {
        let content = "Date,Description,Amount\n\
                       2024-01-15,Good Row,-45.23\n\
                       not-a-date,Bad Row,10.00\n\
                       2024-01-17,Never Reached,-35.50\n";
        let err = chase().parse_str(content).unwrap_err();
        assert!(matches!(err, ImportError::DateFormat { value } if value == "not-a-date"));
    }

    #[test]
    fn test_bad_amount_propagates_value() {
        let content = "Date,Description,Amount\n2024-01-15,Coffee,N/A\n";
        let err = chase().parse_str(content).unwrap_err();
        assert!(matches!(err, ImportError::AmountFormat { value } if value == "N/A"));
    }

    #[test]
    fn test_reparse_is_identical() {
        let content = "Date,Description,Amount\n\
                       2024-01-15,Grocery Store,-45.23\n\
                       2024-01-16,Salary Deposit,2500.00\n";
        let importer = chase();
        let first = importer.parse_str(content).unwrap();
        let second = importer.parse_str(content).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_accessor_exposes_source() {
        let importer = chase();
        assert_eq!(importer.config().institution, "Chase");
        assert_eq!(importer.config().file_pattern, "chase-*.csv");
    }

    #[test]
    fn test_wrong_driver_rejected() {
        let config = SourceConfig::from_yaml(
            r#"
institution: TestBank
driver: pdf
file_pattern: "*.pdf"
columns:
  date: Date
  narration: Description
  amount: Amount
"#,
        )
        .unwrap();
        assert!(matches!(
            CsvImporter::new(config),
            Err(ImportError::Configuration { .. })
        ));
    }
}
