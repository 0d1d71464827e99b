//! Structured run outcome.
//!
//! The batch runner returns a [`RunReport`] instead of printing as it goes,
//! so the binary decides how (and whether) to render progress. Tests run
//! the whole batch silently and assert on the report.

use beanfeed_importer::Driver;
use std::fmt;
use std::path::PathBuf;

/// One failure during a batch run, attributed to its source.
#[derive(Debug, Clone)]
pub struct RunError {
    /// What failed: a config file name, an institution, or a data file.
    pub source: String,
    /// Human-readable reason.
    pub message: String,
}

/// Aggregated outcome of one batch ingestion run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Institutions whose configuration loaded and was processed.
    pub sources_processed: usize,
    /// Data files parsed successfully.
    pub files_parsed: usize,
    /// Transactions written across all output files.
    pub transactions_written: usize,
    /// Output files written, in order.
    pub output_files: Vec<PathBuf>,
    /// Institutions whose configured driver has no implementation yet.
    pub skipped: Vec<(String, Driver)>,
    /// Everything that went wrong, without having stopped the batch.
    pub errors: Vec<RunError>,
}

impl RunReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure attributed to `source`.
    pub fn record_error(&mut self, source: impl Into<String>, message: impl fmt::Display) {
        self.errors.push(RunError {
            source: source.into(),
            message: message.to_string(),
        });
    }

    /// Whether the run completed without any per-source failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} source(s) processed, {} file(s) parsed, {} transaction(s) written",
            self.sources_processed, self.files_parsed, self.transactions_written
        )?;
        for path in &self.output_files {
            writeln!(f, "  wrote {}", path.display())?;
        }
        for (institution, driver) in &self.skipped {
            writeln!(f, "  skipped {institution}: {driver} driver not implemented")?;
        }
        if !self.errors.is_empty() {
            writeln!(f, "{} error(s):", self.errors.len())?;
            for error in &self.errors {
                writeln!(f, "  {}: {}", error.source, error.message)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let mut report = RunReport::new();
        report.sources_processed = 2;
        report.files_parsed = 3;
        report.transactions_written = 40;
        assert!(report.is_clean());
        let text = report.to_string();
        assert!(text.contains("2 source(s) processed"));
        assert!(text.contains("40 transaction(s) written"));
        assert!(!text.contains("error"));
    }

    #[test]
    fn test_skipped_institutions_listed() {
        let mut report = RunReport::new();
        report.skipped.push(("Broker".to_string(), Driver::Pdf));
        assert!(report.is_clean());
        assert!(report
            .to_string()
            .contains("skipped Broker: pdf driver not implemented"));
    }

    #[test]
    fn test_errors_listed_with_source() {
        let mut report = RunReport::new();
        report.record_error("chase.yaml", "invalid configuration: missing field `columns`");
        assert!(!report.is_clean());
        let text = report.to_string();
        assert!(text.contains("1 error(s):"));
        assert!(text.contains("chase.yaml: invalid configuration"));
    }
}
