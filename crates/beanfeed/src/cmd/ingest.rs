//! beanfeed-ingest - Run every configured institution's imports.
//!
//! Scans a directory of YAML institution configs, matches each config's
//! `file_pattern` against the data directory, parses the matching files,
//! and writes one ledger file per institution into the output directory.
//!
//! # Usage
//!
//! ```bash
//! beanfeed-ingest --config-dir ingestion/config --data-dir data --output-dir ledger/includes
//! ```
//!
//! Failures stay local: a config that does not validate skips that
//! institution, a file that does not parse skips that file. Both land in
//! the run report rather than stopping the batch.

use crate::matcher::find_matching_files;
use crate::report::RunReport;
use anyhow::{Context, Result};
use beanfeed_core::format::{render_import_file, DEFAULT_CURRENCY};
use beanfeed_importer::{load_dir, CsvImporter, Driver, SourceConfig};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Import financial data files into ledger text.
#[derive(Parser, Debug)]
#[command(name = "beanfeed-ingest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing YAML institution configurations
    #[arg(long, default_value = "ingestion/config")]
    config_dir: PathBuf,

    /// Directory containing source data files to import
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory to write ledger output files
    #[arg(long, default_value = "ledger/includes")]
    output_dir: PathBuf,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point for the ingest command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match run(&args.config_dir, &args.data_dir, &args.output_dir) {
        Ok(report) => {
            print!("{report}");
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the whole batch and return its report.
///
/// Only a missing config directory is fatal; everything else is recorded
/// in the report and the batch continues.
pub fn run(config_dir: &Path, data_dir: &Path, output_dir: &Path) -> Result<RunReport> {
    let scan = load_dir(config_dir)
        .with_context(|| format!("failed to load configurations from {}", config_dir.display()))?;
    info!(
        configs = scan.configs.len(),
        failed = scan.errors.len(),
        "loaded configurations"
    );

    let mut report = RunReport::new();
    for (path, error) in scan.errors {
        warn!(path = %path.display(), %error, "skipping configuration");
        report.record_error(path.display().to_string(), error);
    }

    for config in scan.configs {
        match config.driver {
            Driver::Csv => process_csv(config, data_dir, output_dir, &mut report),
            Driver::Pdf | Driver::Api => {
                warn!(
                    institution = %config.institution,
                    driver = %config.driver,
                    "driver not implemented, skipping"
                );
                report.skipped.push((config.institution, config.driver));
            }
        }
    }

    Ok(report)
}

/// Process one CSV-driven institution end to end.
fn process_csv(config: SourceConfig, data_dir: &Path, output_dir: &Path, report: &mut RunReport) {
    let institution = config.institution.clone();

    let importer = match CsvImporter::new(config) {
        Ok(importer) => importer,
        Err(e) => {
            report.record_error(&institution, e);
            return;
        }
    };
    let config = importer.config();

    let files = match find_matching_files(data_dir, &config.file_pattern) {
        Ok(files) => files,
        Err(e) => {
            report.record_error(&institution, format!("{e:#}"));
            return;
        }
    };
    report.sources_processed += 1;

    if files.is_empty() {
        info!(%institution, pattern = %config.file_pattern, "no matching files");
        return;
    }

    let mut transactions = Vec::new();
    for file in &files {
        match importer.parse_file(file) {
            Ok(mut txns) => {
                debug!(file = %file.display(), count = txns.len(), "parsed");
                report.files_parsed += 1;
                transactions.append(&mut txns);
            }
            // A bad row aborts its file; the rest of the batch goes on.
            Err(e) => report.record_error(file.display().to_string(), e),
        }
    }

    if transactions.is_empty() {
        return;
    }

    let text = render_import_file(
        &transactions,
        &institution,
        config.account.as_deref(),
        DEFAULT_CURRENCY,
    );
    match write_output(output_dir, &config.output_file_name(), &text) {
        Ok(path) => {
            info!(%institution, path = %path.display(), count = transactions.len(), "wrote output");
            report.transactions_written += transactions.len();
            report.output_files.push(path);
        }
        Err(e) => report.record_error(&institution, format!("{e:#}")),
    }
}

fn write_output(output_dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let path = output_dir.join(file_name);
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
