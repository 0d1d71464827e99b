//! beanfeed-inflation - Generate inflation-adjusted price directives.
//!
//! Reads a YAML CPI series (`YYYY-MM: value` mappings) and writes a price
//! file for a synthetic inflation-adjusted commodity.
//!
//! # Usage
//!
//! ```bash
//! beanfeed-inflation --cpi cpi-us.yaml --base-date 2023-01-01 -o inflation_usd.bean
//! ```

use anyhow::{Context, Result};
use beanfeed_inflation::{render_price_file, CpiSeries};
use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate inflation-adjusted price directives from CPI data.
#[derive(Parser, Debug)]
#[command(name = "beanfeed-inflation")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML file mapping YYYY-MM months to CPI values
    #[arg(long, value_name = "FILE")]
    cpi: PathBuf,

    /// Name of the inflation-adjusted commodity
    #[arg(long, default_value = "I-USD")]
    commodity: String,

    /// Base currency the prices are quoted in
    #[arg(short, long, default_value = "USD")]
    currency: String,

    /// Reference date priced at 1.00 (YYYY-MM-DD)
    #[arg(long)]
    base_date: NaiveDate,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Main entry point for the inflation command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let text = fs::read_to_string(&args.cpi)
        .with_context(|| format!("failed to read CPI data from {}", args.cpi.display()))?;
    let series = CpiSeries::from_yaml(&text)
        .with_context(|| format!("invalid CPI data in {}", args.cpi.display()))?;

    let rendered = render_price_file(&series, &args.commodity, &args.currency, args.base_date);

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} price entries for {} to {}",
                series.len(),
                args.commodity,
                path.display()
            );
        }
        None => {
            io::stdout().lock().write_all(rendered.as_bytes())?;
        }
    }
    Ok(())
}
