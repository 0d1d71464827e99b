//! Source configuration.
//!
//! Each institution is described by one YAML file mapping its export
//! columns onto the canonical transaction shape:
//!
//! ```yaml
//! institution: Chase
//! driver: csv
//! file_pattern: "chase-*.csv"
//! account: Assets:US:Chase:Checking
//! skip_header_lines: 0
//! columns:
//!   date: Date
//!   narration: Description
//!   amount: Amount
//!   meta: [order_id, trade_type]
//! ```
//!
//! Invalid shapes fail here, at the load boundary, not deep inside row
//! parsing.

use crate::error::ImportError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Source-format handler kind.
///
/// A closed set: adding a format means adding a variant and handling it
/// everywhere the compiler points. Only [`Driver::Csv`] extracts today;
/// the other two are recognized so their configs load, but the runner
/// reports them as not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// Delimited text files.
    Csv,
    /// PDF statements (not implemented).
    Pdf,
    /// Direct API pulls (not implemented).
    Api,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Api => "api",
        })
    }
}

/// Maps source header names onto canonical transaction attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnMap {
    /// Header name supplying the transaction date.
    pub date: String,
    /// Header name supplying the narration.
    pub narration: String,
    /// Header name supplying the amount.
    pub amount: String,
    /// Additional header names preserved verbatim as metadata, in order.
    #[serde(default)]
    pub meta: Vec<String>,
}

/// Configuration for one institution's source files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Institution label, used in entry headers and output naming.
    pub institution: String,
    /// Which source-format handler to use.
    pub driver: Driver,
    /// Glob pattern matching this institution's files in the data directory.
    pub file_pattern: String,
    /// Number of leading non-tabular lines before the header row.
    #[serde(default)]
    pub skip_header_lines: usize,
    /// Target account for posting lines; no posting is emitted when unset.
    #[serde(default)]
    pub account: Option<String>,
    /// Column mapping.
    pub columns: ColumnMap,
}

impl SourceConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ImportError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| ImportError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    fn validate(&self) -> Result<(), ImportError> {
        if self.institution.trim().is_empty() {
            return Err(ImportError::config("institution must not be empty"));
        }
        if self.file_pattern.trim().is_empty() {
            return Err(ImportError::config("file_pattern must not be empty"));
        }
        for (name, value) in [
            ("columns.date", &self.columns.date),
            ("columns.narration", &self.columns.narration),
            ("columns.amount", &self.columns.amount),
        ] {
            if value.trim().is_empty() {
                return Err(ImportError::config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Institution slug: lowercase, spaces replaced with underscores.
    #[must_use]
    pub fn slug(&self) -> String {
        self.institution.to_lowercase().replace(' ', "_")
    }

    /// Deterministic output file name for this institution.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}_import.bean", self.slug())
    }
}

/// Result of scanning a configuration directory.
///
/// A file that fails to parse or validate lands in `errors` and does not
/// prevent the rest from loading.
#[derive(Debug)]
pub struct ConfigScan {
    /// Successfully loaded configurations.
    pub configs: Vec<SourceConfig>,
    /// Files that failed, with the reason.
    pub errors: Vec<(PathBuf, ImportError)>,
}

/// Load every `.yaml`/`.yml` file in a directory.
///
/// Files are visited in lexicographic order so repeated runs see the same
/// sequence.
pub fn load_dir(dir: &Path) -> Result<ConfigScan, ImportError> {
    let entries = fs::read_dir(dir).map_err(|source| ImportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    paths.sort();

    let mut scan = ConfigScan {
        configs: Vec::new(),
        errors: Vec::new(),
    };
    for path in paths {
        match SourceConfig::load(&path) {
            Ok(config) => scan.configs.push(config),
            Err(e) => scan.errors.push((path, e)),
        }
    }
    Ok(scan)
}
