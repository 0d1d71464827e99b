//! File-pattern matching for source files.
//!
//! Institution configs name their files with a small glob dialect (`*` and
//! `?`). Patterns are compiled to anchored regexes and matched against file
//! names in the data directory; matches come back sorted so a run is
//! deterministic.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Compile a glob pattern into an anchored regex.
///
/// `*` matches any run of characters, `?` a single character; everything
/// else is literal.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            c => expr.push_str(&regex::escape(&c.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).with_context(|| format!("invalid file pattern: {pattern}"))
}

/// Find files in `data_dir` whose names match `pattern`, sorted by path.
pub fn find_matching_files(data_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let regex = compile_pattern(pattern)?;

    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("failed to read data directory {}", data_dir.display()))?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| regex.is_match(name))
        })
        .collect();
    matches.sort();
    Ok(matches)
}
