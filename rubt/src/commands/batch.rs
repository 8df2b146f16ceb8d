//! Batch command implementation.
//!
//! Reads one name per line and interns them in parallel into a single shared
//! registry, then prints table statistics.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rubric_sym::{escape, Scope, SymbolId, SymbolRegistry};
use serde::Serialize;

use crate::commands::common::{build_registry, write_json, OutputFormat, SymbolReport};
use crate::config::Config;
use crate::error::{Result, RubtError};

/// Arguments for the batch command.
#[derive(Debug, Clone)]
pub struct BatchArgs {
    /// Input file, `-` for stdin.
    pub file: PathBuf,
    /// Worker threads (default: from config).
    pub jobs: Option<usize>,
    /// Output format override.
    pub format: Option<OutputFormat>,
    /// Also print every interned symbol.
    pub dump: bool,
}

#[derive(Debug, Serialize)]
struct ScopeCount {
    scope: &'static str,
    count: usize,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    names: usize,
    unique: usize,
    records: usize,
    hits: usize,
    misses: usize,
    races: usize,
    jobs: usize,
    elapsed_ms: u128,
    scopes: Vec<ScopeCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbols: Option<Vec<SymbolReport>>,
}

/// Intern every line of the input and report.
pub fn run_batch<W: Write>(args: &BatchArgs, config: &Config, out: &mut W) -> Result<()> {
    let jobs = args.jobs.unwrap_or(config.jobs);
    if jobs == 0 {
        return Err(RubtError::Validation("jobs must be > 0".to_string()));
    }

    let content = read_input(&args.file)?;
    let names: Vec<&str> = content.lines().filter(|line| !line.is_empty()).collect();

    let registry = build_registry(config)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| RubtError::Validation(format!("cannot start {} workers: {}", jobs, e)))?;

    let start = Instant::now();
    let mut ids: Vec<SymbolId> =
        pool.install(|| names.par_iter().map(|name| registry.intern(name)).collect());
    let elapsed = start.elapsed();

    ids.sort_unstable();
    ids.dedup();

    tracing::debug!(
        names = names.len(),
        unique = ids.len(),
        jobs,
        elapsed_ms = elapsed.as_millis() as u64,
        "batch interned"
    );

    let summary = summarize(&registry, names.len(), ids.len(), jobs, elapsed.as_millis(), args.dump);

    match OutputFormat::resolve(args.format, config) {
        OutputFormat::Text => write_text(out, &summary)?,
        OutputFormat::Json => write_json(out, &summary)?,
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn summarize(
    registry: &SymbolRegistry,
    names: usize,
    unique: usize,
    jobs: usize,
    elapsed_ms: u128,
    dump: bool,
) -> BatchSummary {
    let stats = registry.stats();

    let scopes = Scope::ALL
        .iter()
        .map(|scope| ScopeCount {
            scope: scope.as_str(),
            count: stats.scope_count(*scope),
        })
        .collect();

    let symbols = dump.then(|| {
        registry
            .records()
            .into_iter()
            .filter(|record| !record.id().is_operator())
            .map(|record| {
                SymbolReport::new(record.id(), record.text(), escape::display(record.text()))
            })
            .collect()
    });

    BatchSummary {
        names,
        unique,
        records: stats.count,
        hits: stats.hits,
        misses: stats.misses,
        races: stats.races,
        jobs,
        elapsed_ms,
        scopes,
        symbols,
    }
}

fn write_text<W: Write>(out: &mut W, summary: &BatchSummary) -> Result<()> {
    writeln!(out, "names\t{}", summary.names)?;
    writeln!(out, "unique\t{}", summary.unique)?;
    writeln!(out, "records\t{}", summary.records)?;
    writeln!(out, "hits\t{}", summary.hits)?;
    writeln!(out, "misses\t{}", summary.misses)?;
    writeln!(out, "races\t{}", summary.races)?;
    writeln!(out, "jobs\t{}", summary.jobs)?;
    writeln!(out, "elapsed_ms\t{}", summary.elapsed_ms)?;
    for entry in summary.scopes.iter().filter(|entry| entry.count > 0) {
        writeln!(out, "scope.{}\t{}", entry.scope, entry.count)?;
    }

    if let Some(symbols) = &summary.symbols {
        for report in symbols {
            writeln!(out, "{}\t{}\t{}", report.id, report.scope, report.display)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn input(lines: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        file
    }

    fn run(args: &BatchArgs) -> Result<String> {
        let mut out = Vec::new();
        run_batch(args, &Config::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_counts_unique_names() {
        let file = input("foo\nbar\nfoo\n\nBaz\nbar=\n");
        let args = BatchArgs {
            file: file.path().to_path_buf(),
            jobs: Some(2),
            format: Some(OutputFormat::Text),
            dump: false,
        };

        let text = run(&args).unwrap();
        assert!(text.contains("names\t5\n"));
        assert!(text.contains("unique\t4\n"));
        assert!(text.contains("scope.constant\t1\n"));
        assert!(text.contains("scope.attrset\t1\n"));
    }

    #[test]
    fn test_dump_lists_dynamic_symbols() {
        let file = input("alpha\n@beta\n");
        let args = BatchArgs {
            file: file.path().to_path_buf(),
            jobs: Some(1),
            format: Some(OutputFormat::Json),
            dump: true,
        };

        let text = run(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let symbols = value["symbols"].as_array().unwrap();
        assert_eq!(symbols.len(), 2);
        let beta = symbols.iter().find(|s| s["text"] == "@beta").unwrap();
        assert_eq!(beta["scope"], "instance");
        assert!(symbols.iter().any(|s| s["display"] == ":alpha"));
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let file = input("x\n");
        let args = BatchArgs {
            file: file.path().to_path_buf(),
            jobs: Some(0),
            format: None,
            dump: false,
        };
        assert!(matches!(run(&args), Err(RubtError::Validation(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let args = BatchArgs {
            file: PathBuf::from("/nonexistent/names.txt"),
            jobs: Some(1),
            format: None,
            dump: false,
        };
        assert!(matches!(run(&args), Err(RubtError::Io(_))));
    }
}
