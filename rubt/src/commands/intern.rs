//! Intern command implementation.
//!
//! Interns each name into a fresh registry and prints its ID, scope and
//! literal form.

use std::io::Write;

use crate::commands::common::{build_registry, write_json, OutputFormat, SymbolReport};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the intern command.
#[derive(Debug, Clone, Default)]
pub struct InternArgs {
    /// Names to intern, in order.
    pub names: Vec<String>,
    /// Output format override.
    pub format: Option<OutputFormat>,
}

/// Intern every name and print one report per name.
pub fn run_intern<W: Write>(args: &InternArgs, config: &Config, out: &mut W) -> Result<()> {
    let registry = build_registry(config)?;

    let reports = args
        .names
        .iter()
        .map(|name| {
            let id = registry.intern(name);
            Ok(SymbolReport::new(id, name, registry.display_id(id)?))
        })
        .collect::<Result<Vec<_>>>()?;

    match OutputFormat::resolve(args.format, config) {
        OutputFormat::Text => {
            for report in &reports {
                writeln!(out, "{}\t{}\t{}", report.id, report.scope, report.display)?;
            }
        }
        OutputFormat::Json => write_json(out, &reports)?,
    }
    Ok(())
}
