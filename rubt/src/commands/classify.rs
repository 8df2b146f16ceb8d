//! Classify command implementation.

use std::io::Write;

use rubric_sym::classify::classify;
use serde::Serialize;

use crate::commands::common::{write_json, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the classify command.
#[derive(Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Names to classify.
    pub names: Vec<String>,
    /// Output format override.
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct Classified<'a> {
    text: &'a str,
    scope: &'static str,
}

/// Print the scope of every name.
pub fn run_classify<W: Write>(args: &ClassifyArgs, config: &Config, out: &mut W) -> Result<()> {
    let classified: Vec<_> = args
        .names
        .iter()
        .map(|name| Classified {
            text: name,
            scope: classify(name).as_str(),
        })
        .collect();

    match OutputFormat::resolve(args.format, config) {
        OutputFormat::Text => {
            for entry in &classified {
                writeln!(out, "{}\t{}", entry.scope, entry.text)?;
            }
        }
        OutputFormat::Json => write_json(out, &classified)?,
    }
    Ok(())
}
