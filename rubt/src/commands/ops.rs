//! Ops command implementation.
//!
//! Lists the operator tokens every registry starts with.

use std::io::Write;

use rubric_sym::escape;
use rubric_sym::symbol::OPERATOR_TOKENS;
use serde::Serialize;

use crate::commands::common::{write_json, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the ops command.
#[derive(Debug, Clone, Default)]
pub struct OpsArgs {
    /// Output format override.
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct TokenRow {
    id: u64,
    text: &'static str,
    display: String,
}

/// Print every bootstrap token with its reserved ID.
pub fn run_ops<W: Write>(args: &OpsArgs, config: &Config, out: &mut W) -> Result<()> {
    let rows: Vec<_> = OPERATOR_TOKENS
        .iter()
        .map(|token| TokenRow {
            id: token.id().as_u64(),
            text: token.text(),
            display: escape::display(token.text()),
        })
        .collect();

    match OutputFormat::resolve(args.format, config) {
        OutputFormat::Text => {
            for row in &rows {
                writeln!(out, "{}\t{}", row.id, row.display)?;
            }
        }
        OutputFormat::Json => write_json(out, &rows)?,
    }
    Ok(())
}
