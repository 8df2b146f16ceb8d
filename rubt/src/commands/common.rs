//! Common types and utilities for rubt commands.

use std::io::Write;

use clap::ValueEnum;
use rubric_sym::{SymbolId, SymbolRegistry};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;

// ============================================================================
// Output Format
// ============================================================================

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated lines
    #[default]
    Text,
    /// A single JSON document
    Json,
}

impl OutputFormat {
    /// Command-line choice, falling back to the configured default.
    pub fn resolve(flag: Option<Self>, config: &Config) -> Self {
        flag.unwrap_or(config.format)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// One interned name, as printed by `intern` and `batch --dump`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SymbolReport {
    pub id: u64,
    pub scope: &'static str,
    pub text: String,
    pub display: String,
}

impl SymbolReport {
    pub fn new(id: SymbolId, text: &str, display: String) -> Self {
        Self {
            id: id.as_u64(),
            scope: id.scope().as_str(),
            text: text.to_string(),
            display,
        }
    }
}

/// Build a registry from the effective configuration.
pub fn build_registry(config: &Config) -> Result<SymbolRegistry> {
    let registry = SymbolRegistry::init(config.registry_config())?;
    Ok(registry)
}

/// Print `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
