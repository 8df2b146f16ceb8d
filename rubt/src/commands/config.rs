//! Config command implementation.
//!
//! Prints the effective configuration as `rubt.toml`, or writes it to a file
//! so it can be edited and passed back with `--config`.

use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Arguments for the config command.
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Write here instead of printing.
    pub write: Option<PathBuf>,
}

/// Print or save the effective configuration.
pub fn run_config<W: Write>(args: &ConfigArgs, config: &Config, out: &mut W) -> Result<()> {
    let effective = config.effective();

    match &args.write {
        Some(path) => {
            effective.save_to_path(path)?;
            tracing::info!(path = %path.display(), "wrote configuration");
        }
        None => write!(out, "{}", effective.to_toml()?)?,
    }
    Ok(())
}
