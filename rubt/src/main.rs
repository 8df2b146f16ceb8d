//! Rubt CLI - inspect how the Rubric runtime interns and prints symbols.
//!
//! This is the main entry point for the rubt CLI application.
//! It uses clap for argument parsing and dispatches to the command handlers
//! in [`commands`].

mod commands;
mod config;
mod error;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::common::OutputFormat;
use commands::{
    run_batch, run_classify, run_config, run_inspect, run_intern, run_ops, BatchArgs,
    ClassifyArgs, ConfigArgs, InspectArgs, InternArgs, OpsArgs,
};
use config::Config;
use error::{Result, RubtError};

/// Rubt - symbol interning toolbox
#[derive(Parser, Debug)]
#[command(name = "rubt")]
#[command(author = "Rubric Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Intern, classify and print Rubric symbols", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "RUBT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RUBT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "RUBT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the rubt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Intern names and print `id scope literal` for each
    Intern(NamesCommand),

    /// Print the symbol literal form of each name
    Inspect(NamesCommand),

    /// Print the lexical scope of each name
    Classify(NamesCommand),

    /// Intern a file of names (one per line) in parallel and print statistics
    Batch(BatchCommand),

    /// List the bootstrap operator tokens and their reserved IDs
    Ops(OpsCommand),

    /// Print the effective configuration as rubt.toml
    Config(ConfigCommand),
}

/// Arguments shared by the per-name subcommands.
#[derive(Parser, Debug)]
struct NamesCommand {
    /// Names to process
    #[arg(required = true)]
    names: Vec<String>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

/// Arguments for the batch subcommand.
#[derive(Parser, Debug)]
struct BatchCommand {
    /// File with one name per line, `-` for stdin
    file: PathBuf,

    /// Number of worker threads (default: from config)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print every interned symbol after the statistics
    #[arg(long)]
    dump: bool,
}

/// Arguments for the ops subcommand.
#[derive(Parser, Debug)]
struct OpsCommand {
    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

/// Arguments for the config subcommand.
#[derive(Parser, Debug)]
struct ConfigCommand {
    /// Write the configuration to this file instead of stdout
    #[arg(short, long)]
    write: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, source) =
        load_config(cli.config.as_deref()).context("failed to load configuration")?;

    init_logging(cli.verbose || config.verbose, cli.no_color)?;
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded configuration"),
        None => tracing::debug!("no configuration file, using defaults"),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command(cli.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Initialize the logging system.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| RubtError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Also returns the file that was read, so it can be logged once logging is
/// up.
fn load_config(config_path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match config_path.map(Path::to_path_buf).or_else(Config::locate) {
        Some(path) => Ok((Config::load_from_path(&path)?, Some(path))),
        None => Ok((Config::default(), None)),
    }
}

/// Execute the selected command.
fn execute_command<W: Write>(command: Commands, config: &Config, out: &mut W) -> Result<()> {
    match command {
        Commands::Intern(args) => run_intern(
            &InternArgs {
                names: args.names,
                format: args.format,
            },
            config,
            out,
        ),
        Commands::Inspect(args) => run_inspect(
            &InspectArgs {
                names: args.names,
                format: args.format,
            },
            config,
            out,
        ),
        Commands::Classify(args) => run_classify(
            &ClassifyArgs {
                names: args.names,
                format: args.format,
            },
            config,
            out,
        ),
        Commands::Batch(args) => run_batch(
            &BatchArgs {
                file: args.file,
                jobs: args.jobs,
                format: args.format,
                dump: args.dump,
            },
            config,
            out,
        ),
        Commands::Ops(args) => run_ops(&OpsArgs { format: args.format }, config, out),
        Commands::Config(args) => run_config(&ConfigArgs { write: args.write }, config, out),
    }
}
