//! Command modules for the rubt CLI.
//!
//! Each subcommand lives in its own file and exposes an `*Args` struct plus a
//! `run_*` function writing to any `io::Write`.

pub mod common;

pub mod batch;
pub mod classify;
pub mod config;
pub mod inspect;
pub mod intern;
pub mod ops;

// Re-export command types and functions
pub use batch::{run_batch, BatchArgs};
pub use classify::{run_classify, ClassifyArgs};
pub use config::{run_config, ConfigArgs};
pub use inspect::{run_inspect, InspectArgs};
pub use intern::{run_intern, InternArgs};
pub use ops::{run_ops, OpsArgs};
