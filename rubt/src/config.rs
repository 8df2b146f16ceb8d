//! Configuration module for the rubt CLI.
//!
//! Settings come from `rubt.toml`, found with [`Config::locate`] or named
//! with `--config`. The `[registry]` table is layered over
//! `RegistryConfig::from_env()`, so a value in the file beats the matching
//! `RUBRIC_SYM_*` variable.

use dirs::{config_dir, home_dir};
use rubric_sym::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commands::common::OutputFormat;
use crate::error::{Result, RubtError};

/// File name looked up in every search directory.
pub const CONFIG_FILE_NAME: &str = "rubt.toml";

/// Settings read from `rubt.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Debug logging, same as `--verbose`.
    #[serde(default)]
    pub verbose: bool,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Worker threads for `batch`.
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Registry overrides.
    #[serde(default)]
    pub registry: RegistrySection,
}

/// `[registry]` table; unset keys keep the environment/default value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_floor: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_capacity: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_amount: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_enabled: Option<bool>,
}

fn default_jobs() -> usize {
    num_cpus::get()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            format: OutputFormat::default(),
            jobs: default_jobs(),
            registry: RegistrySection::default(),
        }
    }
}

impl RegistrySection {
    /// Section pinning every key to the values in `config`.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            sequence_floor: Some(config.sequence_floor),
            initial_capacity: Some(config.initial_capacity),
            shard_amount: Some(config.shard_amount),
            stats_enabled: Some(config.stats_enabled),
        }
    }

    /// Layer this section over `base`.
    pub fn apply(&self, mut base: RegistryConfig) -> RegistryConfig {
        if let Some(floor) = self.sequence_floor {
            base.sequence_floor = floor;
        }
        if let Some(capacity) = self.initial_capacity {
            base.initial_capacity = capacity;
        }
        if let Some(shards) = self.shard_amount {
            base.shard_amount = shards;
        }
        if let Some(stats) = self.stats_enabled {
            base.stats_enabled = stats;
        }
        base
    }
}

impl Config {
    /// Effective registry configuration: environment, then this file.
    pub fn registry_config(&self) -> RegistryConfig {
        self.registry.apply(RegistryConfig::from_env())
    }

    /// First existing file among [`Config::search_paths`].
    pub fn locate() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|path| path.is_file())
    }

    /// Read and parse one file. A missing file is an error here.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RubtError::Config(format!(
                "no config file at {}",
                path.display()
            )));
        }

        let config: Config = toml::from_str(&std::fs::read_to_string(path)?)?;
        Ok(config)
    }

    /// Copy of this configuration with every `[registry]` key filled in
    /// from the environment and defaults.
    pub fn effective(&self) -> Self {
        Self {
            registry: RegistrySection::from_config(&self.registry_config()),
            ..self.clone()
        }
    }

    /// Serialize as a `rubt.toml` document.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RubtError::Config(format!("cannot encode configuration: {}", e)))
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Candidate files, most specific first: the working directory,
    /// `~/.config/rubt/`, then the platform config directory.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        paths.extend(
            home_dir().map(|home| home.join(".config").join("rubt").join(CONFIG_FILE_NAME)),
        );
        paths.extend(config_dir().map(|dir| dir.join("rubt").join(CONFIG_FILE_NAME)));
        paths
    }
}
