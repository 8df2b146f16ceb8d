//! Registry configuration.
//!
//! Sizing and numbering parameters for a [`SymbolRegistry`]. All fields have
//! working defaults; [`RegistryConfig::from_env`] overrides them from
//! `RUBRIC_SYM_*` variables.
//!
//! [`SymbolRegistry`]: crate::registry::SymbolRegistry

use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::symbol::{MAX_SEQUENCE, RESERVED_ID_LIMIT};

/// Largest sequence floor that still leaves room for tagged IDs
pub const MAX_SEQUENCE_FLOOR: u64 = MAX_SEQUENCE - 1;

/// Configuration for a symbol registry
///
/// # Examples
///
/// ```rust
/// use rubric_sym::RegistryConfig;
///
/// let config = RegistryConfig {
///     initial_capacity: 64 * 1024,
///     stats_enabled: false,
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Last sequence number considered taken at startup
    ///
    /// The first dynamic symbol gets `sequence_floor + 1`. Must be at least
    /// [`RESERVED_ID_LIMIT`] so dynamic IDs never overlap operator IDs.
    ///
    /// Default: 1000
    pub sequence_floor: u64,

    /// Entries to pre-allocate in each direction of the table
    ///
    /// Default: 1024
    pub initial_capacity: usize,

    /// DashMap shard count, a power of two greater than one
    ///
    /// Default: 4 × available parallelism, rounded up to a power of two
    pub shard_amount: usize,

    /// Track hit/miss/race counters
    ///
    /// Default: true
    pub stats_enabled: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let threads = std::thread::available_parallelism().map_or(1, |n| n.get());

        RegistryConfig {
            sequence_floor: RESERVED_ID_LIMIT,
            initial_capacity: 1024,
            shard_amount: (threads * 4).next_power_of_two().max(2),
            stats_enabled: true,
        }
    }
}

impl RegistryConfig {
    /// Validate configuration
    ///
    /// ```rust
    /// use rubric_sym::RegistryConfig;
    ///
    /// let config = RegistryConfig {
    ///     shard_amount: 3,
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sequence_floor < RESERVED_ID_LIMIT {
            return Err(ConfigError::SequenceFloorTooLow {
                floor: self.sequence_floor,
                max_reserved: RESERVED_ID_LIMIT - 1,
            });
        }

        if self.sequence_floor > MAX_SEQUENCE_FLOOR {
            return Err(ConfigError::SequenceFloorTooHigh {
                floor: self.sequence_floor,
                limit: MAX_SEQUENCE_FLOOR,
            });
        }

        if self.shard_amount < 2 || !self.shard_amount.is_power_of_two() {
            return Err(ConfigError::InvalidShardAmount(self.shard_amount));
        }

        Ok(())
    }

    /// Build configuration from environment variables
    ///
    /// Overrides defaults with:
    /// - `RUBRIC_SYM_SEQUENCE_FLOOR`
    /// - `RUBRIC_SYM_CAPACITY`
    /// - `RUBRIC_SYM_SHARDS`
    /// - `RUBRIC_SYM_STATS` (`1`/`true` or `0`/`false`)
    ///
    /// Unparsable values are logged and ignored. The result is not validated.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(floor) = env_parse("RUBRIC_SYM_SEQUENCE_FLOOR") {
            config.sequence_floor = floor;
        }

        if let Some(capacity) = env_parse("RUBRIC_SYM_CAPACITY") {
            config.initial_capacity = capacity;
        }

        if let Some(shards) = env_parse("RUBRIC_SYM_SHARDS") {
            config.shard_amount = shards;
        }

        if let Ok(val) = std::env::var("RUBRIC_SYM_STATS") {
            match parse_flag(&val) {
                Some(enabled) => config.stats_enabled = enabled,
                None => tracing::warn!(var = "RUBRIC_SYM_STATS", value = %val, "ignoring invalid flag"),
            }
        }

        config
    }
}

fn env_parse<T: FromStr>(var: &str) -> Option<T> {
    let val = std::env::var(var).ok()?;
    match val.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(var, value = %val, "ignoring unparsable value");
            None
        }
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    let val = val.trim();
    if val == "1" || val.eq_ignore_ascii_case("true") {
        Some(true)
    } else if val == "0" || val.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RegistryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sequence_floor, 1000);
        assert!(config.shard_amount.is_power_of_two());
        assert!(config.stats_enabled);
    }

    #[test]
    fn test_floor_bounds() {
        let low = RegistryConfig {
            sequence_floor: 338,
            ..Default::default()
        };
        assert!(matches!(
            low.validate(),
            Err(ConfigError::SequenceFloorTooLow { floor: 338, .. })
        ));

        let high = RegistryConfig {
            sequence_floor: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            high.validate(),
            Err(ConfigError::SequenceFloorTooHigh { .. })
        ));

        let edge = RegistryConfig {
            sequence_floor: MAX_SEQUENCE_FLOOR,
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_shard_amount() {
        for bad in [0, 1, 3, 12] {
            let config = RegistryConfig {
                shard_amount: bad,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::InvalidShardAmount(bad)));
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" false "), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn test_env_parse_ignores_garbage() {
        // Unique variable name, never set elsewhere.
        std::env::set_var("RUBRIC_SYM_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_parse::<u64>("RUBRIC_SYM_TEST_GARBAGE"), None);
        std::env::set_var("RUBRIC_SYM_TEST_GARBAGE", " 4096 ");
        assert_eq!(env_parse::<u64>("RUBRIC_SYM_TEST_GARBAGE"), Some(4096));
        std::env::remove_var("RUBRIC_SYM_TEST_GARBAGE");
        assert_eq!(env_parse::<u64>("RUBRIC_SYM_TEST_GARBAGE"), None);
    }
}
