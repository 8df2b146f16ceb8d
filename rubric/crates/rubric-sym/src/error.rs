//! Core error types for the rubric-sym crate
//!
//! Resolution failures are ordinary values: nothing in this crate panics on
//! an unknown symbol ID.

use thiserror::Error;

/// Error type for symbol lookup operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// No record exists for the ID and none can be derived from a base name
    #[error("Symbol not found: id {id:#x}")]
    NotFound { id: u64 },
}

/// Error type for registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The dynamic sequence floor would overlap the reserved operator IDs
    #[error("Invalid sequence floor {floor}: must be greater than {max_reserved}")]
    SequenceFloorTooLow { floor: u64, max_reserved: u64 },

    /// The dynamic sequence floor leaves no room for tagged IDs
    #[error("Invalid sequence floor {floor}: must be below {limit}")]
    SequenceFloorTooHigh { floor: u64, limit: u64 },

    /// DashMap requires a power-of-two shard count greater than one
    #[error("Invalid shard amount {0}: must be a power of two greater than 1")]
    InvalidShardAmount(usize),
}

/// Result type alias for symbol operations
pub type SymbolResult<T> = std::result::Result<T, SymbolError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
