//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Structural inventory errors.
///
/// Business-rule refusals (full container, disallowed slot, self-move) are
/// not errors; they come back as outcome values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Slot index outside the container's fixed capacity
    #[error("Slot {slot} out of range (capacity {capacity})")]
    OutOfRange { slot: usize, capacity: usize },

    /// Persisted slot map does not cover exactly `0..len`
    #[error("Invalid slot map: expected slot {expected}, found {found}")]
    InvalidSlotMap { expected: usize, found: usize },
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors from configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate item definition: {0}")]
    DuplicateItem(String),

    #[error("Duplicate container preset: {0}")]
    DuplicateContainer(String),

    #[error("Container '{container}' seeds unknown item '{item}'")]
    UnknownItem { container: String, item: String },

    #[error("Container '{container}' slot {slot} does not accept item '{item}'")]
    SeedNotAllowed {
        container: String,
        item: String,
        slot: usize,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
