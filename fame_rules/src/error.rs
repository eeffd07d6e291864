//! Errors raised by the rules crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from level lookups, identifier validation and settings loading.
#[derive(Debug, Error)]
pub enum RulesError {
    /// No threshold is configured for the level.
    #[error("no experience threshold configured for fame level {0}")]
    UnknownLevel(i32),

    #[error("zone category {0} is outside 1..=6")]
    InvalidZoneCategory(u8),

    #[error("failed to parse fame settings: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read fame settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fame settings: {0}")]
    InvalidSettings(String),
}
