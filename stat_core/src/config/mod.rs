//! Configuration for player base values
//!
//! Base values are read from TOML. Every field has a default, so a partial
//! file (or no file at all) yields the standard arena player.

mod base;

pub use base::{init_base_stats, base_stats, ensure_base_stats_initialized, BaseStats};

use thiserror::Error;

/// Error loading stat configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
