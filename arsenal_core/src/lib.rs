//! arsenal_core - Stat vocabulary and static catalogs of the arena shop
//!
//! This library provides:
//! - Stat: the closed set of numeric player dimensions
//! - ItemRarity / WeaponTier: rarity weights and the weapon tier ladder
//! - ItemDef / WeaponDef: immutable catalog entries with their modifiers
//! - Catalogs: TOML-backed tables loaded once and shared by reference

pub mod catalog;
pub mod item;
pub mod types;
pub mod weapon;

pub use catalog::{catalogs, init_catalogs, Catalogs};
pub use item::{compact_modifiers, ItemDef, Modifier, ShopEffect, RANGE_POINT_TO_PX};
pub use types::{ItemRarity, Stat, WeaponTier};
pub use weapon::{TierStats, WeaponDef};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading catalog configuration
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}
