//! economy_core - Shop rotations, rerolls, locks and level-up progression
//!
//! The shop draws weighted-random offers from the [`arsenal_core`] catalogs
//! each intermission and applies purchases to a [`stat_core::PlayerBuild`].

mod config;
mod level_up;
mod offer;
mod run;
mod shop;
mod weighted;

pub use config::{LevelUpConfig, LuckFactors, ShopConfig, TierWeights};
pub use level_up::{xp_for_level, Progression, StatRoll};
pub use offer::{Offer, OfferId, OfferKind, OfferView, OfferViewKind};
pub use run::Run;
pub use shop::{Preview, Purchase, Shop};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading shop configuration
#[derive(Debug, Error)]
pub enum ConfigError {
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

/// A refused shop or level-up action. Nothing is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("no offer at index {index} (rotation holds {len})")]
    InvalidIndex { index: usize, len: usize },
    #[error("not enough gold: costs {price}, have {available}")]
    InsufficientFunds { price: u32, available: u32 },
    #[error("unique item '{0}' already bought this run")]
    UniqueOwned(String),
    #[error("loadout is full ({capacity} weapons) and nothing can combine")]
    LoadoutFull { capacity: usize },
    #[error("no weapon in slot {index} (loadout holds {len})")]
    InvalidSlot { index: usize, len: usize },
    #[error("no level-up uplift is pending")]
    NothingPending,
}

impl From<stat_core::LoadoutError> for ShopError {
    fn from(err: stat_core::LoadoutError) -> Self {
        match err {
            stat_core::LoadoutError::Full { capacity } => ShopError::LoadoutFull { capacity },
            stat_core::LoadoutError::InvalidSlot { index, len } => {
                ShopError::InvalidSlot { index, len }
            }
        }
    }
}

impl From<stat_core::InsufficientGold> for ShopError {
    fn from(err: stat_core::InsufficientGold) -> Self {
        ShopError::InsufficientFunds {
            price: err.needed,
            available: err.available,
        }
    }
}
