//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::ledger::StatLedger;
pub use crate::effective::EffectiveStats;
pub use crate::player::PlayerBuild;

// Loadout
pub use crate::loadout::{LoadoutError, Placement, WeaponInstance, WeaponLoadout};

// Flux core
pub use crate::instability::InstabilityTier;

// Config
pub use crate::config::{base_stats, BaseStats};

// Re-exports from arsenal_core
pub use arsenal_core::{Modifier, Stat, WeaponTier};
