//! stat_core - Player stat ledger, stat rules and weapon loadout
//!
//! This library provides:
//! - StatLedger: additive, unclamped stat deltas keyed by [`Stat`]
//! - rules: pure cap/floor functions mapping raw totals to gameplay values
//! - EffectiveStats: immutable snapshot built from BaseStats + a ledger
//! - WeaponLoadout: four weapon slots with combine-on-duplicate promotion
//! - PlayerBuild: passives, loadout and gold of one run
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::prelude::*;
//! use arsenal_core::{catalogs, WeaponTier};
//!
//! let cat = catalogs();
//! let mut build = PlayerBuild::default().with_gold(50);
//! let pulse = cat.weapon("pulse_core").unwrap().clone();
//! build
//!     .loadout
//!     .try_add_or_combine(WeaponInstance::new(pulse, WeaponTier::Common))
//!     .unwrap();
//!
//! let stats = build.effective();
//! assert!(stats.fire_rate > 8.0);
//! ```

pub mod config;
pub mod effective;
pub mod instability;
pub mod ledger;
pub mod loadout;
pub mod player;
pub mod prelude;
pub mod rules;

pub use config::{BaseStats, ConfigError};
pub use effective::EffectiveStats;
pub use instability::InstabilityTier;
pub use ledger::StatLedger;
pub use loadout::{LoadoutError, Placement, WeaponInstance, WeaponLoadout, LOADOUT_CAPACITY};
pub use player::{InsufficientGold, PlayerBuild};

// Re-export the vocabulary callers need alongside the ledger
pub use arsenal_core::{Modifier, Stat, WeaponTier};
