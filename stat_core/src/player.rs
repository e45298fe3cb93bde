//! PlayerBuild - Everything a run accumulates on the player

use crate::config::BaseStats;
use crate::effective::EffectiveStats;
use crate::ledger::StatLedger;
use crate::loadout::WeaponLoadout;
use arsenal_core::ItemDef;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not enough gold: need {needed}, have {available}")]
pub struct InsufficientGold {
    pub needed: u32,
    pub available: u32,
}

/// Base values, passive ledger, weapons and gold of one player
#[derive(Debug, Clone, Default)]
pub struct PlayerBuild {
    pub base: BaseStats,
    /// Modifiers of every passive item bought this run
    pub passives: StatLedger,
    pub loadout: WeaponLoadout,
    gold: u32,
}

impl PlayerBuild {
    pub fn new(base: BaseStats) -> Self {
        PlayerBuild {
            base,
            ..PlayerBuild::default()
        }
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deduct gold, refusing (and changing nothing) when the balance is short
    pub fn spend_gold(&mut self, amount: u32) -> Result<(), InsufficientGold> {
        if amount > self.gold {
            return Err(InsufficientGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Add a passive item's modifiers to the run ledger
    pub fn apply_item(&mut self, item: &ItemDef) {
        self.passives.apply_modifiers(&item.modifiers);
    }

    /// Passives plus the current loadout contribution
    pub fn total_ledger(&self) -> StatLedger {
        let weapons = self.loadout.to_ledger();
        StatLedger::sum([&self.passives, &weapons])
    }

    pub fn effective(&self) -> EffectiveStats {
        EffectiveStats::from_parts(&self.base, &self.total_ledger())
    }

    /// Clear passives, weapons and gold for a new run. Base values stay.
    pub fn reset(&mut self) {
        self.passives.clear();
        self.loadout.clear();
        self.gold = 0;
    }
}
