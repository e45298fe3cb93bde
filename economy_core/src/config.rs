//! ShopConfig - Economy tuning loaded from TOML

use crate::ConfigError;
use arsenal_core::WeaponTier;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Economy tuning of the shop and level-up rerolls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Reroll cost at the start of every rotation, before discounts
    #[serde(default = "default_base_reroll_cost")]
    pub base_reroll_cost: u32,
    /// Added to the reroll cost after each reroll within a rotation
    #[serde(default = "default_reroll_step")]
    pub reroll_step: u32,
    #[serde(default = "default_min_reroll_cost")]
    pub min_reroll_cost: u32,
    /// Chance that a freshly drawn offer is a weapon rather than a passive
    #[serde(default = "default_weapon_offer_chance")]
    pub weapon_offer_chance: f64,
    #[serde(default = "default_base_slots")]
    pub base_slots: u32,
    #[serde(default = "default_min_slots")]
    pub min_slots: u32,
    #[serde(default = "default_max_slots")]
    pub max_slots: u32,
    #[serde(default = "default_max_price_discount_pct")]
    pub max_price_discount_pct: u32,
    /// Share of a weapon's tier price returned on sale
    #[serde(default = "default_sell_refund_ratio")]
    pub sell_refund_ratio: f64,
    #[serde(default)]
    pub luck: LuckFactors,
    #[serde(default)]
    pub tier_weights: TierWeights,
    #[serde(default)]
    pub level_up: LevelUpConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            base_reroll_cost: default_base_reroll_cost(),
            reroll_step: default_reroll_step(),
            min_reroll_cost: default_min_reroll_cost(),
            weapon_offer_chance: default_weapon_offer_chance(),
            base_slots: default_base_slots(),
            min_slots: default_min_slots(),
            max_slots: default_max_slots(),
            max_price_discount_pct: default_max_price_discount_pct(),
            sell_refund_ratio: default_sell_refund_ratio(),
            luck: LuckFactors::default(),
            tier_weights: TierWeights::default(),
            level_up: LevelUpConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Load the shop configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        let config: ShopConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;
        config.validate().map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.min_slots == 0 || self.min_slots > self.max_slots {
            return Err(format!(
                "slot bounds [{}, {}] are invalid",
                self.min_slots, self.max_slots
            ));
        }
        if !(0.0..=1.0).contains(&self.weapon_offer_chance) {
            return Err(format!(
                "weapon_offer_chance must be within [0, 1], got {}",
                self.weapon_offer_chance
            ));
        }
        if !(0.0..=1.0).contains(&self.sell_refund_ratio) {
            return Err(format!(
                "sell_refund_ratio must be within [0, 1], got {}",
                self.sell_refund_ratio
            ));
        }
        if self.max_price_discount_pct > 100 {
            return Err("max_price_discount_pct cannot exceed 100".to_string());
        }
        if self.min_reroll_cost == 0 {
            return Err("min_reroll_cost must be at least 1".to_string());
        }
        if self.reroll_step == 0 {
            return Err("reroll_step must be at least 1".to_string());
        }
        if !(self.level_up.xp_base > 0.0 && self.level_up.xp_growth >= 1.0) {
            return Err("level_up needs xp_base > 0 and xp_growth >= 1".to_string());
        }
        Ok(())
    }

    /// Reroll cost of a fresh rotation after the reroll discount
    pub fn fresh_reroll_cost(&self, reroll_discount: u32) -> u32 {
        self.base_reroll_cost
            .saturating_sub(reroll_discount)
            .max(self.min_reroll_cost)
    }

    /// Number of offers in a rotation: base + sign(harvesting), clamped to the slot bounds
    pub fn slot_count(&self, harvesting: i32) -> usize {
        let slots = self.base_slots as i64 + harvesting.signum() as i64;
        slots.clamp(self.min_slots as i64, self.max_slots as i64) as usize
    }
}

/// Per-luck-point bonus on rarer entries, multiplied by the entry's rarity rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckFactors {
    #[serde(default = "default_weapon_luck")]
    pub weapon: f64,
    #[serde(default = "default_tier_luck")]
    pub tier: f64,
    #[serde(default = "default_passive_luck")]
    pub passive: f64,
}

impl Default for LuckFactors {
    fn default() -> Self {
        LuckFactors {
            weapon: default_weapon_luck(),
            tier: default_tier_luck(),
            passive: default_passive_luck(),
        }
    }
}

/// Base weights of the weapon tier roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    #[serde(default = "default_common_weight")]
    pub common: u32,
    #[serde(default = "default_uncommon_weight")]
    pub uncommon: u32,
    #[serde(default = "default_rare_weight")]
    pub rare: u32,
    #[serde(default = "default_epic_weight")]
    pub epic: u32,
}

impl TierWeights {
    pub fn weight(&self, tier: WeaponTier) -> u32 {
        match tier {
            WeaponTier::Common => self.common,
            WeaponTier::Uncommon => self.uncommon,
            WeaponTier::Rare => self.rare,
            WeaponTier::Epic => self.epic,
        }
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        TierWeights {
            common: default_common_weight(),
            uncommon: default_uncommon_weight(),
            rare: default_rare_weight(),
            epic: default_epic_weight(),
        }
    }
}

/// XP curve and reroll pricing of level-up uplifts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelUpConfig {
    #[serde(default = "default_xp_base")]
    pub xp_base: f64,
    #[serde(default = "default_xp_growth")]
    pub xp_growth: f64,
    #[serde(default = "default_level_reroll_cost")]
    pub base_reroll_cost: u32,
    #[serde(default = "default_level_reroll_step")]
    pub reroll_step: u32,
}

impl Default for LevelUpConfig {
    fn default() -> Self {
        LevelUpConfig {
            xp_base: default_xp_base(),
            xp_growth: default_xp_growth(),
            base_reroll_cost: default_level_reroll_cost(),
            reroll_step: default_level_reroll_step(),
        }
    }
}

fn default_base_reroll_cost() -> u32 {
    6
}
fn default_reroll_step() -> u32 {
    4
}
fn default_min_reroll_cost() -> u32 {
    2
}
fn default_weapon_offer_chance() -> f64 {
    0.55
}
fn default_base_slots() -> u32 {
    4
}
fn default_min_slots() -> u32 {
    2
}
fn default_max_slots() -> u32 {
    6
}
fn default_max_price_discount_pct() -> u32 {
    50
}
fn default_sell_refund_ratio() -> f64 {
    0.5
}
fn default_weapon_luck() -> f64 {
    0.008
}
fn default_tier_luck() -> f64 {
    0.012
}
fn default_passive_luck() -> f64 {
    0.01
}
fn default_common_weight() -> u32 {
    70
}
fn default_uncommon_weight() -> u32 {
    22
}
fn default_rare_weight() -> u32 {
    7
}
fn default_epic_weight() -> u32 {
    1
}
fn default_xp_base() -> f64 {
    20.0
}
fn default_xp_growth() -> f64 {
    1.22
}
fn default_level_reroll_cost() -> u32 {
    4
}
fn default_level_reroll_step() -> u32 {
    2
}
