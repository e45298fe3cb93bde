use serde::{Deserialize, Serialize};
use std::fmt;

/// Every numeric capability of the player.
///
/// Percent dimensions use "1 point = 1%". The raw values live in a ledger and
/// carry no caps; the mapping to gameplay quantities happens in the stat rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    // Defensive
    MaxHp,
    ArmorPct,
    DodgePct,
    HpRegenPs,
    // Offensive (global and typed)
    DamagePct,
    MeleePct,
    RangedPct,
    MagicPct,
    CritChancePct,
    CritDamagePct,
    AttackSpeedPct,
    // Weapon handling
    RangePoints,
    ProjectileSpeedPct,
    ProjectileSizePct,
    MultishotFlat,
    PierceFlat,
    HomingChancePct,
    HomingStrengthPct,
    KnockbackPct,
    // Movement and economy
    MoveSpeedPct,
    LifestealPct,
    LuckFlat,
    HarvestingFlat,
    // Bosses
    BossDamagePct,
    // Flux core
    FluxInstabilityPct,
    FluxStabilityFlat,
    CoreOverchargePct,
}

impl Stat {
    /// Number of stat dimensions
    pub const COUNT: usize = 27;

    const ALL: [Stat; Stat::COUNT] = [
        Stat::MaxHp,
        Stat::ArmorPct,
        Stat::DodgePct,
        Stat::HpRegenPs,
        Stat::DamagePct,
        Stat::MeleePct,
        Stat::RangedPct,
        Stat::MagicPct,
        Stat::CritChancePct,
        Stat::CritDamagePct,
        Stat::AttackSpeedPct,
        Stat::RangePoints,
        Stat::ProjectileSpeedPct,
        Stat::ProjectileSizePct,
        Stat::MultishotFlat,
        Stat::PierceFlat,
        Stat::HomingChancePct,
        Stat::HomingStrengthPct,
        Stat::KnockbackPct,
        Stat::MoveSpeedPct,
        Stat::LifestealPct,
        Stat::LuckFlat,
        Stat::HarvestingFlat,
        Stat::BossDamagePct,
        Stat::FluxInstabilityPct,
        Stat::FluxStabilityFlat,
        Stat::CoreOverchargePct,
    ];

    /// Get all stat variants in declaration order
    pub fn all() -> &'static [Stat] {
        &Self::ALL
    }

    /// Dense index of this stat, matching its position in [`Stat::all`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether amounts of this stat are shown as percentages
    pub fn is_percent(self) -> bool {
        matches!(
            self,
            Stat::ArmorPct
                | Stat::DodgePct
                | Stat::DamagePct
                | Stat::MeleePct
                | Stat::RangedPct
                | Stat::MagicPct
                | Stat::CritChancePct
                | Stat::CritDamagePct
                | Stat::AttackSpeedPct
                | Stat::ProjectileSpeedPct
                | Stat::ProjectileSizePct
                | Stat::HomingChancePct
                | Stat::HomingStrengthPct
                | Stat::KnockbackPct
                | Stat::MoveSpeedPct
                | Stat::LifestealPct
                | Stat::BossDamagePct
                | Stat::FluxInstabilityPct
                | Stat::CoreOverchargePct
        )
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Stat::MaxHp => "Max HP",
            Stat::ArmorPct => "Armor",
            Stat::DodgePct => "Dodge",
            Stat::HpRegenPs => "HP/s",
            Stat::DamagePct => "Damage",
            Stat::MeleePct => "Melee Damage",
            Stat::RangedPct => "Ranged Damage",
            Stat::MagicPct => "Magic Damage",
            Stat::CritChancePct => "Crit Chance",
            Stat::CritDamagePct => "Crit Damage",
            Stat::AttackSpeedPct => "Attack Speed",
            Stat::RangePoints => "Range",
            Stat::ProjectileSpeedPct => "Proj Speed",
            Stat::ProjectileSizePct => "Proj Size",
            Stat::MultishotFlat => "Multishot",
            Stat::PierceFlat => "Pierce",
            Stat::HomingChancePct => "Homing Chance",
            Stat::HomingStrengthPct => "Homing Strength",
            Stat::KnockbackPct => "Knockback",
            Stat::MoveSpeedPct => "Move Speed",
            Stat::LifestealPct => "Lifesteal",
            Stat::LuckFlat => "Luck",
            Stat::HarvestingFlat => "Harvesting",
            Stat::BossDamagePct => "Boss Damage",
            Stat::FluxInstabilityPct => "Instability",
            Stat::FluxStabilityFlat => "Stability",
            Stat::CoreOverchargePct => "Overcharge",
        }
    }

    /// Abbreviated name for compact modifier lists
    pub fn short_label(self) -> &'static str {
        match self {
            Stat::MaxHp => "HP",
            Stat::ArmorPct => "Armor",
            Stat::DodgePct => "Dodge",
            Stat::HpRegenPs => "HP/s",
            Stat::DamagePct => "Dmg",
            Stat::MeleePct => "Melee",
            Stat::RangedPct => "Ranged",
            Stat::MagicPct => "Magic",
            Stat::CritChancePct => "Crit",
            Stat::CritDamagePct => "CritDmg",
            Stat::AttackSpeedPct => "AS",
            Stat::RangePoints => "Range",
            Stat::ProjectileSpeedPct => "ProjSpd",
            Stat::ProjectileSizePct => "ProjSize",
            Stat::MultishotFlat => "Multi",
            Stat::PierceFlat => "Pierce",
            Stat::HomingChancePct => "Homing",
            Stat::HomingStrengthPct => "HomingStr",
            Stat::KnockbackPct => "KB",
            Stat::MoveSpeedPct => "Move",
            Stat::LifestealPct => "LS",
            Stat::LuckFlat => "Luck",
            Stat::HarvestingFlat => "Harv",
            Stat::BossDamagePct => "Boss",
            Stat::FluxInstabilityPct => "Instab",
            Stat::FluxStabilityFlat => "Stab",
            Stat::CoreOverchargePct => "Overch",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rarity of passive items and weapon offers, with base weights for shop rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl ItemRarity {
    /// Base weight for random selection (higher = more frequent)
    pub fn base_weight(self) -> u32 {
        match self {
            ItemRarity::Common => 60,
            ItemRarity::Uncommon => 25,
            ItemRarity::Rare => 12,
            ItemRarity::Epic => 3,
            ItemRarity::Legendary => 1,
        }
    }

    /// 0 for Common up to 4 for Legendary, used for luck scaling
    pub fn rank(self) -> u32 {
        match self {
            ItemRarity::Common => 0,
            ItemRarity::Uncommon => 1,
            ItemRarity::Rare => 2,
            ItemRarity::Epic => 3,
            ItemRarity::Legendary => 4,
        }
    }

    /// One step rarer, saturating at Epic. Legendary is never reached by bumping.
    pub fn bump(self) -> ItemRarity {
        match self {
            ItemRarity::Common => ItemRarity::Uncommon,
            ItemRarity::Uncommon => ItemRarity::Rare,
            ItemRarity::Rare | ItemRarity::Epic => ItemRarity::Epic,
            ItemRarity::Legendary => ItemRarity::Legendary,
        }
    }
}

impl fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRarity::Common => write!(f, "Common"),
            ItemRarity::Uncommon => write!(f, "Uncommon"),
            ItemRarity::Rare => write!(f, "Rare"),
            ItemRarity::Epic => write!(f, "Epic"),
            ItemRarity::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Weapon power ladder. Two equal tiers combine into the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponTier {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl WeaponTier {
    /// Get all tiers from lowest to highest
    pub fn all() -> &'static [WeaponTier] {
        &[
            WeaponTier::Common,
            WeaponTier::Uncommon,
            WeaponTier::Rare,
            WeaponTier::Epic,
        ]
    }

    /// The next tier up; Epic is terminal and returns itself
    pub fn next(self) -> WeaponTier {
        match self {
            WeaponTier::Common => WeaponTier::Uncommon,
            WeaponTier::Uncommon => WeaponTier::Rare,
            WeaponTier::Rare => WeaponTier::Epic,
            WeaponTier::Epic => WeaponTier::Epic,
        }
    }

    pub fn is_max(self) -> bool {
        self == WeaponTier::Epic
    }

    /// 0 for Common up to 3 for Epic
    pub fn rank(self) -> u32 {
        self as u32
    }

    /// Rarity shown for a weapon of this tier whose definition carries `hint`
    pub fn offer_rarity(self, hint: ItemRarity) -> ItemRarity {
        match self {
            WeaponTier::Common => hint,
            WeaponTier::Uncommon => hint.bump(),
            WeaponTier::Rare => hint.bump().bump(),
            WeaponTier::Epic => ItemRarity::Epic,
        }
    }
}

impl fmt::Display for WeaponTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponTier::Common => write!(f, "COMMON"),
            WeaponTier::Uncommon => write!(f, "UNCOMMON"),
            WeaponTier::Rare => write!(f, "RARE"),
            WeaponTier::Epic => write!(f, "EPIC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_index_matches_all() {
        assert_eq!(Stat::all().len(), Stat::COUNT);
        for (i, stat) in Stat::all().iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }

    #[test]
    fn test_tier_next_saturates() {
        assert_eq!(WeaponTier::Common.next(), WeaponTier::Uncommon);
        assert_eq!(WeaponTier::Rare.next(), WeaponTier::Epic);
        assert_eq!(WeaponTier::Epic.next(), WeaponTier::Epic);
        assert!(WeaponTier::Epic.is_max());
    }

    #[test]
    fn test_offer_rarity_bumps_per_tier() {
        assert_eq!(WeaponTier::Common.offer_rarity(ItemRarity::Uncommon), ItemRarity::Uncommon);
        assert_eq!(WeaponTier::Uncommon.offer_rarity(ItemRarity::Uncommon), ItemRarity::Rare);
        assert_eq!(WeaponTier::Rare.offer_rarity(ItemRarity::Rare), ItemRarity::Epic);
        assert_eq!(WeaponTier::Epic.offer_rarity(ItemRarity::Common), ItemRarity::Epic);
        assert_eq!(WeaponTier::Rare.offer_rarity(ItemRarity::Legendary), ItemRarity::Legendary);
    }

    #[test]
    fn test_rarity_serde_names() {
        let parsed: ItemRarity = toml::from_str::<std::collections::HashMap<String, ItemRarity>>(
            "r = \"legendary\"",
        )
        .unwrap()["r"];
        assert_eq!(parsed, ItemRarity::Legendary);
    }
}
