use crate::item::Modifier;
use crate::types::{ItemRarity, WeaponTier};
use serde::{Deserialize, Serialize};

/// Price and modifiers of one weapon tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    pub price: u32,
    pub modifiers: Vec<Modifier>,
}

/// A weapon archetype with a price and modifier list for each of the four tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    /// Used for shop weighting and offer display
    pub rarity_hint: ItemRarity,
    /// Indexed by tier rank, always four entries
    tiers: [TierStats; 4],
}

impl WeaponDef {
    /// Build a definition from per-tier stats ordered Common..=Epic
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity_hint: ItemRarity,
        tiers: [TierStats; 4],
    ) -> Self {
        WeaponDef {
            id: id.into(),
            name: name.into(),
            rarity_hint,
            tiers,
        }
    }

    pub fn tier(&self, tier: WeaponTier) -> &TierStats {
        &self.tiers[tier.rank() as usize]
    }

    pub fn price(&self, tier: WeaponTier) -> u32 {
        self.tier(tier).price
    }

    pub fn modifiers(&self, tier: WeaponTier) -> &[Modifier] {
        &self.tier(tier).modifiers
    }

    /// Display title of a weapon at a tier, e.g. `Pulse Core [RARE]`
    pub fn title(&self, tier: WeaponTier) -> String {
        format!("{} [{}]", self.name, tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stat;

    fn tier(price: u32, pct: i32) -> TierStats {
        TierStats {
            price,
            modifiers: vec![Modifier::new(Stat::RangedPct, pct)],
        }
    }

    #[test]
    fn test_tier_lookup() {
        let def = WeaponDef::new(
            "pulse_core",
            "Pulse Core",
            ItemRarity::Common,
            [tier(10, 6), tier(18, 12), tier(30, 18), tier(48, 26)],
        );
        assert_eq!(def.price(WeaponTier::Common), 10);
        assert_eq!(def.price(WeaponTier::Epic), 48);
        assert_eq!(def.modifiers(WeaponTier::Rare)[0].amount, 18);
        assert_eq!(def.title(WeaponTier::Uncommon), "Pulse Core [UNCOMMON]");
    }
}
