use crate::item::{ItemDef, Modifier};
use crate::types::{ItemRarity, WeaponTier};
use serde::Deserialize;

/// TOML layout of a catalog file. A file may hold items, weapons, or both.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFileConfig {
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
}

/// Configuration for one weapon archetype
#[derive(Debug, Deserialize)]
pub struct WeaponConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rarity_hint: ItemRarity,
    #[serde(default)]
    pub tiers: Vec<TierConfig>,
}

/// One `[[weapons.tiers]]` block
#[derive(Debug, Deserialize)]
pub struct TierConfig {
    pub tier: WeaponTier,
    pub price: u32,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}
