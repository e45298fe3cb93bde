use crate::types::{ItemRarity, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixels per range point, used when rendering range modifiers
pub const RANGE_POINT_TO_PX: i32 = 6;

/// A single signed stat modifier of an item or weapon tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier {
    pub stat: Stat,
    pub amount: i32,
}

impl Modifier {
    pub fn new(stat: Stat, amount: i32) -> Self {
        Modifier { stat, amount }
    }

    /// Get display text for this modifier, e.g. `+6% Ranged Damage`
    pub fn display(&self) -> String {
        let sign = if self.amount >= 0 { "+" } else { "" };
        if self.stat == Stat::RangePoints {
            // Range is shown in pixels rather than points
            return format!("{}{} {}", sign, self.amount.saturating_mul(RANGE_POINT_TO_PX), self.stat.label());
        }
        if self.stat.is_percent() {
            format!("{}{}% {}", sign, self.amount, self.stat.label())
        } else {
            format!("{}{} {}", sign, self.amount, self.stat.label())
        }
    }

    /// Abbreviated display text, e.g. `+4% AS`
    pub fn compact(&self) -> String {
        let sign = if self.amount >= 0 { "+" } else { "" };
        if self.stat == Stat::RangePoints {
            return format!("{}{} Range", sign, self.amount.saturating_mul(RANGE_POINT_TO_PX));
        }
        if self.stat.is_percent() {
            format!("{}{}% {}", sign, self.amount, self.stat.short_label())
        } else {
            format!("{}{} {}", sign, self.amount, self.stat.short_label())
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Join modifiers in compact form, two spaces apart
pub fn compact_modifiers(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(Modifier::compact)
        .collect::<Vec<_>>()
        .join("  ")
}

/// Side effect a passive item has on the shop itself when bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopEffect {
    /// Lowers the fresh-rotation reroll cost by this many gold
    RerollDiscount(u32),
    /// Adds this many percent to the shop-wide price discount
    PriceDiscountPct(u32),
}

/// Passive shop item. Takes no loadout slot and never combines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub rarity: ItemRarity,
    /// At most one copy purchasable per run
    #[serde(default)]
    pub unique: bool,
    pub price: u32,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub shop_effect: Option<ShopEffect>,
}

impl ItemDef {
    /// Modifier lines for display
    pub fn modifier_lines(&self) -> Vec<String> {
        self.modifiers.iter().map(Modifier::display).collect()
    }
}

impl fmt::Display for ItemDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.name, self.rarity)?;
        if self.unique {
            write!(f, ", unique")?;
        }
        write!(f, ") {}G", self.price)?;
        if !self.modifiers.is_empty() {
            write!(f, ": {}", compact_modifiers(&self.modifiers))?;
        }
        Ok(())
    }
}
