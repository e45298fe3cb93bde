//! Offer - One purchasable entry of a shop rotation and its display view

use arsenal_core::{ItemDef, ItemRarity, Modifier, WeaponDef, WeaponTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identity of an offer, used to carry locks across regenerations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub u64);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What buying an offer grants
#[derive(Debug, Clone, PartialEq)]
pub enum OfferKind {
    /// A passive item applied to the run ledger
    Passive(Arc<ItemDef>),
    /// A weapon at a fixed tier, added to the loadout
    Weapon { def: Arc<WeaponDef>, tier: WeaponTier },
}

/// One purchasable entry of the current rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: OfferId,
    pub kind: OfferKind,
}

impl Offer {
    pub fn passive(id: OfferId, item: Arc<ItemDef>) -> Self {
        Offer {
            id,
            kind: OfferKind::Passive(item),
        }
    }

    pub fn weapon(id: OfferId, def: Arc<WeaponDef>, tier: WeaponTier) -> Self {
        Offer {
            id,
            kind: OfferKind::Weapon { def, tier },
        }
    }

    pub fn title(&self) -> String {
        match &self.kind {
            OfferKind::Passive(item) => item.name.clone(),
            OfferKind::Weapon { def, tier } => def.title(*tier),
        }
    }

    pub fn rarity(&self) -> ItemRarity {
        match &self.kind {
            OfferKind::Passive(item) => item.rarity,
            OfferKind::Weapon { def, tier } => tier.offer_rarity(def.rarity_hint),
        }
    }

    /// Catalog price before any shop discount
    pub fn base_price(&self) -> u32 {
        match &self.kind {
            OfferKind::Passive(item) => item.price,
            OfferKind::Weapon { def, tier } => def.price(*tier),
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        match &self.kind {
            OfferKind::Passive(item) => &item.modifiers,
            OfferKind::Weapon { def, tier } => def.modifiers(*tier),
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, OfferKind::Weapon { .. })
    }

    /// The item id if this offers a unique passive
    pub fn unique_item_id(&self) -> Option<&str> {
        match &self.kind {
            OfferKind::Passive(item) if item.unique => Some(&item.id),
            _ => None,
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}G", self.title(), self.rarity(), self.base_price())
    }
}

/// Type tag of an [`OfferView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferViewKind {
    Passive,
    Weapon,
}

/// Display data of one offer for the render layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferView {
    pub id: OfferId,
    pub kind: OfferViewKind,
    pub title: String,
    pub rarity: ItemRarity,
    /// Price after the shop-wide discount
    pub price: u32,
    pub base_price: u32,
    pub locked: bool,
    pub unique: bool,
    pub modifiers: Vec<String>,
}

impl OfferView {
    pub fn new(offer: &Offer, price: u32, locked: bool) -> Self {
        OfferView {
            id: offer.id,
            kind: if offer.is_weapon() {
                OfferViewKind::Weapon
            } else {
                OfferViewKind::Passive
            },
            title: offer.title(),
            rarity: offer.rarity(),
            price,
            base_price: offer.base_price(),
            locked,
            unique: offer.unique_item_id().is_some(),
            modifiers: offer.modifiers().iter().map(Modifier::display).collect(),
        }
    }
}
