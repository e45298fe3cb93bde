//! Weapon loadout with combine-on-duplicate promotion
//!
//! Two instances of the same weapon at the same tier never sit side by side:
//! adding a duplicate removes the held copy and promotes the newcomer one tier,
//! repeating until no duplicate is left or the newcomer reaches Epic.

use crate::ledger::StatLedger;
use arsenal_core::{Modifier, WeaponDef, WeaponTier};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Number of weapon slots
pub const LOADOUT_CAPACITY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadoutError {
    #[error("loadout is full ({capacity} weapons) and nothing can combine")]
    Full { capacity: usize },
    #[error("no weapon in slot {index} (loadout holds {len})")]
    InvalidSlot { index: usize, len: usize },
}

/// A weapon definition held at one tier
#[derive(Debug, Clone)]
pub struct WeaponInstance {
    pub def: Arc<WeaponDef>,
    pub tier: WeaponTier,
}

impl WeaponInstance {
    pub fn new(def: Arc<WeaponDef>, tier: WeaponTier) -> Self {
        WeaponInstance { def, tier }
    }

    /// Whether `other` would combine with this instance (same definition and tier)
    pub fn same_kind(&self, other: &WeaponInstance) -> bool {
        self.tier == other.tier && self.def.id == other.def.id
    }

    pub fn price(&self) -> u32 {
        self.def.price(self.tier)
    }

    pub fn modifiers(&self) -> &[Modifier] {
        self.def.modifiers(self.tier)
    }

    pub fn title(&self) -> String {
        self.def.title(self.tier)
    }

    /// Gold returned when selling: `max(1, round(price * ratio))`
    pub fn refund_value(&self, ratio: f64) -> u32 {
        let refund = (self.price() as f64 * ratio.max(0.0)).round();
        (refund as u32).max(1)
    }
}

impl PartialEq for WeaponInstance {
    fn eq(&self, other: &Self) -> bool {
        self.same_kind(other)
    }
}

impl Eq for WeaponInstance {}

impl fmt::Display for WeaponInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Outcome of [`WeaponLoadout::try_add_or_combine`]
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The instance now occupying `slot`
    pub instance: WeaponInstance,
    pub slot: usize,
    /// Held copies consumed by promotion
    pub merges: u32,
    /// False when an Epic duplicate was absorbed by the Epic already held
    pub added: bool,
}

/// Ordered weapon slots, at most [`LOADOUT_CAPACITY`]
#[derive(Debug, Clone, Default)]
pub struct WeaponLoadout {
    slots: Vec<WeaponInstance>,
}

impl WeaponLoadout {
    pub fn new() -> Self {
        WeaponLoadout::default()
    }

    /// Add a weapon, combining it with held duplicates first
    ///
    /// Fails without touching the loadout when it is full and the weapon
    /// matches nothing held. A new instance is appended after the others.
    pub fn try_add_or_combine(
        &mut self,
        instance: WeaponInstance,
    ) -> Result<Placement, LoadoutError> {
        if self.is_full() && self.find(&instance).is_none() {
            return Err(LoadoutError::Full {
                capacity: LOADOUT_CAPACITY,
            });
        }

        let mut candidate = instance;
        let mut merges = 0;
        while let Some(index) = self.find(&candidate) {
            if candidate.tier.is_max() {
                // Epic is terminal: the held Epic absorbs the duplicate
                return Ok(Placement {
                    instance: self.slots[index].clone(),
                    slot: index,
                    merges,
                    added: false,
                });
            }
            self.slots.remove(index);
            candidate.tier = candidate.tier.next();
            merges += 1;
        }

        // Either a slot was free up front or a merge just freed one
        self.slots.push(candidate.clone());
        Ok(Placement {
            instance: candidate,
            slot: self.slots.len() - 1,
            merges,
            added: true,
        })
    }

    /// Whether adding `instance` would succeed
    pub fn can_accept(&self, instance: &WeaponInstance) -> bool {
        !self.is_full() || self.find(instance).is_some()
    }

    /// Take the weapon out of a slot
    pub fn remove(&mut self, index: usize) -> Result<WeaponInstance, LoadoutError> {
        if index >= self.slots.len() {
            return Err(LoadoutError::InvalidSlot {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&WeaponInstance> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[WeaponInstance] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= LOADOUT_CAPACITY
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Sum of every held weapon's tier modifiers
    pub fn to_ledger(&self) -> StatLedger {
        StatLedger::from_modifiers(self.slots.iter().flat_map(|w| w.modifiers()))
    }

    fn find(&self, instance: &WeaponInstance) -> Option<usize> {
        self.slots.iter().position(|held| held.same_kind(instance))
    }
}
