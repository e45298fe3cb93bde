//! Shop - Rotating offers drawn from the catalogs each intermission
//!
//! A rotation is rolled when an intermission begins. Rerolls cost gold and
//! get more expensive within the same rotation. Locked offers keep their
//! slot through one regeneration (a reroll or the next intermission) and are
//! unlocked afterwards.

use crate::config::ShopConfig;
use crate::offer::{Offer, OfferId, OfferKind, OfferView};
use crate::weighted::{luck_weight, pick_index, pick_weighted};
use crate::ShopError;
use arsenal_core::{catalogs, Catalogs, ItemDef, ShopEffect, WeaponDef, WeaponTier};
use rand::Rng;
use stat_core::{EffectiveStats, Placement, PlayerBuild, WeaponInstance, LOADOUT_CAPACITY};
use std::collections::HashSet;
use std::sync::Arc;

/// A completed purchase
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub offer: Offer,
    /// Gold actually charged
    pub price: u32,
    /// Where a bought weapon ended up; `None` for passives
    pub placement: Option<Placement>,
}

/// Hypothetical outcome of buying an offer, computed on a cloned build
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub offer_id: OfferId,
    pub price: u32,
    pub affordable: bool,
    pub before: EffectiveStats,
    pub after: EffectiveStats,
    pub placement: Option<Placement>,
}

/// Shop rotation and the run-scoped economy counters
#[derive(Debug, Clone)]
pub struct Shop {
    config: ShopConfig,
    catalogs: Arc<Catalogs>,
    offers: Vec<Offer>,
    locked: HashSet<OfferId>,
    bought_uniques: HashSet<String>,
    reroll_cost: u32,
    rerolls_this_phase: u32,
    reroll_discount: u32,
    price_discount_pct: u32,
    next_offer_id: u64,
}

impl Default for Shop {
    fn default() -> Self {
        Shop::new(ShopConfig::default(), catalogs())
    }
}

impl Shop {
    pub fn new(config: ShopConfig, catalogs: Arc<Catalogs>) -> Self {
        let reroll_cost = config.fresh_reroll_cost(0);
        Shop {
            config,
            catalogs,
            offers: Vec::new(),
            locked: HashSet::new(),
            bought_uniques: HashSet::new(),
            reroll_cost,
            rerolls_this_phase: 0,
            reroll_discount: 0,
            price_discount_pct: 0,
            next_offer_id: 1,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn reroll_cost(&self) -> u32 {
        self.reroll_cost
    }

    pub fn rerolls_this_phase(&self) -> u32 {
        self.rerolls_this_phase
    }

    pub fn reroll_discount(&self) -> u32 {
        self.reroll_discount
    }

    pub fn price_discount_pct(&self) -> u32 {
        self.price_discount_pct
    }

    pub fn is_locked(&self, id: OfferId) -> bool {
        self.locked.contains(&id)
    }

    pub fn is_unique_bought(&self, item_id: &str) -> bool {
        self.bought_uniques.contains(item_id)
    }

    /// Price after the shop-wide discount: `max(1, round(price * (1 - discount/100)))`
    pub fn effective_price(&self, base_price: u32) -> u32 {
        let mut price = base_price as f64;
        if self.price_discount_pct != 0 {
            price = (price * (1.0 - self.price_discount_pct as f64 / 100.0)).round();
        }
        (price as u32).max(1)
    }

    /// Display data for every offer in rotation order
    pub fn views(&self) -> Vec<OfferView> {
        self.offers
            .iter()
            .map(|o| OfferView::new(o, self.effective_price(o.base_price()), self.is_locked(o.id)))
            .collect()
    }

    pub fn views_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.views())
    }

    // === Rotation ===

    /// Roll the opening rotation of an intermission
    ///
    /// Still-locked offers from the previous rotation keep their slot and are
    /// unlocked. The reroll cost resets to its fresh value.
    pub fn begin_intermission(&mut self, build: &PlayerBuild) -> &[Offer] {
        self.begin_intermission_with_rng(build, &mut rand::thread_rng())
    }

    pub fn begin_intermission_with_rng<R: Rng>(
        &mut self,
        build: &PlayerBuild,
        rng: &mut R,
    ) -> &[Offer] {
        let stats = build.effective();
        let carried = self.take_locked();

        self.reroll_cost = self.config.fresh_reroll_cost(self.reroll_discount);
        self.rerolls_this_phase = 0;
        self.rebuild_offers(stats.luck, stats.harvesting, carried, rng);

        tracing::info!(
            "Shop opened with {} offers (reroll cost {})",
            self.offers.len(),
            self.reroll_cost
        );
        &self.offers
    }

    /// Pay the reroll cost and regenerate every unlocked slot
    ///
    /// Returns the gold charged. Locked offers stay at their index (or are
    /// dropped if the rotation shrank) and are unlocked afterwards.
    pub fn reroll(&mut self, build: &mut PlayerBuild) -> Result<u32, ShopError> {
        self.reroll_with_rng(build, &mut rand::thread_rng())
    }

    pub fn reroll_with_rng<R: Rng>(
        &mut self,
        build: &mut PlayerBuild,
        rng: &mut R,
    ) -> Result<u32, ShopError> {
        let cost = self.reroll_cost;
        if let Err(e) = build.spend_gold(cost) {
            tracing::debug!("Reroll refused: {}", e);
            return Err(e.into());
        }

        self.rerolls_this_phase += 1;
        self.reroll_cost = self.reroll_cost.saturating_add(self.config.reroll_step);

        let stats = build.effective();
        let preserved = self.take_locked();
        self.rebuild_offers(stats.luck, stats.harvesting, preserved, rng);

        tracing::debug!(
            "Shop rerolled for {}G (reroll {}, next cost {})",
            cost,
            self.rerolls_this_phase,
            self.reroll_cost
        );
        Ok(cost)
    }

    /// Flip the lock of the offer at `index`, returning the new state
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool, ShopError> {
        let id = self.offer_at(index)?.id;
        let locked = if self.locked.remove(&id) {
            false
        } else {
            self.locked.insert(id);
            true
        };
        tracing::debug!("Offer {} lock set to {}", id, locked);
        Ok(locked)
    }

    /// Append a fixed offer to the current rotation (scripted or guaranteed stock)
    pub fn insert_offer(&mut self, kind: OfferKind) -> OfferId {
        let id = self.next_offer_id();
        self.offers.push(Offer { id, kind });
        id
    }

    // === Purchases ===

    /// Buy the offer at `index`, charging gold and applying it to the build
    ///
    /// Every refusal leaves the shop and the build untouched.
    pub fn buy(&mut self, index: usize, build: &mut PlayerBuild) -> Result<Purchase, ShopError> {
        let offer = self.offer_at(index)?.clone();
        let price = self.effective_price(offer.base_price());

        if build.gold() < price {
            tracing::debug!("Cannot afford {} ({}G, have {}G)", offer.title(), price, build.gold());
            return Err(ShopError::InsufficientFunds {
                price,
                available: build.gold(),
            });
        }
        match &offer.kind {
            OfferKind::Passive(item) => self.check_unique(item)?,
            OfferKind::Weapon { def, tier } => {
                if !build.loadout.can_accept(&WeaponInstance::new(def.clone(), *tier)) {
                    tracing::debug!("Loadout full, cannot take {}", offer.title());
                    return Err(ShopError::LoadoutFull {
                        capacity: LOADOUT_CAPACITY,
                    });
                }
            }
        }

        build.spend_gold(price)?;
        let placement = match &offer.kind {
            OfferKind::Passive(item) => {
                build.apply_item(item);
                if item.unique {
                    self.bought_uniques.insert(item.id.clone());
                }
                if let Some(effect) = item.shop_effect {
                    self.apply_shop_effect(effect);
                }
                None
            }
            OfferKind::Weapon { def, tier } => Some(
                build
                    .loadout
                    .try_add_or_combine(WeaponInstance::new(def.clone(), *tier))?,
            ),
        };

        self.offers.remove(index);
        self.locked.remove(&offer.id);

        tracing::info!("Bought {} for {}G", offer.title(), price);
        Ok(Purchase {
            offer,
            price,
            placement,
        })
    }

    /// Effect of buying the offer at `index` without committing anything
    ///
    /// Fails for the same reasons [`Shop::buy`] would, except that a lack of
    /// gold is reported through [`Preview::affordable`].
    pub fn preview(&self, index: usize, build: &PlayerBuild) -> Result<Preview, ShopError> {
        let offer = self.offer_at(index)?;
        let price = self.effective_price(offer.base_price());

        let mut after = build.clone();
        let placement = match &offer.kind {
            OfferKind::Passive(item) => {
                self.check_unique(item)?;
                after.apply_item(item);
                None
            }
            OfferKind::Weapon { def, tier } => Some(
                after
                    .loadout
                    .try_add_or_combine(WeaponInstance::new(def.clone(), *tier))?,
            ),
        };

        Ok(Preview {
            offer_id: offer.id,
            price,
            affordable: build.gold() >= price,
            before: build.effective(),
            after: after.effective(),
            placement,
        })
    }

    /// Sell the weapon in a loadout slot, returning the refunded gold
    pub fn sell(&self, slot: usize, build: &mut PlayerBuild) -> Result<u32, ShopError> {
        let sold = build.loadout.remove(slot).map_err(|e| {
            tracing::warn!("Sell refused: {}", e);
            ShopError::from(e)
        })?;
        let refund = sold.refund_value(self.config.sell_refund_ratio);
        build.add_gold(refund);

        tracing::info!("Sold {} for {}G", sold.title(), refund);
        Ok(refund)
    }

    /// Forget everything scoped to the current run
    pub fn reset_run(&mut self) {
        self.offers.clear();
        self.locked.clear();
        self.bought_uniques.clear();
        self.reroll_discount = 0;
        self.price_discount_pct = 0;
        self.reroll_cost = self.config.fresh_reroll_cost(0);
        self.rerolls_this_phase = 0;
    }

    // === Internals ===

    fn offer_at(&self, index: usize) -> Result<&Offer, ShopError> {
        self.offers.get(index).ok_or_else(|| {
            tracing::warn!("Offer index {} out of range ({} offers)", index, self.offers.len());
            ShopError::InvalidIndex {
                index,
                len: self.offers.len(),
            }
        })
    }

    fn check_unique(&self, item: &ItemDef) -> Result<(), ShopError> {
        if item.unique && self.bought_uniques.contains(&item.id) {
            tracing::debug!("Unique {} already owned", item.id);
            return Err(ShopError::UniqueOwned(item.id.clone()));
        }
        Ok(())
    }

    fn apply_shop_effect(&mut self, effect: ShopEffect) {
        match effect {
            ShopEffect::RerollDiscount(amount) => {
                self.reroll_discount = self.reroll_discount.max(amount);
            }
            ShopEffect::PriceDiscountPct(pct) => {
                self.price_discount_pct = self
                    .price_discount_pct
                    .saturating_add(pct)
                    .min(self.config.max_price_discount_pct);
            }
        }
        tracing::debug!(
            "Shop effect {:?} applied (reroll discount {}, price discount {}%)",
            effect,
            self.reroll_discount,
            self.price_discount_pct
        );
    }

    fn next_offer_id(&mut self) -> OfferId {
        let id = OfferId(self.next_offer_id);
        self.next_offer_id += 1;
        id
    }

    /// Locked offers with their current index; clears every lock
    fn take_locked(&mut self) -> Vec<(usize, Offer)> {
        let kept = self
            .offers
            .iter()
            .enumerate()
            .filter(|(_, o)| self.locked.contains(&o.id))
            .map(|(i, o)| (i, o.clone()))
            .collect();
        self.locked.clear();
        kept
    }

    fn rebuild_offers<R: Rng>(
        &mut self,
        luck: i32,
        harvesting: i32,
        preserved: Vec<(usize, Offer)>,
        rng: &mut R,
    ) {
        let slots = self.config.slot_count(harvesting);
        let mut anchored: Vec<Option<Offer>> = vec![None; slots];
        for (index, offer) in preserved {
            match anchored.get_mut(index) {
                Some(slot) => *slot = Some(offer),
                None => tracing::debug!("Locked offer {} dropped, rotation shrank", offer.id),
            }
        }

        let mut offers = Vec::with_capacity(slots);
        for slot in anchored {
            match slot {
                Some(offer) => offers.push(offer),
                None => offers.extend(self.draw_offer(luck, rng)),
            }
        }
        self.offers = offers;
    }

    fn draw_offer<R: Rng>(&mut self, luck: i32, rng: &mut R) -> Option<Offer> {
        if rng.gen::<f64>() < self.config.weapon_offer_chance {
            if let Some((def, tier)) = self.draw_weapon(luck, rng) {
                return Some(Offer::weapon(self.next_offer_id(), def, tier));
            }
        }
        if let Some(item) = self.draw_passive(luck, rng) {
            return Some(Offer::passive(self.next_offer_id(), item));
        }
        // Every passive left is an owned unique
        let (def, tier) = self.draw_weapon(luck, rng)?;
        Some(Offer::weapon(self.next_offer_id(), def, tier))
    }

    fn draw_weapon<R: Rng>(&self, luck: i32, rng: &mut R) -> Option<(Arc<WeaponDef>, WeaponTier)> {
        let factor = self.config.luck.weapon;
        let def = pick_weighted(
            self.catalogs.weapons(),
            |d| luck_weight(d.rarity_hint.base_weight(), luck, factor, d.rarity_hint.rank()),
            rng,
        )?
        .clone();
        Some((def, self.draw_tier(luck, rng)))
    }

    fn draw_tier<R: Rng>(&self, luck: i32, rng: &mut R) -> WeaponTier {
        let factor = self.config.luck.tier;
        let weights: Vec<u64> = WeaponTier::all()
            .iter()
            .map(|&t| luck_weight(self.config.tier_weights.weight(t), luck, factor, t.rank()) as u64)
            .collect();
        pick_index(&weights, rng)
            .map(|i| WeaponTier::all()[i])
            .unwrap_or(WeaponTier::Common)
    }

    fn draw_passive<R: Rng>(&self, luck: i32, rng: &mut R) -> Option<Arc<ItemDef>> {
        let factor = self.config.luck.passive;
        let pool: Vec<&Arc<ItemDef>> = self
            .catalogs
            .items()
            .iter()
            .filter(|item| !(item.unique && self.bought_uniques.contains(&item.id)))
            .collect();
        pick_weighted(
            &pool,
            |item| luck_weight(item.rarity.base_weight(), luck, factor, item.rarity.rank()),
            rng,
        )
        .map(|item| Arc::clone(item))
    }
}
