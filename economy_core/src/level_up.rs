//! Level-up progression: XP curve and luck-biased stat uplifts
//!
//! Each level gained rolls one pending positive uplift. The player may pay
//! gold to reroll it (cost rises within the level) and then accepts it into
//! the passive ledger.

use crate::config::LevelUpConfig;
use crate::weighted::pick_weighted;
use crate::ShopError;
use arsenal_core::{Modifier, Stat};
use rand::Rng;
use serde::{Deserialize, Serialize};
use stat_core::{PlayerBuild, StatLedger};

/// A rolled uplift waiting to be accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRoll {
    pub stat: Stat,
    /// Always positive
    pub amount: i32,
}

impl StatRoll {
    /// Display text, e.g. `+12 Max HP`
    pub fn label(&self) -> String {
        Modifier::new(self.stat, self.amount).display()
    }
}

struct BagEntry {
    stat: Stat,
    weight: u32,
    min: i32,
    max: i32,
}

const fn entry(stat: Stat, weight: u32, min: i32, max: i32) -> BagEntry {
    BagEntry {
        stat,
        weight,
        min,
        max,
    }
}

static STAT_BAG: [BagEntry; 14] = [
    entry(Stat::MaxHp, 14, 8, 14),
    entry(Stat::ArmorPct, 10, 2, 4),
    entry(Stat::DodgePct, 8, 1, 3),
    entry(Stat::HpRegenPs, 6, 1, 2),
    entry(Stat::DamagePct, 12, 3, 6),
    entry(Stat::RangedPct, 10, 3, 6),
    entry(Stat::MeleePct, 4, 3, 5),
    entry(Stat::MagicPct, 4, 3, 5),
    entry(Stat::CritChancePct, 7, 3, 6),
    entry(Stat::CritDamagePct, 7, 10, 20),
    entry(Stat::AttackSpeedPct, 10, 4, 7),
    entry(Stat::RangePoints, 8, 8, 14),
    entry(Stat::MoveSpeedPct, 7, 3, 5),
    entry(Stat::LifestealPct, 5, 1, 2),
];

/// Stats that matter to a ranged build; luck makes them more likely
fn favoured_by_luck(stat: Stat) -> bool {
    matches!(
        stat,
        Stat::DamagePct
            | Stat::RangedPct
            | Stat::AttackSpeedPct
            | Stat::CritChancePct
            | Stat::CritDamagePct
            | Stat::RangePoints
            | Stat::MoveSpeedPct
            | Stat::MaxHp
            | Stat::ArmorPct
            | Stat::DodgePct
    )
}

/// Bag weight of an entry after the luck bias, at least 1
fn biased_weight(stat: Stat, weight: u32, luck: i32) -> u32 {
    let luck = luck as f64;
    let bias = if favoured_by_luck(stat) {
        (1.0 + luck * 0.005).clamp(0.2, 3.0)
    } else if matches!(stat, Stat::MeleePct | Stat::MagicPct) {
        (1.0 + luck * 0.0025).clamp(0.33, 1.5)
    } else {
        1.0
    };
    ((weight as f64 * bias).round() as u32).max(1)
}

/// Roll one uplift from the stat bag
fn roll_stat<R: Rng>(luck: i32, rng: &mut R) -> StatRoll {
    let picked = pick_weighted(&STAT_BAG, |e| biased_weight(e.stat, e.weight, luck), rng)
        .unwrap_or(&STAT_BAG[0]);
    StatRoll {
        stat: picked.stat,
        amount: rng.gen_range(picked.min..=picked.max),
    }
}

/// XP, level and the pending uplift of one run
#[derive(Debug, Clone)]
pub struct Progression {
    config: LevelUpConfig,
    level: u32,
    xp: u32,
    xp_needed: u32,
    reroll_cost: u32,
    rerolls_this_level: u32,
    pending: Option<StatRoll>,
}

impl Default for Progression {
    fn default() -> Self {
        Progression::new(LevelUpConfig::default())
    }
}

impl Progression {
    pub fn new(config: LevelUpConfig) -> Self {
        let xp_needed = xp_for_level(&config, 1);
        let reroll_cost = config.base_reroll_cost;
        Progression {
            config,
            level: 1,
            xp: 0,
            xp_needed,
            reroll_cost,
            rerolls_this_level: 0,
            pending: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    /// XP still required for the current level
    pub fn xp_needed(&self) -> u32 {
        self.xp_needed
    }

    pub fn reroll_cost(&self) -> u32 {
        self.reroll_cost
    }

    pub fn rerolls_this_level(&self) -> u32 {
        self.rerolls_this_level
    }

    pub fn pending(&self) -> Option<StatRoll> {
        self.pending
    }

    /// Add XP, returning the number of levels gained
    pub fn add_xp(&mut self, amount: u32, luck: i32) -> u32 {
        self.add_xp_with_rng(amount, luck, &mut rand::thread_rng())
    }

    pub fn add_xp_with_rng<R: Rng>(&mut self, amount: u32, luck: i32, rng: &mut R) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= self.xp_needed {
            self.xp -= self.xp_needed;
            self.level += 1;
            self.xp_needed = xp_for_level(&self.config, self.level);
            self.reroll_cost = self.config.base_reroll_cost;
            self.rerolls_this_level = 0;
            self.pending = Some(roll_stat(luck, rng));
            gained += 1;
        }
        if gained > 0 {
            tracing::info!("Reached level {} (+{})", self.level, gained);
        }
        gained
    }

    /// Pay gold to replace the pending uplift
    pub fn reroll(&mut self, build: &mut PlayerBuild) -> Result<StatRoll, ShopError> {
        self.reroll_with_rng(build, &mut rand::thread_rng())
    }

    pub fn reroll_with_rng<R: Rng>(
        &mut self,
        build: &mut PlayerBuild,
        rng: &mut R,
    ) -> Result<StatRoll, ShopError> {
        if self.pending.is_none() {
            return Err(ShopError::NothingPending);
        }
        build.spend_gold(self.reroll_cost)?;

        let roll = roll_stat(build.effective().luck, rng);
        self.pending = Some(roll);
        self.rerolls_this_level += 1;
        self.reroll_cost = self.reroll_cost.saturating_add(self.config.reroll_step);

        tracing::debug!("Level uplift rerolled to {}", roll.label());
        Ok(roll)
    }

    /// Apply the pending uplift to `ledger` and clear it
    pub fn accept_pending(&mut self, ledger: &mut StatLedger) -> Option<StatRoll> {
        let roll = self.pending.take()?;
        ledger.add(roll.stat, roll.amount);
        tracing::debug!("Accepted {}", roll.label());
        Some(roll)
    }

    /// Back to level 1 with no XP
    pub fn reset(&mut self) {
        *self = Progression::new(self.config.clone());
    }
}

/// XP needed to leave `level`: `ceil(base * growth^(level - 1))`
pub fn xp_for_level(config: &LevelUpConfig, level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    let xp = (config.xp_base * config.xp_growth.powi(exponent)).ceil();
    // `as` saturates for very high levels
    (xp as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_xp_curve() {
        let config = LevelUpConfig::default();
        assert_eq!(xp_for_level(&config, 1), 20);
        assert_eq!(xp_for_level(&config, 2), 25);
        assert_eq!(xp_for_level(&config, 3), 30);
        assert_eq!(xp_for_level(&config, 0), 20);
    }

    #[test]
    fn test_level_up_rolls_pending() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut progression = Progression::default();
        assert_eq!(progression.add_xp_with_rng(19, 0, &mut rng), 0);
        assert!(progression.pending().is_none());

        assert_eq!(progression.add_xp_with_rng(1, 0, &mut rng), 1);
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.xp(), 0);
        assert_eq!(progression.xp_needed(), 25);
        let roll = progression.pending().unwrap();
        assert!(roll.amount > 0);
    }

    #[test]
    fn test_multiple_levels_at_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut progression = Progression::default();
        // 20 + 25 + 30 = 75
        assert_eq!(progression.add_xp_with_rng(80, 0, &mut rng), 3);
        assert_eq!(progression.level(), 4);
        assert_eq!(progression.xp(), 5);
    }

    #[test]
    fn test_rolls_stay_within_bag_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for luck in [-200, 0, 50, 400] {
            for _ in 0..500 {
                let roll = roll_stat(luck, &mut rng);
                let entry = STAT_BAG.iter().find(|e| e.stat == roll.stat).unwrap();
                assert!((entry.min..=entry.max).contains(&roll.amount));
            }
        }
    }

    #[test]
    fn test_luck_bias() {
        assert_eq!(biased_weight(Stat::MaxHp, 14, 0), 14);
        assert_eq!(biased_weight(Stat::MaxHp, 14, 1000), 42);
        assert_eq!(biased_weight(Stat::MaxHp, 14, -1000), 3);
        assert_eq!(biased_weight(Stat::MeleePct, 4, 1000), 6);
        assert_eq!(biased_weight(Stat::MagicPct, 4, -1000), 1);
        assert_eq!(biased_weight(Stat::LifestealPct, 5, 1000), 5);
    }

    #[test]
    fn test_reroll_cost_rises_and_resets() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut progression = Progression::default();
        let mut build = PlayerBuild::default().with_gold(100);

        assert_eq!(
            progression.reroll_with_rng(&mut build, &mut rng).unwrap_err(),
            ShopError::NothingPending
        );

        progression.add_xp_with_rng(20, 0, &mut rng);
        progression.reroll_with_rng(&mut build, &mut rng).unwrap();
        progression.reroll_with_rng(&mut build, &mut rng).unwrap();
        assert_eq!(build.gold(), 100 - 4 - 6);
        assert_eq!(progression.reroll_cost(), 8);
        assert_eq!(progression.rerolls_this_level(), 2);

        progression.add_xp_with_rng(25, 0, &mut rng);
        assert_eq!(progression.reroll_cost(), 4);
        assert_eq!(progression.rerolls_this_level(), 0);
    }

    #[test]
    fn test_reroll_refused_without_gold() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut progression = Progression::default();
        let mut build = PlayerBuild::default().with_gold(3);
        progression.add_xp_with_rng(20, 0, &mut rng);
        let pending = progression.pending();

        assert!(matches!(
            progression.reroll_with_rng(&mut build, &mut rng),
            Err(ShopError::InsufficientFunds { price: 4, available: 3 })
        ));
        assert_eq!(progression.pending(), pending);
        assert_eq!(progression.reroll_cost(), 4);
    }

    #[test]
    fn test_accept_pending() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut progression = Progression::default();
        let mut ledger = StatLedger::new();
        assert!(progression.accept_pending(&mut ledger).is_none());

        progression.add_xp_with_rng(20, 0, &mut rng);
        let roll = progression.accept_pending(&mut ledger).unwrap();
        assert_eq!(ledger.get(roll.stat), roll.amount);
        assert!(progression.pending().is_none());
    }

    #[test]
    fn test_reset() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut progression = Progression::default();
        progression.add_xp_with_rng(100, 0, &mut rng);
        progression.reset();
        assert_eq!(progression.level(), 1);
        assert_eq!(progression.xp(), 0);
        assert!(progression.pending().is_none());
    }
}
