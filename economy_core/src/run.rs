//! Run - One arena session from the first wave to a reset

use crate::config::ShopConfig;
use crate::level_up::Progression;
use crate::shop::Shop;
use arsenal_core::Catalogs;
use stat_core::{BaseStats, PlayerBuild};
use std::sync::Arc;

/// One arena session: the player build, its shop and level progression
#[derive(Debug, Clone)]
pub struct Run {
    pub build: PlayerBuild,
    pub shop: Shop,
    pub progression: Progression,
    wave: u32,
}

impl Default for Run {
    fn default() -> Self {
        Run::new(BaseStats::default(), ShopConfig::default(), arsenal_core::catalogs())
    }
}

impl Run {
    pub fn new(base: BaseStats, config: ShopConfig, catalogs: Arc<Catalogs>) -> Self {
        let progression = Progression::new(config.level_up.clone());
        Run {
            build: PlayerBuild::new(base),
            shop: Shop::new(config, catalogs),
            progression,
            wave: 1,
        }
    }

    /// Current wave, starting at 1
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Open the intermission shop after a wave
    pub fn enter_shop(&mut self) {
        self.shop.begin_intermission(&self.build);
    }

    pub fn enter_shop_with_rng<R: rand::Rng>(&mut self, rng: &mut R) {
        self.shop.begin_intermission_with_rng(&self.build, rng);
    }

    /// Leave the shop and advance the wave counter
    pub fn start_next_wave(&mut self) -> u32 {
        self.wave += 1;
        tracing::info!("Starting wave {}", self.wave);
        self.wave
    }

    pub fn award_gold(&mut self, amount: u32) {
        self.build.add_gold(amount);
    }

    /// Add XP using the build's current luck for the uplift roll
    pub fn award_xp(&mut self, amount: u32) -> u32 {
        let luck = self.build.effective().luck;
        self.progression.add_xp(amount, luck)
    }

    /// Apply a pending level-up uplift to the passive ledger
    pub fn accept_level_up(&mut self) -> bool {
        self.progression
            .accept_pending(&mut self.build.passives)
            .is_some()
    }

    /// Start over: clears gold, stats, weapons, uniques, discounts, locks and level
    pub fn reset(&mut self) {
        self.build.reset();
        self.shop.reset_run();
        self.progression.reset();
        self.wave = 1;
        tracing::info!("Run reset");
    }
}
