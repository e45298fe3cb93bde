//! EffectiveStats - Immutable snapshot of the numbers the combat simulation consumes

use crate::config::BaseStats;
use crate::instability::{net_instability_pct, overcharge_multiplier, InstabilityTier};
use crate::ledger::StatLedger;
use crate::rules;
use arsenal_core::Stat;
use serde::{Deserialize, Serialize};

/// Lowest fire rate any build can reach, in shots per second
pub const MIN_FIRE_RATE: f64 = 0.1;

/// Capped and floored values derived from [`BaseStats`] plus a [`StatLedger`]
///
/// Built by [`EffectiveStats::from_parts`] and never mutated afterwards;
/// rebuild it whenever the ledger or the base values change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStats {
    // Defense
    pub max_hp: i32,
    /// Multiplier on incoming damage, armor already applied
    pub incoming_damage_mul: f64,
    pub dodge_pct: i32,
    pub hp_regen_per_sec: f64,

    // Offense
    /// Global + ranged damage, never below 1.0
    pub ranged_damage_mul: f64,
    pub bullet_damage: f64,
    pub crit_chance_pct: i32,
    pub crit_multiplier: f64,
    pub fire_rate: f64,
    pub range_px: i32,
    pub projectile_speed_mul: f64,
    pub projectile_size_mul: f64,
    pub multishot: i32,
    pub pierce: i32,
    pub homing_chance: f64,
    pub homing_strength_mul: f64,

    // Movement / sustain / meta
    pub move_speed_mul: f64,
    pub lifesteal_frac: f64,
    pub luck: i32,
    pub harvesting: i32,
    pub boss_damage_mul: f64,

    // Flux core
    pub instability_pct: i32,
    pub instability_tier: InstabilityTier,
    pub overcharge_mul: f64,
}

impl EffectiveStats {
    /// Apply every stat rule to `base + ledger`
    pub fn from_parts(base: &BaseStats, ledger: &StatLedger) -> Self {
        let stat = |s: Stat| ledger.get(s);
        let with_base = |b: i32, s: Stat| b.saturating_add(ledger.get(s));

        let max_hp = rules::effective_max_hp(base.max_hp, stat(Stat::MaxHp));
        let armor_pct = rules::clamp_armor_pct(with_base(base.armor_pct, Stat::ArmorPct));
        let dodge_pct = rules::clamp_dodge_pct(with_base(base.dodge_pct, Stat::DodgePct));

        let crit_chance_pct =
            rules::clamp_crit_chance_pct(with_base(base.crit_chance_pct, Stat::CritChancePct));
        let crit_multiplier =
            rules::crit_multiplier(with_base(base.crit_damage_extra_pct, Stat::CritDamagePct));

        let attack_speed = rules::attack_speed_multiplier(stat(Stat::AttackSpeedPct));
        let fire_rate = (base.fire_rate * attack_speed).max(MIN_FIRE_RATE);

        let range_points = with_base(base.range_points, Stat::RangePoints);

        let ranged_damage_mul = rules::damage_multiplier(&[
            with_base(base.damage_pct, Stat::DamagePct),
            with_base(base.ranged_pct, Stat::RangedPct),
        ])
        .max(1.0);

        let instability_pct = net_instability_pct(
            stat(Stat::FluxInstabilityPct),
            stat(Stat::FluxStabilityFlat),
        );

        EffectiveStats {
            max_hp,
            incoming_damage_mul: rules::incoming_damage_multiplier(armor_pct),
            dodge_pct,
            hp_regen_per_sec: rules::effective_hp_regen_per_sec(stat(Stat::HpRegenPs)),
            ranged_damage_mul,
            bullet_damage: base.bullet_damage * ranged_damage_mul,
            crit_chance_pct,
            crit_multiplier,
            fire_rate,
            range_px: rules::effective_range_px(base.range_px, range_points),
            projectile_speed_mul: base.projectile_speed_mul
                * rules::projectile_speed_multiplier(stat(Stat::ProjectileSpeedPct)),
            projectile_size_mul: base.projectile_size_mul
                * rules::projectile_size_multiplier(stat(Stat::ProjectileSizePct)),
            multishot: base
                .multishot
                .saturating_add(rules::multishot(stat(Stat::MultishotFlat))),
            pierce: base.pierce.saturating_add(rules::pierce(stat(Stat::PierceFlat))),
            homing_chance: rules::homing_chance(with_base(
                base.homing_chance_pct,
                Stat::HomingChancePct,
            )),
            homing_strength_mul: rules::homing_strength_multiplier(with_base(
                base.homing_strength_pct,
                Stat::HomingStrengthPct,
            )),
            move_speed_mul: base.move_speed_mul
                * rules::move_speed_multiplier(stat(Stat::MoveSpeedPct)),
            lifesteal_frac: base
                .lifesteal_frac
                .max(rules::lifesteal_fraction(stat(Stat::LifestealPct))),
            luck: rules::effective_luck(with_base(base.luck, Stat::LuckFlat)),
            harvesting: rules::effective_harvesting(with_base(base.harvesting, Stat::HarvestingFlat)),
            boss_damage_mul: rules::boss_damage_multiplier(stat(Stat::BossDamagePct)),
            instability_pct,
            instability_tier: InstabilityTier::from_pct(instability_pct),
            overcharge_mul: overcharge_multiplier(stat(Stat::CoreOverchargePct), instability_pct),
        }
    }

    /// JSON export for the render layer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for EffectiveStats {
    fn default() -> Self {
        EffectiveStats::from_parts(&BaseStats::default(), &StatLedger::new())
    }
}
