//! Stat rules - Map raw ledger totals to capped, floored gameplay values
//!
//! Percent inputs use "1 point = 1%". Every function here is pure and total
//! over `i32`, so a purchase preview can evaluate them against a cloned ledger
//! as often as it likes.
//!
//! | Quantity | Rule |
//! |---|---|
//! | Armor | clamp to [-80, 80]; damage taken multiplier = 1 - armor/100 |
//! | Dodge | clamp to [0, 60] |
//! | Crit chance | clamp to [0, 100] |
//! | Crit multiplier | max(1.0, 1.0 + (50 + extra)/100) |
//! | Max HP | max(1, base + bonus) |
//! | Speeds | 1 + max(0, pct)/100, negative bonuses ignored |
//! | Projectile speed/size | max(0.25, 1 + pct/100) |
//! | Range | max(250, base + points * 6) |

use arsenal_core::RANGE_POINT_TO_PX;
use rand::Rng;

pub const ARMOR_MIN_PCT: i32 = -80;
pub const ARMOR_MAX_PCT: i32 = 80;
pub const DODGE_MAX_PCT: i32 = 60;
pub const CRIT_CHANCE_MAX_PCT: i32 = 100;
/// Crit bonus on top of a normal hit before any modifiers (+50% => x1.5)
pub const CRIT_DAMAGE_BASE_PCT: i32 = 50;
pub const MIN_PROJECTILE_SPEED_MUL: f64 = 0.25;
pub const MIN_PROJECTILE_SIZE_MUL: f64 = 0.25;
pub const MIN_RANGE_PX: i32 = 250;
pub const MIN_HOMING_STRENGTH_MUL: f64 = 0.2;

// === Armor ===

/// Armor percentage clamped to [-80, 80]
pub fn clamp_armor_pct(armor_pct: i32) -> i32 {
    armor_pct.clamp(ARMOR_MIN_PCT, ARMOR_MAX_PCT)
}

/// Multiplier on incoming damage from (clamped) armor
///
/// +20% armor gives 0.8, -30% armor gives 1.3. Always within [0.2, 1.8].
pub fn incoming_damage_multiplier(armor_pct: i32) -> f64 {
    1.0 - clamp_armor_pct(armor_pct) as f64 / 100.0
}

// === Dodge / Crit ===

/// Dodge chance clamped to [0, 60]
pub fn clamp_dodge_pct(dodge_pct: i32) -> i32 {
    dodge_pct.clamp(0, DODGE_MAX_PCT)
}

/// Crit chance clamped to [0, 100]
pub fn clamp_crit_chance_pct(crit_chance_pct: i32) -> i32 {
    crit_chance_pct.clamp(0, CRIT_CHANCE_MAX_PCT)
}

/// Crit damage multiplier from extra crit damage on top of the +50% base
///
/// A crit never deals less than a normal hit.
pub fn crit_multiplier(extra_crit_damage_pct: i32) -> f64 {
    let bonus = (CRIT_DAMAGE_BASE_PCT as f64 + extra_crit_damage_pct as f64) / 100.0;
    (1.0 + bonus).max(1.0)
}

/// Roll a dodge against the clamped chance
pub fn roll_dodge(dodge_pct: i32, rng: &mut impl Rng) -> bool {
    roll_percent(clamp_dodge_pct(dodge_pct), rng)
}

/// Roll a crit against the clamped chance
pub fn roll_crit(crit_chance_pct: i32, rng: &mut impl Rng) -> bool {
    roll_percent(clamp_crit_chance_pct(crit_chance_pct), rng)
}

fn roll_percent(pct: i32, rng: &mut impl Rng) -> bool {
    if pct <= 0 {
        return false;
    }
    rng.gen_range(0..100) < pct
}

// === HP ===

/// Max HP is never below 1
pub fn effective_max_hp(base_max_hp: i32, bonus_max_hp: i32) -> i32 {
    base_max_hp.saturating_add(bonus_max_hp).max(1)
}

/// Negative regeneration is floored to 0 and never drains HP
pub fn effective_hp_regen_per_sec(regen_ps: i32) -> f64 {
    regen_ps.max(0) as f64
}

// === Speeds ===

/// Negative attack speed is ignored; the base fire rate is the floor
pub fn attack_speed_multiplier(attack_speed_pct: i32) -> f64 {
    1.0 + attack_speed_pct.max(0) as f64 / 100.0
}

/// Negative move speed is ignored; base speed is the floor
pub fn move_speed_multiplier(move_speed_pct: i32) -> f64 {
    1.0 + move_speed_pct.max(0) as f64 / 100.0
}

/// Lifesteal as a fraction of damage dealt, never negative
pub fn lifesteal_fraction(lifesteal_pct: i32) -> f64 {
    lifesteal_pct.max(0) as f64 / 100.0
}

pub fn projectile_speed_multiplier(projectile_speed_pct: i32) -> f64 {
    (1.0 + projectile_speed_pct as f64 / 100.0).max(MIN_PROJECTILE_SPEED_MUL)
}

pub fn projectile_size_multiplier(projectile_size_pct: i32) -> f64 {
    (1.0 + projectile_size_pct as f64 / 100.0).max(MIN_PROJECTILE_SIZE_MUL)
}

// === Range / Homing / Pierce / Multishot ===

/// Range in pixels from a base and range points (1 point = 6 px)
pub fn effective_range_px(base_range_px: i32, range_points: i32) -> i32 {
    let px = base_range_px as i64 + range_points as i64 * RANGE_POINT_TO_PX as i64;
    px.clamp(MIN_RANGE_PX as i64, i32::MAX as i64) as i32
}

/// Homing chance as a probability in [0, 1]
pub fn homing_chance(homing_chance_pct: i32) -> f64 {
    homing_chance_pct.clamp(0, 100) as f64 / 100.0
}

/// Homing turn-rate factor, at least 0.2
pub fn homing_strength_multiplier(homing_strength_pct: i32) -> f64 {
    (1.0 + homing_strength_pct as f64 / 100.0).max(MIN_HOMING_STRENGTH_MUL)
}

pub fn multishot(multishot: i32) -> i32 {
    multishot.max(0)
}

pub fn pierce(pierce: i32) -> i32 {
    pierce.max(0)
}

// === Luck / Harvesting / Boss ===

/// Luck passes through signed; it biases future weights rather than bounding a resource
pub fn effective_luck(luck: i32) -> i32 {
    luck
}

pub fn effective_harvesting(harvesting: i32) -> i32 {
    harvesting
}

/// Boss damage multiplier. May drop below 1 with negative modifiers.
pub fn boss_damage_multiplier(boss_damage_pct: i32) -> f64 {
    1.0 + boss_damage_pct as f64 / 100.0
}

/// Damage multiplier from several percentage sources (e.g. global + typed), never negative
pub fn damage_multiplier(percents: &[i32]) -> f64 {
    let sum: f64 = percents.iter().map(|&p| p as f64).sum();
    (1.0 + sum / 100.0).max(0.0)
}
