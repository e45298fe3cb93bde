//! Flux core instability
//!
//! Net instability is `FluxInstabilityPct - FluxStabilityFlat`, clamped to
//! [0, 100]. Higher tiers include the drawbacks of the lower ones except
//! where noted:
//!
//! | Tier | Range | Effect |
//! |---|---|---|
//! | Stable | 0-25 | none |
//! | Flux Leak | 26-50 | 10% chance of a stray bullet |
//! | Core Fracture | 51-75 | 20% bullet split, max HP x0.85 |
//! | Critical Mass | 76-99 | damage x1.5, 2 HP/s drain |
//! | Meltdown | 100 | 5 HP/s drain, 100 dmg/s aura (150 px) |

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const RANDOM_BULLET_CHANCE: f64 = 0.10;
pub const BULLET_SPLIT_CHANCE: f64 = 0.20;
pub const FRACTURE_MAX_HP_MUL: f64 = 0.85;
pub const CRITICAL_MASS_DAMAGE_MUL: f64 = 1.5;
pub const MELTDOWN_AURA_DPS: f64 = 100.0;
pub const MELTDOWN_AURA_RADIUS_PX: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstabilityTier {
    Stable,
    FluxLeak,
    CoreFracture,
    CriticalMass,
    Meltdown,
}

impl InstabilityTier {
    /// Tier for a net instability percentage
    pub fn from_pct(instability_pct: i32) -> Self {
        match instability_pct {
            i32::MIN..=25 => InstabilityTier::Stable,
            26..=50 => InstabilityTier::FluxLeak,
            51..=75 => InstabilityTier::CoreFracture,
            76..=99 => InstabilityTier::CriticalMass,
            _ => InstabilityTier::Meltdown,
        }
    }

    /// 1 for Stable up to 5 for Meltdown
    pub fn level(self) -> u8 {
        self as u8 + 1
    }

    pub fn max_hp_multiplier(self) -> f64 {
        if self >= InstabilityTier::CoreFracture {
            FRACTURE_MAX_HP_MUL
        } else {
            1.0
        }
    }

    /// Only Critical Mass grants bonus damage; Meltdown trades it for the aura
    pub fn damage_multiplier(self) -> f64 {
        if self == InstabilityTier::CriticalMass {
            CRITICAL_MASS_DAMAGE_MUL
        } else {
            1.0
        }
    }

    pub fn hp_drain_per_sec(self) -> f64 {
        match self {
            InstabilityTier::Meltdown => 5.0,
            InstabilityTier::CriticalMass => 2.0,
            _ => 0.0,
        }
    }

    pub fn has_meltdown_aura(self) -> bool {
        self == InstabilityTier::Meltdown
    }

    /// Roll whether a shot spawns an extra stray bullet
    pub fn roll_random_bullet(self, rng: &mut impl Rng) -> bool {
        self >= InstabilityTier::FluxLeak && rng.gen::<f64>() < RANDOM_BULLET_CHANCE
    }

    /// Roll whether a bullet splits on firing
    pub fn roll_bullet_split(self, rng: &mut impl Rng) -> bool {
        self >= InstabilityTier::CoreFracture && rng.gen::<f64>() < BULLET_SPLIT_CHANCE
    }
}

impl fmt::Display for InstabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstabilityTier::Stable => write!(f, "Stable"),
            InstabilityTier::FluxLeak => write!(f, "Flux Leak"),
            InstabilityTier::CoreFracture => write!(f, "Core Fracture"),
            InstabilityTier::CriticalMass => write!(f, "Critical Mass"),
            InstabilityTier::Meltdown => write!(f, "MELTDOWN"),
        }
    }
}

/// Net instability in [0, 100]
pub fn net_instability_pct(instability_pct: i32, stability: i32) -> i32 {
    (instability_pct as i64 - stability as i64).clamp(0, 100) as i32
}

/// Damage multiplier from core overcharge, scaled by how unstable the core is
pub fn overcharge_multiplier(overcharge_pct: i32, net_instability_pct: i32) -> f64 {
    let instability = net_instability_pct.clamp(0, 100) as f64 / 100.0;
    1.0 + overcharge_pct.max(0) as f64 / 100.0 * instability
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(InstabilityTier::from_pct(-40), InstabilityTier::Stable);
        assert_eq!(InstabilityTier::from_pct(25), InstabilityTier::Stable);
        assert_eq!(InstabilityTier::from_pct(26), InstabilityTier::FluxLeak);
        assert_eq!(InstabilityTier::from_pct(51), InstabilityTier::CoreFracture);
        assert_eq!(InstabilityTier::from_pct(76), InstabilityTier::CriticalMass);
        assert_eq!(InstabilityTier::from_pct(99), InstabilityTier::CriticalMass);
        assert_eq!(InstabilityTier::from_pct(100), InstabilityTier::Meltdown);
        assert_eq!(InstabilityTier::Meltdown.level(), 5);
    }

    #[test]
    fn test_tier_effects() {
        assert_eq!(InstabilityTier::FluxLeak.max_hp_multiplier(), 1.0);
        assert_eq!(InstabilityTier::Meltdown.max_hp_multiplier(), FRACTURE_MAX_HP_MUL);
        assert_eq!(InstabilityTier::CriticalMass.damage_multiplier(), 1.5);
        assert_eq!(InstabilityTier::Meltdown.damage_multiplier(), 1.0);
        assert_eq!(InstabilityTier::CriticalMass.hp_drain_per_sec(), 2.0);
        assert_eq!(InstabilityTier::Meltdown.hp_drain_per_sec(), 5.0);
        assert!(InstabilityTier::Meltdown.has_meltdown_aura());
        assert!(!InstabilityTier::CriticalMass.has_meltdown_aura());
    }

    #[test]
    fn test_rolls_gated_by_tier() {
        // StepRng(0, 0) always draws 0.0, which is under every chance
        let mut rng = StepRng::new(0, 0);
        assert!(!InstabilityTier::Stable.roll_random_bullet(&mut rng));
        assert!(InstabilityTier::FluxLeak.roll_random_bullet(&mut rng));
        assert!(!InstabilityTier::FluxLeak.roll_bullet_split(&mut rng));
        assert!(InstabilityTier::Meltdown.roll_bullet_split(&mut rng));
    }

    #[test]
    fn test_net_instability() {
        assert_eq!(net_instability_pct(45, 10), 35);
        assert_eq!(net_instability_pct(10, 45), 0);
        assert_eq!(net_instability_pct(250, 0), 100);
        assert_eq!(net_instability_pct(i32::MAX, i32::MIN), 100);
    }

    #[test]
    fn test_overcharge() {
        assert_eq!(overcharge_multiplier(40, 0), 1.0);
        assert!((overcharge_multiplier(40, 50) - 1.2).abs() < 1e-12);
        assert_eq!(overcharge_multiplier(-40, 100), 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(InstabilityTier::CoreFracture.to_string(), "Core Fracture");
    }
}
