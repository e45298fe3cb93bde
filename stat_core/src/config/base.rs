//! Player base values

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global base values instance
static BASE_STATS: OnceLock<BaseStats> = OnceLock::new();

/// Initialize the global base values from a TOML file
///
/// Returns error if already initialized or if loading fails.
pub fn init_base_stats(path: &Path) -> Result<(), ConfigError> {
    let base = BaseStats::load_from_path(path)?;
    BASE_STATS
        .set(base)
        .map_err(|_| ConfigError::ValidationError("BaseStats already initialized".to_string()))
}

/// Get the global base values, falling back to the defaults
pub fn base_stats() -> &'static BaseStats {
    BASE_STATS.get_or_init(BaseStats::default)
}

/// Ensure base values are initialized with defaults (idempotent, useful for tests)
pub fn ensure_base_stats_initialized() {
    BASE_STATS.get_or_init(BaseStats::default);
}

/// Fixed starting values of the player, combined with a ledger into
/// [`EffectiveStats`](crate::effective::EffectiveStats)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default = "default_max_hp")]
    pub max_hp: i32,
    /// Shots per second
    #[serde(default = "default_fire_rate")]
    pub fire_rate: f64,
    /// Scaled by the ranged damage multiplier
    #[serde(default = "default_bullet_damage")]
    pub bullet_damage: f64,
    #[serde(default = "default_range_px")]
    pub range_px: i32,
    #[serde(default = "default_unit_mul")]
    pub projectile_speed_mul: f64,
    #[serde(default = "default_unit_mul")]
    pub projectile_size_mul: f64,
    #[serde(default = "default_unit_mul")]
    pub move_speed_mul: f64,
    #[serde(default)]
    pub lifesteal_frac: f64,

    #[serde(default)]
    pub crit_chance_pct: i32,
    /// Added to the +50% base crit bonus
    #[serde(default)]
    pub crit_damage_extra_pct: i32,
    #[serde(default)]
    pub multishot: i32,
    #[serde(default)]
    pub pierce: i32,
    #[serde(default)]
    pub homing_chance_pct: i32,
    #[serde(default)]
    pub homing_strength_pct: i32,

    #[serde(default)]
    pub luck: i32,
    #[serde(default)]
    pub harvesting: i32,
    #[serde(default)]
    pub armor_pct: i32,
    #[serde(default)]
    pub dodge_pct: i32,
    #[serde(default)]
    pub range_points: i32,
    #[serde(default)]
    pub ranged_pct: i32,
    #[serde(default)]
    pub damage_pct: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            max_hp: default_max_hp(),
            fire_rate: default_fire_rate(),
            bullet_damage: default_bullet_damage(),
            range_px: default_range_px(),
            projectile_speed_mul: 1.0,
            projectile_size_mul: 1.0,
            move_speed_mul: 1.0,
            lifesteal_frac: 0.0,
            crit_chance_pct: 0,
            crit_damage_extra_pct: 0,
            multishot: 0,
            pierce: 0,
            homing_chance_pct: 0,
            homing_strength_pct: 0,
            luck: 0,
            harvesting: 0,
            armor_pct: 0,
            dodge_pct: 0,
            range_points: 0,
            ranged_pct: 0,
            damage_pct: 0,
        }
    }
}

impl BaseStats {
    /// Load base values from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse base values from a TOML string and validate them
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let base: BaseStats = toml::from_str(content)?;
        base.validate()?;
        Ok(base)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("fire_rate", self.fire_rate),
            ("projectile_speed_mul", self.projectile_speed_mul),
            ("projectile_size_mul", self.projectile_size_mul),
            ("move_speed_mul", self.move_speed_mul),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(self.bullet_damage.is_finite() && self.bullet_damage >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "bullet_damage must not be negative, got {}",
                self.bullet_damage
            )));
        }
        if !(self.lifesteal_frac.is_finite() && self.lifesteal_frac >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "lifesteal_frac must not be negative, got {}",
                self.lifesteal_frac
            )));
        }
        Ok(())
    }
}

fn default_max_hp() -> i32 {
    100
}
fn default_fire_rate() -> f64 {
    8.0
}
fn default_bullet_damage() -> f64 {
    20.0
}
fn default_range_px() -> i32 {
    700
}
fn default_unit_mul() -> f64 {
    1.0
}
