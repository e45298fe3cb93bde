//! StatLedger - Additive, unclamped accumulator of stat deltas
//!
//! Holds one signed integer per [`Stat`]. No caps or floors are applied here;
//! interpreting the totals is the job of [`crate::rules`] and
//! [`crate::effective::EffectiveStats`].

use arsenal_core::{Modifier, Stat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed-size additive stat container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "BTreeMap<Stat, i32>", from = "BTreeMap<Stat, i32>")]
pub struct StatLedger {
    values: [i32; Stat::COUNT],
}

impl StatLedger {
    /// Create an empty ledger (every stat 0)
    pub fn new() -> Self {
        StatLedger::default()
    }

    /// Create a ledger holding a single value
    pub fn of(stat: Stat, amount: i32) -> Self {
        let mut ledger = StatLedger::new();
        ledger.set(stat, amount);
        ledger
    }

    /// Create a ledger from a modifier list
    pub fn from_modifiers<'a>(modifiers: impl IntoIterator<Item = &'a Modifier>) -> Self {
        let mut ledger = StatLedger::new();
        ledger.apply_modifiers(modifiers);
        ledger
    }

    /// Raw, unmapped value of a stat
    pub fn get(&self, stat: Stat) -> i32 {
        self.values[stat.index()]
    }

    /// Overwrite the raw value of a stat
    pub fn set(&mut self, stat: Stat, value: i32) {
        self.values[stat.index()] = value;
    }

    /// Add a (possibly negative) delta to a stat
    pub fn add(&mut self, stat: Stat, delta: i32) {
        let slot = &mut self.values[stat.index()];
        *slot = slot.saturating_add(delta);
    }

    /// Add every modifier in the list
    pub fn apply_modifiers<'a>(&mut self, modifiers: impl IntoIterator<Item = &'a Modifier>) {
        for m in modifiers {
            self.add(m.stat, m.amount);
        }
    }

    /// Add all values of `other` to this ledger
    pub fn add_all(&mut self, other: &StatLedger) {
        for (mine, theirs) in self.values.iter_mut().zip(other.values.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
    }

    /// Subtract all values of `other` from this ledger
    pub fn sub_all(&mut self, other: &StatLedger) {
        for (mine, theirs) in self.values.iter_mut().zip(other.values.iter()) {
            *mine = mine.saturating_sub(*theirs);
        }
    }

    /// Multiply every value (negatives included) and round to the nearest integer
    ///
    /// Halves round towards positive infinity, so `-2.5` becomes `-2`.
    pub fn scale_all(&mut self, factor: f64) {
        for v in self.values.iter_mut() {
            // `as` saturates out-of-range floats and maps NaN to 0
            *v = (*v as f64 * factor + 0.5).floor() as i32;
        }
    }

    /// Reset every stat to 0
    pub fn clear(&mut self) {
        self.values = [0; Stat::COUNT];
    }

    /// Whether every stat is 0
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }

    /// Iterate over the non-zero entries in stat order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::all()
            .iter()
            .map(move |&stat| (stat, self.get(stat)))
            .filter(|&(_, v)| v != 0)
    }

    /// Sum any number of ledgers into a new one
    pub fn sum<'a>(ledgers: impl IntoIterator<Item = &'a StatLedger>) -> StatLedger {
        let mut out = StatLedger::new();
        for ledger in ledgers {
            out.add_all(ledger);
        }
        out
    }
}

impl From<StatLedger> for BTreeMap<Stat, i32> {
    fn from(ledger: StatLedger) -> Self {
        ledger.iter().collect()
    }
}

impl From<BTreeMap<Stat, i32>> for StatLedger {
    fn from(map: BTreeMap<Stat, i32>) -> Self {
        let mut ledger = StatLedger::new();
        for (stat, value) in map {
            ledger.set(stat, value);
        }
        ledger
    }
}

impl fmt::Display for StatLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatLedger{{")?;
        let mut first = true;
        for (stat, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{:?}={}", stat, value)?;
            first = false;
        }
        if first {
            write!(f, "empty")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_stat() -> impl Strategy<Value = Stat> {
        (0..Stat::COUNT).prop_map(|i| Stat::all()[i])
    }

    proptest! {
        #[test]
        fn prop_add_then_get(stat in any_stat(), x in -100_000i32..100_000) {
            let mut ledger = StatLedger::new();
            ledger.add(stat, x);
            prop_assert_eq!(ledger.get(stat), x);
        }

        #[test]
        fn prop_additive_inverse(stat in any_stat(), x in -100_000i32..100_000) {
            let mut ledger = StatLedger::new();
            ledger.add(stat, x);
            ledger.add(stat, -x);
            prop_assert_eq!(ledger.get(stat), 0);
            prop_assert!(ledger.is_empty());
        }

        #[test]
        fn prop_sub_all_undoes_add_all(a in any_stat(), b in any_stat(), x in -1000i32..1000, y in -1000i32..1000) {
            let mut base = StatLedger::of(a, x);
            let other = StatLedger::of(b, y);
            let before = base;
            base.add_all(&other);
            base.sub_all(&other);
            prop_assert_eq!(base, before);
        }
    }

    #[test]
    fn test_negative_values_kept() {
        let mut ledger = StatLedger::new();
        ledger.add(Stat::MaxHp, -500);
        assert_eq!(ledger.get(Stat::MaxHp), -500);
    }

    #[test]
    fn test_sum_of_ledgers() {
        let a = StatLedger::of(Stat::DamagePct, 10);
        let b = StatLedger::of(Stat::DamagePct, -4);
        let c = StatLedger::of(Stat::LuckFlat, 3);
        let total = StatLedger::sum([&a, &b, &c]);
        assert_eq!(total.get(Stat::DamagePct), 6);
        assert_eq!(total.get(Stat::LuckFlat), 3);
        // inputs untouched
        assert_eq!(a.get(Stat::DamagePct), 10);
    }

    #[test]
    fn test_scale_rounds_to_nearest() {
        let mut ledger = StatLedger::new();
        ledger.set(Stat::ArmorPct, 5);
        ledger.set(Stat::DodgePct, -5);
        ledger.set(Stat::MaxHp, 3);
        ledger.scale_all(0.5);
        assert_eq!(ledger.get(Stat::ArmorPct), 3);
        assert_eq!(ledger.get(Stat::DodgePct), -2);
        assert_eq!(ledger.get(Stat::MaxHp), 2);
    }

    #[test]
    fn test_saturating_add() {
        let mut ledger = StatLedger::of(Stat::LuckFlat, i32::MAX);
        ledger.add(Stat::LuckFlat, 1);
        assert_eq!(ledger.get(Stat::LuckFlat), i32::MAX);
    }

    #[test]
    fn test_clear_and_copy() {
        let mut ledger = StatLedger::of(Stat::PierceFlat, 2);
        let copy = ledger;
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(copy.get(Stat::PierceFlat), 2);
    }

    #[test]
    fn test_display_non_empty_only() {
        assert_eq!(StatLedger::new().to_string(), "StatLedger{empty}");
        let mut ledger = StatLedger::of(Stat::MaxHp, 5);
        ledger.add(Stat::ArmorPct, -3);
        assert_eq!(ledger.to_string(), "StatLedger{MaxHp=5, ArmorPct=-3}");
    }

    #[test]
    fn test_json_is_sparse_map() {
        let ledger = StatLedger::from_modifiers(&[
            Modifier::new(Stat::RangedPct, 6),
            Modifier::new(Stat::AttackSpeedPct, 4),
        ]);
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"ranged_pct":6,"attack_speed_pct":4}"#);
        let back: StatLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
