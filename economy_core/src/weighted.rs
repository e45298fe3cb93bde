//! Weighted - Luck-biased weights and cumulative roulette selection

use rand::Rng;

/// Luck-biased integer weight: `max(1, round(base * (1 + max(0, luck) * factor * rank)))`
///
/// Negative luck never lowers a weight below its base.
pub fn luck_weight(base_weight: u32, luck: i32, factor: f64, rank: u32) -> u32 {
    let bias = 1.0 + luck.max(0) as f64 * factor * rank as f64;
    let weight = (base_weight as f64 * bias).round();
    // `as` saturates, so huge luck cannot wrap
    (weight as u32).max(1)
}

/// Cumulative-weight roulette over a uniform draw in `[0, total)`
///
/// Returns `None` only for an empty slice.
pub fn pick_weighted<'a, T, R: Rng>(
    entries: &'a [T],
    weight: impl Fn(&T) -> u32,
    rng: &mut R,
) -> Option<&'a T> {
    let weights: Vec<u64> = entries.iter().map(|e| weight(e) as u64).collect();
    pick_index(&weights, rng).map(|i| &entries[i])
}

/// Index chosen by cumulative-weight roulette. Zero total weight picks uniformly.
pub fn pick_index<R: Rng>(weights: &[u64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: u64 = weights.iter().sum();
    if total == 0 {
        return Some(rng.gen_range(0..weights.len()));
    }

    let mut roll = rng.gen_range(0..total);
    for (i, &w) in weights.iter().enumerate() {
        if roll < w {
            return Some(i);
        }
        roll -= w;
    }

    Some(weights.len() - 1)
}
