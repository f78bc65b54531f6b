//! Dice, coin flips and weighted rolls
//!
//! Every random decision in the game goes through [`RandomSource`], so a run
//! can be replayed from its seed and tests can script exact rolls.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform randomness plus the derived rolls the game uses
pub trait RandomSource {
    /// Uniform float in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[lo, hi]`. Returns `lo` when `hi <= lo`.
    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64;

    /// Roll an n-sided die: uniform in `[1, sides]`
    fn die(&mut self, sides: u32) -> u32 {
        self.range_inclusive(1, sides.max(1) as i64) as u32
    }

    fn d6(&mut self) -> u32 {
        self.die(6)
    }

    fn d8(&mut self) -> u32 {
        self.die(8)
    }

    fn d10(&mut self) -> u32 {
        self.die(10)
    }

    fn d12(&mut self) -> u32 {
        self.die(12)
    }

    fn d20(&mut self) -> u32 {
        self.die(20)
    }

    fn d100(&mut self) -> u32 {
        self.die(100)
    }

    /// Bernoulli trial. `p >= 1` always succeeds and `p <= 0` always fails,
    /// neither consumes a roll.
    fn chance(&mut self, p: f64) -> bool {
        if p >= 1.0 {
            return true;
        }
        if p <= 0.0 || p.is_nan() {
            return false;
        }
        self.next_unit() < p
    }

    /// Pick index `i` with probability `weights[i] / sum(weights)`.
    ///
    /// Negative and non-finite weights count as zero. When every weight is
    /// zero the last index is returned; an empty slice yields 0.
    fn weighted_index(&mut self, weights: &[f64]) -> usize {
        if weights.is_empty() {
            return 0;
        }
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let total: f64 = weights.iter().map(|&w| clean(w)).sum();
        if total <= 0.0 {
            return weights.len() - 1;
        }

        let roll = self.next_unit() * total;
        let mut running = 0.0;
        let mut last_positive = weights.len() - 1;
        for (i, &w) in weights.iter().enumerate() {
            let w = clean(w);
            if w == 0.0 {
                continue;
            }
            last_positive = i;
            running += w;
            if roll < running {
                return i;
            }
        }
        // Float drift past the final bucket
        last_positive
    }

    /// Uniform index into a collection of `len` items (0 when `len <= 1`)
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.range_inclusive(0, len as i64 - 1) as usize
    }

    /// Uniform float in `[lo, hi)`
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

/// Seeded ChaCha dice used by real game sessions
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl RandomSource for Dice {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

/// Pre-recorded rolls for tests.
///
/// Unit rolls and integer rolls are consumed from separate queues. Once a
/// queue is empty, unit rolls return `fallback_unit` and integer rolls return
/// the low end of the requested range. Integer rolls are clamped into range.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    units: VecDeque<f64>,
    ints: VecDeque<i64>,
    pub fallback_unit: f64,
}

impl ScriptedRolls {
    pub fn new(units: impl IntoIterator<Item = f64>, ints: impl IntoIterator<Item = i64>) -> Self {
        Self {
            units: units.into_iter().collect(),
            ints: ints.into_iter().collect(),
            fallback_unit: 0.5,
        }
    }

    pub fn with_fallback(mut self, unit: f64) -> Self {
        self.fallback_unit = unit;
        self
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.fallback_unit)
    }

    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.ints.pop_front().map_or(lo, |v| v.clamp(lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_die_stays_in_range() {
        let mut dice = Dice::seeded(7);
        for sides in [6, 8, 10, 12, 20, 100] {
            for _ in 0..500 {
                let roll = dice.die(sides);
                assert!((1..=sides).contains(&roll));
            }
        }
    }

    #[test]
    fn test_chance_extremes_never_roll() {
        let mut rolls = ScriptedRolls::new([], []).with_fallback(0.999);
        assert!(rolls.chance(1.0));
        assert!(rolls.chance(1.7));
        assert!(!rolls.chance(0.0));
        assert!(!rolls.chance(-0.3));
    }

    #[test]
    fn test_all_zero_weights_pick_last() {
        let mut dice = Dice::seeded(1);
        assert_eq!(dice.weighted_index(&[0.0, 0.0, 0.0]), 2);
    }

    #[test]
    fn test_empty_weights_pick_zero() {
        let mut dice = Dice::seeded(1);
        assert_eq!(dice.weighted_index(&[]), 0);
    }

    #[test]
    fn test_zero_weight_entries_never_chosen() {
        let mut dice = Dice::seeded(99);
        for _ in 0..2_000 {
            let idx = dice.weighted_index(&[0.0, 3.0, 0.0, 1.0, 0.0]);
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn test_weighted_index_uses_roll_position() {
        // Total 10: roll 0.05 -> 0.5 (bucket 0), 0.5 -> 5.0 (bucket 1), 0.95 -> 9.5 (bucket 2)
        let mut rolls = ScriptedRolls::new([0.05, 0.5, 0.95], []);
        let weights = [2.0, 5.0, 3.0];
        assert_eq!(rolls.weighted_index(&weights), 0);
        assert_eq!(rolls.weighted_index(&weights), 1);
        assert_eq!(rolls.weighted_index(&weights), 2);
    }

    #[test]
    fn test_seeded_dice_replay() {
        let mut a = Dice::seeded(42);
        let mut b = Dice::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.d20(), b.d20());
        }
    }

    #[test]
    fn test_scripted_ints_clamp() {
        let mut rolls = ScriptedRolls::new([], [50, -4]);
        assert_eq!(rolls.range_inclusive(1, 6), 6);
        assert_eq!(rolls.range_inclusive(1, 6), 1);
        assert_eq!(rolls.range_inclusive(3, 9), 3);
    }
}
