//! Roll enumeration with per-dice-count memoization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Face;
use crate::error::{LcrError, LcrResult};

/// An ordered sequence of faces, one per die thrown.
pub type Roll = Vec<Face>;

/// Largest dice count whose full face sequence product is materialized.
pub const MAX_SEQUENCE_DICE: u32 = 10;

/// One ordered roll and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Faces in throw order.
    pub faces: Roll,
    /// Product of the per-face probabilities.
    pub probability: f64,
}

/// Order-free summary of a roll: how many of each face came up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollTally {
    /// Chips passed to the next position.
    pub left: u32,
    /// Chips discarded to the center pot.
    pub center: u32,
    /// Chips passed to the previous position.
    pub right: u32,
    /// Dice that kept their chip.
    pub dot: u32,
    /// Probability of any roll with these counts.
    pub probability: f64,
}

impl RollTally {
    /// Count the faces of an ordered roll. The probability is the product of
    /// the individual faces, i.e. that of this one ordering.
    pub fn of_faces(faces: &[Face]) -> Self {
        let mut tally = Self {
            left: 0,
            center: 0,
            right: 0,
            dot: 0,
            probability: 1.0,
        };
        for &face in faces {
            match face {
                Face::Left => tally.left += 1,
                Face::Center => tally.center += 1,
                Face::Right => tally.right += 1,
                Face::Dot => tally.dot += 1,
            }
            tally.probability *= face.probability();
        }
        tally
    }

    /// Dice that move a chip away from the acting position.
    pub fn moved(&self) -> u32 {
        self.left + self.center + self.right
    }

    /// Total dice in the roll.
    pub fn dice(&self) -> u32 {
        self.moved() + self.dot
    }
}

/// Enumerates every roll of `n` dice, memoized per `n`.
///
/// Owned by one exploration; nothing is shared between computations.
#[derive(Debug, Default)]
pub struct RollEnumerator {
    sequences: HashMap<u32, Vec<RollOutcome>>,
    tallies: HashMap<u32, Vec<RollTally>>,
    log_factorials: Vec<f64>,
}

impl RollEnumerator {
    /// Create an enumerator with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Cartesian product `{L, C, R, Dot}^dice`, one entry per ordering.
    ///
    /// Refuses dice counts above [`MAX_SEQUENCE_DICE`]; use
    /// [`tallies`](Self::tallies) for those.
    pub fn outcomes(&mut self, dice: u32) -> LcrResult<&[RollOutcome]> {
        if dice > MAX_SEQUENCE_DICE {
            return Err(LcrError::InvalidConfig(format!(
                "sequence expansion supports at most {MAX_SEQUENCE_DICE} dice, got {dice}"
            )));
        }
        let outcomes = self.sequences.entry(dice).or_insert_with(|| {
            let outcomes = cartesian(dice);
            tracing::trace!(dice, outcomes = outcomes.len(), "cached roll sequences");
            outcomes
        });
        Ok(outcomes.as_slice())
    }

    /// Every distinct face tally for `dice` dice with multinomial probability.
    pub fn tallies(&mut self, dice: u32) -> &[RollTally] {
        let log_factorials = &mut self.log_factorials;
        self.tallies
            .entry(dice)
            .or_insert_with(|| {
                let tallies = build_tallies(log_factorials, dice);
                tracing::trace!(dice, tallies = tallies.len(), "cached roll tallies");
                tallies
            })
            .as_slice()
    }
}

/// Every distinct tally with its multinomial probability. Weights are taken
/// in log space: `n!` overflows `f64` past 170 dice.
fn build_tallies(log_factorials: &mut Vec<f64>, dice: u32) -> Vec<RollTally> {
    let ln_side = Face::Left.probability().ln();
    let ln_dot = Face::Dot.probability().ln();
    let ln_total = ln_factorial(log_factorials, dice);
    let mut tallies = Vec::new();
    for left in 0..=dice {
        for center in 0..=dice - left {
            for right in 0..=dice - left - center {
                let dots = dice - left - center - right;
                let ln_arrangements = ln_total
                    - ln_factorial(log_factorials, left)
                    - ln_factorial(log_factorials, center)
                    - ln_factorial(log_factorials, right)
                    - ln_factorial(log_factorials, dots);
                let moved = f64::from(left + center + right);
                let probability =
                    (ln_arrangements + moved * ln_side + f64::from(dots) * ln_dot).exp();
                // Drop tallies too unlikely to represent.
                if probability > 0.0 {
                    tallies.push(RollTally {
                        left,
                        center,
                        right,
                        dot: dots,
                        probability,
                    });
                }
            }
        }
    }
    tallies
}

/// `ln k!`, extending the cache as needed.
fn ln_factorial(cache: &mut Vec<f64>, k: u32) -> f64 {
    if cache.is_empty() {
        cache.push(0.0);
    }
    while cache.len() <= k as usize {
        let next = (cache.len() as f64).ln();
        let last = cache[cache.len() - 1];
        cache.push(last + next);
    }
    cache[k as usize]
}

fn cartesian(dice: u32) -> Vec<RollOutcome> {
    let mut outcomes = vec![RollOutcome {
        faces: Vec::new(),
        probability: 1.0,
    }];
    for _ in 0..dice {
        outcomes = outcomes
            .into_iter()
            .flat_map(|prefix| {
                Face::ALL.into_iter().map(move |face| {
                    let mut faces = prefix.faces.clone();
                    faces.push(face);
                    RollOutcome {
                        faces,
                        probability: prefix.probability * face.probability(),
                    }
                })
            })
            .collect();
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same_counts(a: &RollTally, b: &RollTally) -> bool {
        (a.left, a.center, a.right, a.dot) == (b.left, b.center, b.right, b.dot)
    }

    #[test]
    fn outcomes_cover_cartesian_product() {
        let mut rolls = RollEnumerator::new();
        for dice in 0..=4 {
            let outcomes = rolls.outcomes(dice).unwrap();
            assert_eq!(outcomes.len(), 4usize.pow(dice));
            let total: f64 = outcomes.iter().map(|o| o.probability).sum();
            assert!((total - 1.0).abs() < 1e-12, "dice={dice} total={total}");
            assert!(outcomes.iter().all(|o| o.faces.len() == dice as usize));
        }
    }

    #[test]
    fn outcomes_refuse_huge_products() {
        let mut rolls = RollEnumerator::new();
        assert!(matches!(
            rolls.outcomes(MAX_SEQUENCE_DICE + 1),
            Err(LcrError::InvalidConfig(_))
        ));
    }

    #[test]
    fn single_die_tallies() {
        let mut rolls = RollEnumerator::new();
        let tallies = rolls.tallies(1);
        assert_eq!(tallies.len(), 4);
        let dot = tallies.iter().find(|t| t.dot == 1).unwrap();
        assert!((dot.probability - 0.5).abs() < 1e-12);
        let left = tallies.iter().find(|t| t.left == 1).unwrap();
        assert!((left.probability - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn tallies_count_and_sum() {
        let mut rolls = RollEnumerator::new();
        for dice in 0..=12u32 {
            let tallies = rolls.tallies(dice);
            let expected = ((dice + 1) * (dice + 2) * (dice + 3) / 6) as usize;
            assert_eq!(tallies.len(), expected);
            let total: f64 = tallies.iter().map(|t| t.probability).sum();
            assert!((total - 1.0).abs() < 1e-9, "dice={dice} total={total}");
            assert!(tallies.iter().all(|t| t.dice() == dice));
        }
    }

    #[test]
    fn tallies_merge_sequences() {
        let mut rolls = RollEnumerator::new();
        for dice in 1..=5 {
            let sequences: Vec<RollTally> = rolls
                .outcomes(dice)
                .unwrap()
                .iter()
                .map(|o| RollTally::of_faces(&o.faces))
                .collect();
            for tally in rolls.tallies(dice) {
                let merged: f64 = sequences
                    .iter()
                    .filter(|s| same_counts(s, tally))
                    .map(|s| s.probability)
                    .sum();
                assert!((merged - tally.probability).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn tally_of_faces() {
        let tally = RollTally::of_faces(&[Face::Left, Face::Dot, Face::Center]);
        assert_eq!((tally.left, tally.center, tally.right, tally.dot), (1, 1, 0, 1));
        assert_eq!(tally.moved(), 2);
        assert!((tally.probability - 1.0 / 72.0).abs() < 1e-12);
    }

    #[test]
    fn tallies_beyond_float_factorials_stay_finite() {
        let mut rolls = RollEnumerator::new();
        for dice in [170, 171, 200] {
            let tallies = rolls.tallies(dice);
            assert!(tallies.iter().all(|t| t.probability.is_finite() && t.probability > 0.0));
            let total: f64 = tallies.iter().map(|t| t.probability).sum();
            assert!((total - 1.0).abs() < 1e-9, "dice={dice} total={total}");
        }
    }

    #[test]
    fn caches_are_reused() {
        let mut rolls = RollEnumerator::new();
        let first = rolls.tallies(3).as_ptr();
        let second = rolls.tallies(3).as_ptr();
        assert_eq!(first, second);
    }
}
