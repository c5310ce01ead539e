//! LCR dice: faces, how many dice a pile rolls, and roll enumeration.
//!
//! A standard LCR die has six sides: one Left, one Center, one Right and
//! three dots. Rolls are enumerated either as ordered face sequences or as
//! order-free tallies; see [`RollEnumerator`].

pub mod roll;

pub use roll::{Roll, RollEnumerator, RollOutcome, RollTally};

use serde::{Deserialize, Serialize};

use crate::error::{LcrError, LcrResult};

/// One face of an LCR die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    /// Pass a chip to the next position.
    Left,
    /// Discard a chip to the center pot.
    Center,
    /// Pass a chip to the previous position.
    Right,
    /// Keep the chip.
    Dot,
}

impl Face {
    /// Every face, in enumeration order.
    pub const ALL: [Face; 4] = [Face::Left, Face::Center, Face::Right, Face::Dot];

    /// Probability of this face on a single throw.
    pub fn probability(self) -> f64 {
        match self {
            Self::Left | Self::Center | Self::Right => 1.0 / 6.0,
            Self::Dot => 0.5,
        }
    }

    /// Map a physical die side (1-6) to its face.
    pub fn from_side(side: u32) -> Option<Self> {
        match side {
            1 => Some(Self::Left),
            2 => Some(Self::Center),
            3 => Some(Self::Right),
            4..=6 => Some(Self::Dot),
            _ => None,
        }
    }

    /// Single-character label used when printing rolls.
    pub fn symbol(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Center => 'C',
            Self::Right => 'R',
            Self::Dot => '.',
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// How many dice a pile of chips rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiceRule {
    /// One die per chip. Exact model of the game.
    #[default]
    Exact,
    /// At most this many dice; extra chips stay put. Approximation of the
    /// exact model (and the common "three dice" table rule).
    Capped(u32),
}

impl DiceRule {
    /// Number of dice thrown by a pile of `chips`.
    pub fn dice_for(self, chips: u32) -> u32 {
        match self {
            Self::Exact => chips,
            Self::Capped(cap) => chips.min(cap),
        }
    }

    /// Reject caps that would stall the game.
    pub fn validate(self) -> LcrResult<()> {
        match self {
            Self::Capped(0) => Err(LcrError::InvalidConfig(
                "dice cap must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }

    /// True for the opt-in approximation.
    pub fn is_approximate(self) -> bool {
        matches!(self, Self::Capped(_))
    }
}

impl std::fmt::Display for DiceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Capped(cap) => write!(f, "capped at {cap} (approximate)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_probabilities_sum_to_one() {
        let total: f64 = Face::ALL.iter().map(|f| f.probability()).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((Face::Dot.probability() - 3.0 * Face::Left.probability()).abs() < 1e-12);
    }

    #[test]
    fn sides_map_to_faces() {
        assert_eq!(Face::from_side(1), Some(Face::Left));
        assert_eq!(Face::from_side(2), Some(Face::Center));
        assert_eq!(Face::from_side(3), Some(Face::Right));
        for side in 4..=6 {
            assert_eq!(Face::from_side(side), Some(Face::Dot));
        }
        assert_eq!(Face::from_side(0), None);
        assert_eq!(Face::from_side(7), None);
    }

    #[test]
    fn dice_rule_counts() {
        assert_eq!(DiceRule::Exact.dice_for(5), 5);
        assert_eq!(DiceRule::Capped(3).dice_for(5), 3);
        assert_eq!(DiceRule::Capped(3).dice_for(2), 2);
        assert!(DiceRule::Capped(0).validate().is_err());
        assert!(DiceRule::Capped(3).is_approximate());
        assert!(!DiceRule::Exact.is_approximate());
    }

    #[test]
    fn display() {
        assert_eq!(Face::Dot.to_string(), ".");
        assert_eq!(DiceRule::Exact.to_string(), "exact");
        assert_eq!(DiceRule::Capped(3).to_string(), "capped at 3 (approximate)");
    }
}
