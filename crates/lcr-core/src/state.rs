//! Game configurations: whose turn it is and how many chips each seat holds.
//!
//! A [`State`] is immutable once built. Its derived `Eq`/`Hash`/`Ord` over
//! `(turn, chips)` is the canonical identity used for duplicate detection.

use serde::{Deserialize, Serialize};

use crate::error::{LcrError, LcrResult};
use crate::validate::validate_chips;

/// A game configuration at the start of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "StateParts")]
pub struct State {
    turn: usize,
    chips: Vec<u32>,
}

/// Unchecked wire form; deserialization goes through [`State::new`].
#[derive(Deserialize)]
struct StateParts {
    turn: usize,
    chips: Vec<u32>,
}

impl TryFrom<StateParts> for State {
    type Error = LcrError;

    fn try_from(parts: StateParts) -> LcrResult<Self> {
        Self::new(parts.turn, parts.chips)
    }
}

impl State {
    /// Build a state, checking that `turn` names a seat holding chips.
    pub fn new(turn: usize, chips: Vec<u32>) -> LcrResult<Self> {
        validate_chips(&chips)?;
        if turn >= chips.len() {
            return Err(LcrError::PositionOutOfRange {
                position: turn,
                positions: chips.len(),
            });
        }
        if chips[turn] == 0 {
            return Err(LcrError::EmptyTurn { turn });
        }
        Ok(Self { turn, chips })
    }

    /// Build the opening state: the first seat holding chips acts first.
    pub fn opening(chips: Vec<u32>) -> LcrResult<Self> {
        validate_chips(&chips)?;
        let turn = chips
            .iter()
            .position(|&c| c > 0)
            .ok_or(LcrError::NoChips)?;
        Ok(Self { turn, chips })
    }

    /// Build a state whose invariants the caller has already established.
    pub(crate) fn from_parts(turn: usize, chips: Vec<u32>) -> Self {
        debug_assert!(chips.get(turn).is_some_and(|&c| c > 0));
        Self { turn, chips }
    }

    /// The acting position.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Chip counts indexed by position.
    pub fn chips(&self) -> &[u32] {
        &self.chips
    }

    /// Number of seats at the table.
    pub fn positions(&self) -> usize {
        self.chips.len()
    }

    /// Chips held by the acting position.
    pub fn acting_chips(&self) -> u32 {
        self.chips[self.turn]
    }

    /// Total chips still held by players.
    pub fn chips_in_play(&self) -> u32 {
        self.chips.iter().sum()
    }

    /// The single position holding chips, if the game is over.
    pub fn holder(&self) -> Option<usize> {
        let mut holders = self.chips.iter().enumerate().filter(|(_, c)| **c > 0);
        match (holders.next(), holders.next()) {
            (Some((position, _)), None) => Some(position),
            _ => None,
        }
    }

    /// True when exactly one position holds chips.
    pub fn is_ending(&self) -> bool {
        self.holder().is_some()
    }

    /// True when the game is over and `position` holds every remaining chip.
    pub fn is_winning_for(&self, position: usize) -> LcrResult<bool> {
        if position >= self.chips.len() {
            return Err(LcrError::PositionOutOfRange {
                position,
                positions: self.chips.len(),
            });
        }
        Ok(self.holder() == Some(position))
    }

    /// Rotate seats so that position `p` becomes `(p + by) mod n`.
    pub fn rotated(&self, by: usize) -> Self {
        let n = self.chips.len();
        let mut chips = vec![0; n];
        for (position, &count) in self.chips.iter().enumerate() {
            chips[(position + by) % n] = count;
        }
        Self {
            turn: (self.turn + by) % n,
            chips,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, count) in self.chips.iter().enumerate() {
            if position == self.turn {
                write!(f, "({count})")?;
            } else {
                write!(f, "{count}")?;
            }
        }
        Ok(())
    }
}
