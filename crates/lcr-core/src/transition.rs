//! Applying a roll to a state.
//!
//! Left passes a chip to the next position (`turn + 1`), Right to the
//! previous one (`turn - 1`), Center removes it from play, Dot keeps it.
//! The turn then moves forward to the next seat still holding chips.

use crate::dice::{Face, RollTally};
use crate::error::{LcrError, LcrResult};
use crate::state::State;

/// Seat after `position`, wrapping around the table.
pub fn next_position(position: usize, positions: usize) -> usize {
    (position + 1) % positions
}

/// Seat before `position`, wrapping around the table.
pub fn previous_position(position: usize, positions: usize) -> usize {
    (position + positions - 1) % positions
}

/// First seat strictly after `current` holding chips, wrapping back to
/// `current` itself if nobody else does. `None` when no seat holds chips.
pub fn next_turn(current: usize, chips: &[u32]) -> Option<usize> {
    let n = chips.len();
    (1..=n)
        .map(|step| (current + step) % n)
        .find(|&position| chips[position] > 0)
}

/// Apply an ordered roll to `state`.
pub fn next_state(state: &State, roll: &[Face]) -> LcrResult<State> {
    apply_tally(state, &RollTally::of_faces(roll))
}

/// Apply a face tally to `state`. Face order never matters: every moving
/// face takes exactly one chip from the acting position.
pub fn apply_tally(state: &State, tally: &RollTally) -> LcrResult<State> {
    let turn = state.turn();
    let n = state.positions();
    if tally.moved() > state.acting_chips() {
        return Err(LcrError::InvariantViolation(format!(
            "roll moves {} chips but position {turn} holds {} in {state}",
            tally.moved(),
            state.acting_chips()
        )));
    }

    let mut chips = state.chips().to_vec();
    chips[turn] -= tally.moved();
    receive(&mut chips, next_position(turn, n), tally.left)?;
    receive(&mut chips, previous_position(turn, n), tally.right)?;

    let next = next_turn(turn, &chips).ok_or_else(|| {
        LcrError::InvariantViolation(format!("no chips left in play after a roll from {state}"))
    })?;
    Ok(State::from_parts(next, chips))
}

fn receive(chips: &mut [u32], position: usize, passed: u32) -> LcrResult<()> {
    chips[position] = chips[position]
        .checked_add(passed)
        .ok_or(LcrError::ChipOverflow)?;
    Ok(())
}
