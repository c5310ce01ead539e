//! Input checks run before any exploration starts.

use crate::error::{LcrError, LcrResult};

/// Reject empty tables, tables with no chips in play, and tables whose
/// total would overflow while chips are passed around.
pub fn validate_chips(chips: &[u32]) -> LcrResult<()> {
    if chips.is_empty() {
        return Err(LcrError::NoPositions);
    }
    let total = chips
        .iter()
        .try_fold(0u32, |sum, &c| sum.checked_add(c))
        .ok_or(LcrError::ChipOverflow)?;
    if total == 0 {
        return Err(LcrError::NoChips);
    }
    Ok(())
}

/// Reject a position index outside `[0, positions)`.
pub fn validate_position(position: usize, positions: usize) -> LcrResult<()> {
    if position >= positions {
        return Err(LcrError::PositionOutOfRange {
            position,
            positions,
        });
    }
    Ok(())
}

/// Validate a `(winner, chips)` query.
pub fn validate_query(winner: usize, chips: &[u32]) -> LcrResult<()> {
    validate_chips(chips)?;
    validate_position(winner, chips.len())
}
