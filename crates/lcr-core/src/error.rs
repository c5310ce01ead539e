//! Error types for the LCR solver.

/// Errors that can occur while validating input, exploring states, or solving.
#[derive(Debug, thiserror::Error)]
pub enum LcrError {
    /// The chip list is empty.
    #[error("at least one position is required")]
    NoPositions,

    /// A winner or turn index does not name a seat at the table.
    #[error("position {position} is out of range for {positions} position(s)")]
    PositionOutOfRange {
        /// The offending zero-based index.
        position: usize,
        /// Number of positions at the table.
        positions: usize,
    },

    /// Every position holds zero chips.
    #[error("no chips in play")]
    NoChips,

    /// The chips at the table add up to more than a `u32` can count.
    #[error("total chip count exceeds {max}", max = u32::MAX)]
    ChipOverflow,

    /// The acting position holds no chips.
    #[error("position {turn} cannot act: it holds no chips")]
    EmptyTurn {
        /// The zero-based acting position.
        turn: usize,
    },

    /// A solver configuration value is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Exploration discovered more transient states than allowed.
    #[error("state space exceeds the limit of {limit} transient states")]
    StateLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// Matrix and vector shapes passed to a solver disagree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimension implied by the matrix.
        expected: usize,
        /// The dimension that was supplied.
        found: usize,
    },

    /// The linear system has no unique solution.
    #[error("singular linear system at pivot column {pivot}; equation construction is inconsistent")]
    SingularSystem {
        /// The column where elimination found no usable pivot.
        pivot: usize,
    },

    /// An internal invariant was broken.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Convenience result type for solver operations.
pub type LcrResult<T> = Result<T, LcrError>;
