//! Configuration for an absorption analysis.

use serde::{Deserialize, Serialize};

use crate::dice::DiceRule;
use crate::error::{LcrError, LcrResult};

/// How rolls are expanded while building equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollExpansion {
    /// One entry per distinct face tally (multinomial weights).
    #[default]
    Tallies,
    /// One entry per ordered face sequence, merged afterwards.
    Sequences,
}

/// Configuration for building and solving the absorption system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    /// How many dice a pile rolls.
    pub dice: DiceRule,
    /// How rolls are expanded into successor states.
    pub expansion: RollExpansion,
    /// Upper bound on transient states discovered during exploration.
    pub max_states: usize,
    /// Solve per-winner right-hand sides on the rayon pool.
    pub parallel: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            dice: DiceRule::Exact,
            expansion: RollExpansion::Tallies,
            max_states: 20_000,
            parallel: true,
        }
    }
}

impl SolveConfig {
    /// Set the dice rule.
    pub fn with_dice(mut self, dice: DiceRule) -> Self {
        self.dice = dice;
        self
    }

    /// Set the roll expansion mode.
    pub fn with_expansion(mut self, expansion: RollExpansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Set the transient state limit.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Enable or disable parallel per-winner solves.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject values that cannot produce a meaningful analysis.
    pub fn validate(&self) -> LcrResult<()> {
        self.dice.validate()?;
        if self.max_states == 0 {
            return Err(LcrError::InvalidConfig(
                "max_states must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
