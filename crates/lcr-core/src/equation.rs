//! Exploring the reachable state graph into absorption equations.
//!
//! Every transient state `s` yields one equation
//! `x_s = Σ P(s→s') · x_s'` over its distinct successors. Exploration uses an
//! explicit worklist and a visited index keyed by the state itself, so deep
//! or cyclic graphs never recurse.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{RollExpansion, SolveConfig};
use crate::dice::{DiceRule, RollEnumerator};
use crate::error::{LcrError, LcrResult};
use crate::state::State;
use crate::transition::{apply_tally, next_state};

/// One successor of a state and the probability of reaching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// The successor state.
    pub state: State,
    /// Aggregated probability over every roll that reaches it.
    pub probability: f64,
}

/// The transition distribution out of one transient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    /// The state whose absorption probability this row defines.
    pub state: State,
    /// Distinct successors in first-seen order.
    pub expression: Vec<Term>,
}

impl Equation {
    /// Sum of the successor probabilities; 1 up to rounding.
    pub fn total_probability(&self) -> f64 {
        self.expression.iter().map(|t| t.probability).sum()
    }

    /// Probability of moving to `state` in one roll.
    pub fn probability_of(&self, state: &State) -> f64 {
        self.expression
            .iter()
            .find(|t| &t.state == state)
            .map_or(0.0, |t| t.probability)
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = ", self.state)?;
        for (i, term) in self.expression.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:.4}*{}", term.probability, term.state)?;
        }
        Ok(())
    }
}

/// Equations for every reachable transient state, each exactly once.
///
/// Row `i` of any system assembled from the set belongs to equation `i`.
/// When the start state is transient it is row 0.
#[derive(Debug, Clone, Default)]
pub struct EquationSet {
    equations: Vec<Equation>,
    index: HashMap<State, usize>,
}

impl EquationSet {
    /// Number of transient states.
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// True when the start state was already ending.
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Equations in discovery order.
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Row of `state`, if it is a recorded transient state.
    pub fn index_of(&self, state: &State) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Iterate over the equations in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, Equation> {
        self.equations.iter()
    }

    fn push(&mut self, equation: Equation) {
        self.index.insert(equation.state.clone(), self.equations.len());
        self.equations.push(equation);
    }
}

impl<'a> IntoIterator for &'a EquationSet {
    type Item = &'a Equation;
    type IntoIter = std::slice::Iter<'a, Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.iter()
    }
}

/// Successor accumulator that merges duplicate states.
#[derive(Debug, Default)]
struct Expression {
    terms: Vec<Term>,
    seen: HashMap<State, usize>,
}

impl Expression {
    fn add(&mut self, state: State, probability: f64) {
        match self.seen.get(&state) {
            Some(&i) => self.terms[i].probability += probability,
            None => {
                self.seen.insert(state.clone(), self.terms.len());
                self.terms.push(Term { state, probability });
            }
        }
    }
}

/// Builds equations from a start state. Owns the roll caches for one
/// exploration.
#[derive(Debug)]
pub struct EquationBuilder {
    dice: DiceRule,
    expansion: RollExpansion,
    max_states: usize,
    rolls: RollEnumerator,
}

impl EquationBuilder {
    /// Create a builder for the given configuration.
    pub fn new(config: &SolveConfig) -> Self {
        Self {
            dice: config.dice,
            expansion: config.expansion,
            max_states: config.max_states,
            rolls: RollEnumerator::new(),
        }
    }

    /// The one-roll transition distribution out of `state`.
    pub fn equation_for(&mut self, state: &State) -> LcrResult<Equation> {
        let dice = self.dice.dice_for(state.acting_chips());
        let mut expression = Expression::default();
        match self.expansion {
            RollExpansion::Tallies => {
                for tally in self.rolls.tallies(dice) {
                    expression.add(apply_tally(state, tally)?, tally.probability);
                }
            }
            RollExpansion::Sequences => {
                for outcome in self.rolls.outcomes(dice)? {
                    expression.add(next_state(state, &outcome.faces)?, outcome.probability);
                }
            }
        }
        Ok(Equation {
            state: state.clone(),
            expression: expression.terms,
        })
    }

    /// Explore everything reachable from `start`.
    ///
    /// Ending states contribute no equation. Fails with
    /// [`LcrError::StateLimitExceeded`] once more than `max_states`
    /// transient states are found.
    pub fn build(&mut self, start: &State) -> LcrResult<EquationSet> {
        let mut set = EquationSet::default();
        let mut worklist = vec![start.clone()];

        while let Some(state) = worklist.pop() {
            if state.is_ending() || set.index_of(&state).is_some() {
                continue;
            }
            if set.len() >= self.max_states {
                return Err(LcrError::StateLimitExceeded {
                    limit: self.max_states,
                });
            }

            let equation = self.equation_for(&state)?;
            tracing::debug!(%equation, "explored state");
            for term in equation.expression.iter().rev() {
                if !term.state.is_ending() && set.index_of(&term.state).is_none() {
                    worklist.push(term.state.clone());
                }
            }
            set.push(equation);
        }

        tracing::info!(start = %start, states = set.len(), dice = %self.dice, "built equations");
        Ok(set)
    }
}
