//! Win probabilities from a start state.
//!
//! [`AbsorptionAnalysis`] explores the state graph once and keeps the
//! equation set. Each query then only assembles a right-hand side and
//! solves; querying every seat factors `I − Q` a single time.

use ndarray::Array1;

use crate::config::SolveConfig;
use crate::equation::{EquationBuilder, EquationSet};
use crate::error::{LcrError, LcrResult};
use crate::linalg::{LinearSolver, LuSolver};
use crate::state::State;
use crate::system::{absorption_rhs, assemble, transient_matrix};
use crate::validate::{validate_chips, validate_position, validate_query};

/// Explored game graph for one start state.
#[derive(Debug, Clone)]
pub struct AbsorptionAnalysis {
    start: State,
    config: SolveConfig,
    equations: EquationSet,
}

impl AbsorptionAnalysis {
    /// Explore everything reachable from `start`. An ending start builds no
    /// equations.
    pub fn new(start: State, config: SolveConfig) -> LcrResult<Self> {
        config.validate()?;
        let equations = if start.is_ending() {
            EquationSet::default()
        } else {
            EquationBuilder::new(&config).build(&start)?
        };
        Ok(Self {
            start,
            config,
            equations,
        })
    }

    /// Analyse a table from its opening state.
    pub fn from_chips(chips: &[u32], config: SolveConfig) -> LcrResult<Self> {
        validate_chips(chips)?;
        Self::new(State::opening(chips.to_vec())?, config)
    }

    /// The start state.
    pub fn start(&self) -> &State {
        &self.start
    }

    /// The configuration used for exploration and solving.
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Equations for every reachable transient state.
    pub fn equations(&self) -> &EquationSet {
        &self.equations
    }

    /// Probability that `winner` ends up holding every chip.
    pub fn win_probability(&self, winner: usize) -> LcrResult<f64> {
        self.win_probability_with(&LuSolver::from_config(&self.config), winner)
    }

    /// [`win_probability`](Self::win_probability) with a caller-supplied solver.
    pub fn win_probability_with<S: LinearSolver + ?Sized>(
        &self,
        solver: &S,
        winner: usize,
    ) -> LcrResult<f64> {
        validate_position(winner, self.start.positions())?;
        if let Some(holder) = self.start.holder() {
            return Ok(if holder == winner { 1.0 } else { 0.0 });
        }

        let system = assemble(&self.equations, winner)?;
        let solution = solver.solve(&system.matrix, &system.rhs)?;
        let probability = self.start_value(&solution)?;
        tracing::info!(start = %self.start, winner, probability, "solved");
        Ok(probability)
    }

    /// Win probability of every position, indexed by position.
    pub fn win_probabilities(&self) -> LcrResult<Vec<f64>> {
        self.win_probabilities_with(&LuSolver::from_config(&self.config))
    }

    /// [`win_probabilities`](Self::win_probabilities) with a caller-supplied
    /// solver. All right-hand sides go to the solver in one batch.
    pub fn win_probabilities_with<S: LinearSolver + ?Sized>(
        &self,
        solver: &S,
    ) -> LcrResult<Vec<f64>> {
        let positions = self.start.positions();
        if let Some(holder) = self.start.holder() {
            return Ok((0..positions)
                .map(|p| if p == holder { 1.0 } else { 0.0 })
                .collect());
        }

        let matrix = transient_matrix(&self.equations)?;
        let rhs = (0..positions)
            .map(|winner| absorption_rhs(&self.equations, winner))
            .collect::<LcrResult<Vec<_>>>()?;
        let solutions = solver.solve_many(&matrix, &rhs)?;
        if solutions.len() != positions {
            return Err(LcrError::DimensionMismatch {
                expected: positions,
                found: solutions.len(),
            });
        }
        let probabilities = solutions
            .iter()
            .map(|x| self.start_value(x))
            .collect::<LcrResult<Vec<_>>>()?;
        tracing::info!(start = %self.start, ?probabilities, "solved all positions");
        Ok(probabilities)
    }

    fn start_value(&self, solution: &Array1<f64>) -> LcrResult<f64> {
        let row = self.equations.index_of(&self.start).ok_or_else(|| {
            LcrError::InvariantViolation(format!("start state {} has no equation", self.start))
        })?;
        let value = solution.get(row).copied().ok_or(LcrError::DimensionMismatch {
            expected: self.equations.len(),
            found: solution.len(),
        })?;
        if !value.is_finite() {
            return Err(LcrError::InvariantViolation(format!(
                "solution for {} is not finite: {value}",
                self.start
            )));
        }
        Ok(value.clamp(0.0, 1.0))
    }
}

/// Probability that `winner` (zero-based) collects every chip, starting
/// from the opening state of `chips`.
pub fn win_probability(winner: usize, chips: &[u32], config: &SolveConfig) -> LcrResult<f64> {
    validate_query(winner, chips)?;
    AbsorptionAnalysis::from_chips(chips, config.clone())?.win_probability(winner)
}

/// Win probability of every position, starting from the opening state of
/// `chips`.
pub fn win_probabilities(chips: &[u32], config: &SolveConfig) -> LcrResult<Vec<f64>> {
    AbsorptionAnalysis::from_chips(chips, config.clone())?.win_probabilities()
}
