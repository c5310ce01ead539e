//! Win probabilities for the dice game Left-Center-Right.
//!
//! Treats the game as an absorbing Markov chain: reachable configurations
//! are explored once into one equation per transient state, and the
//! probability that a seat collects every chip is read off the solution of
//! `(I − Q) x = R`. A seeded Monte Carlo simulator provides a reference.

pub mod analysis;
pub mod config;
pub mod dice;
pub mod equation;
pub mod error;
pub mod linalg;
pub mod simulate;
pub mod state;
pub mod system;
pub mod transition;
pub mod validate;

pub use analysis::{AbsorptionAnalysis, win_probabilities, win_probability};
pub use config::{RollExpansion, SolveConfig};
pub use dice::{DiceRule, Face, RollEnumerator, RollOutcome, RollTally};
pub use equation::{Equation, EquationBuilder, EquationSet, Term};
pub use error::{LcrError, LcrResult};
pub use linalg::{LinearSolver, LuFactors, LuSolver};
pub use simulate::{MonteCarlo, SimulationReport};
pub use state::State;
pub use system::{LinearSystem, assemble};
