//! Monte Carlo play-outs as a reference for the exact solver.
//!
//! Games are played die by die with a seeded RNG, so reports are
//! reproducible for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::dice::{DiceRule, Face};
use crate::error::{LcrError, LcrResult};
use crate::state::State;
use crate::transition::next_state;

/// Settings for a batch of simulated games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarlo {
    /// Number of games to play.
    pub games: u64,
    /// RNG seed.
    pub seed: u64,
    /// How many dice a pile rolls.
    pub dice: DiceRule,
    /// Turns after which a single game is abandoned as runaway.
    pub max_turns: u64,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self {
            games: 10_000,
            seed: 42,
            dice: DiceRule::Exact,
            max_turns: 100_000,
        }
    }
}

/// Outcome counts from a batch of simulated games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: u64,
    /// Games won, indexed by position.
    pub wins: Vec<u64>,
    /// Turns taken across all games.
    pub total_turns: u64,
}

impl SimulationReport {
    /// Fraction of games won by each position.
    pub fn frequencies(&self) -> Vec<f64> {
        if self.games == 0 {
            return vec![0.0; self.wins.len()];
        }
        self.wins
            .iter()
            .map(|&w| w as f64 / self.games as f64)
            .collect()
    }

    /// Average number of turns per game.
    pub fn mean_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

impl MonteCarlo {
    /// Set the number of games.
    pub fn with_games(mut self, games: u64) -> Self {
        self.games = games;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the dice rule.
    pub fn with_dice(mut self, dice: DiceRule) -> Self {
        self.dice = dice;
        self
    }

    /// Play every game from `start`.
    pub fn run(&self, start: &State) -> LcrResult<SimulationReport> {
        self.dice.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut report = SimulationReport {
            games: self.games,
            wins: vec![0; start.positions()],
            total_turns: 0,
        };
        for _ in 0..self.games {
            let (winner, turns) = self.play(start, &mut rng)?;
            report.wins[winner] += 1;
            report.total_turns += turns;
        }
        tracing::info!(
            start = %start,
            games = self.games,
            seed = self.seed,
            wins = ?report.wins,
            "simulated games"
        );
        Ok(report)
    }

    /// Play one game to completion; returns the winner and the turns taken.
    pub fn play(&self, start: &State, rng: &mut StdRng) -> LcrResult<(usize, u64)> {
        let mut state = start.clone();
        let mut turns = 0;
        loop {
            if let Some(winner) = state.holder() {
                return Ok((winner, turns));
            }
            if turns >= self.max_turns {
                return Err(LcrError::InvariantViolation(format!(
                    "game from {start} still running after {turns} turns"
                )));
            }
            let roll = roll_dice(self.dice.dice_for(state.acting_chips()), rng)?;
            state = next_state(&state, &roll)?;
            turns += 1;
        }
    }
}

fn roll_dice(dice: u32, rng: &mut StdRng) -> LcrResult<Vec<Face>> {
    (0..dice)
        .map(|_| {
            let side = rng.random_range(1..=6);
            Face::from_side(side)
                .ok_or_else(|| LcrError::InvariantViolation(format!("die showed side {side}")))
        })
        .collect()
}
