//! Assembling `(I − Q) x = R_w` from an equation set.
//!
//! `Q` holds transitions between transient states and is the same for every
//! winner. `R_w` collects, per row, the one-roll probability of landing in a
//! state won by `w`. Losing absorbing states contribute nothing.

use ndarray::{Array1, Array2};

use crate::equation::EquationSet;
use crate::error::{LcrError, LcrResult};

/// A square system ready for a linear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// `I − Q`, rows and columns in equation order.
    pub matrix: Array2<f64>,
    /// `R_w` for the chosen winner.
    pub rhs: Array1<f64>,
}

/// Build `I − Q`.
pub fn transient_matrix(equations: &EquationSet) -> LcrResult<Array2<f64>> {
    let m = equations.len();
    let mut matrix = Array2::<f64>::eye(m);
    for (row, equation) in equations.iter().enumerate() {
        for term in &equation.expression {
            if term.state.is_ending() {
                continue;
            }
            let column = equations.index_of(&term.state).ok_or_else(|| {
                LcrError::InvariantViolation(format!(
                    "successor {} of {} has no equation",
                    term.state, equation.state
                ))
            })?;
            matrix[[row, column]] -= term.probability;
        }
    }
    Ok(matrix)
}

/// Build `R_w`: per row, the probability of ending the game with `winner`
/// holding every chip on the next roll.
pub fn absorption_rhs(equations: &EquationSet, winner: usize) -> LcrResult<Array1<f64>> {
    let mut rhs = Array1::<f64>::zeros(equations.len());
    for (row, equation) in equations.iter().enumerate() {
        for term in &equation.expression {
            if term.state.is_winning_for(winner)? {
                rhs[row] += term.probability;
            }
        }
    }
    Ok(rhs)
}

/// Assemble the full system for one winner.
pub fn assemble(equations: &EquationSet, winner: usize) -> LcrResult<LinearSystem> {
    Ok(LinearSystem {
        matrix: transient_matrix(equations)?,
        rhs: absorption_rhs(equations, winner)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolveConfig;
    use crate::equation::EquationBuilder;
    use crate::state::State;

    fn equations(chips: &[u32]) -> EquationSet {
        let start = State::opening(chips.to_vec()).unwrap();
        EquationBuilder::new(&SolveConfig::default())
            .build(&start)
            .unwrap()
    }

    #[test]
    fn two_players_one_chip_each() {
        let set = equations(&[1, 1]);
        let system = assemble(&set, 1).unwrap();
        assert_eq!(system.matrix.dim(), (2, 2));
        assert!((system.matrix[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((system.matrix[[0, 1]] + 0.5).abs() < 1e-12);
        assert!((system.matrix[[1, 0]] + 0.5).abs() < 1e-12);
        assert!((system.rhs[0] - 0.5).abs() < 1e-12);
        assert!(system.rhs[1].abs() < 1e-12);

        let rhs = absorption_rhs(&set, 0).unwrap();
        assert!(rhs[0].abs() < 1e-12);
        assert!((rhs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rows_balance() {
        // Transient mass plus absorbing mass over all winners is one per row.
        let set = equations(&[2, 1, 1]);
        let matrix = transient_matrix(&set).unwrap();
        let total_rhs = (0..3)
            .map(|w| absorption_rhs(&set, w).unwrap())
            .fold(Array1::<f64>::zeros(set.len()), |acc, r| acc + r);
        for (row, absorbed) in total_rhs.iter().enumerate() {
            let q_mass: f64 = 1.0 - matrix.row(row).sum();
            assert!((q_mass + absorbed - 1.0).abs() < 1e-9, "row {row}");
        }
    }

    #[test]
    fn winner_out_of_range() {
        let set = equations(&[1, 1]);
        assert!(matches!(
            absorption_rhs(&set, 2),
            Err(LcrError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn empty_set_gives_empty_system() {
        let set = equations(&[3, 0]);
        let system = assemble(&set, 0).unwrap();
        assert_eq!(system.matrix.dim(), (0, 0));
        assert_eq!(system.rhs.len(), 0);
    }
}
