//! Dense linear solves for the absorption system.
//!
//! The analysis only depends on [`LinearSolver`]. [`LuSolver`] hands the
//! assembled `ndarray` system to nalgebra's LU decomposition, factors it once
//! and reuses the factors for every right-hand side.

use nalgebra::{DMatrix, DVector, Dyn, LU};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::config::SolveConfig;
use crate::error::{LcrError, LcrResult};

/// Solves square systems `A x = b`.
pub trait LinearSolver {
    /// Solve `matrix · x = b` for every `b` in `rhs`, in order.
    fn solve_many(
        &self,
        matrix: &Array2<f64>,
        rhs: &[Array1<f64>],
    ) -> LcrResult<Vec<Array1<f64>>>;

    /// Solve a single right-hand side.
    fn solve(&self, matrix: &Array2<f64>, rhs: &Array1<f64>) -> LcrResult<Array1<f64>> {
        self.solve_many(matrix, std::slice::from_ref(rhs))?
            .pop()
            .ok_or_else(|| LcrError::InvariantViolation("solver returned no solution".into()))
    }
}

/// LU factors of a square matrix, shareable across threads.
#[derive(Debug, Clone)]
pub struct LuFactors {
    lu: LU<f64, Dyn, Dyn>,
    dim: usize,
}

impl LuFactors {
    /// Factor `matrix`. Singularity shows up when solving.
    pub fn factor(matrix: &Array2<f64>) -> LcrResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(LcrError::DimensionMismatch {
                expected: rows,
                found: cols,
            });
        }
        let dense = DMatrix::from_fn(rows, cols, |i, j| matrix[[i, j]]);
        Ok(Self {
            lu: dense.lu(),
            dim: rows,
        })
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Solve `A x = rhs` with the stored factors.
    pub fn solve(&self, rhs: &Array1<f64>) -> LcrResult<Array1<f64>> {
        let n = self.dim();
        if rhs.len() != n {
            return Err(LcrError::DimensionMismatch {
                expected: n,
                found: rhs.len(),
            });
        }
        let b = DVector::from_iterator(n, rhs.iter().copied());
        let x = self.lu.solve(&b).ok_or_else(|| LcrError::SingularSystem {
            pivot: self.zero_pivot(),
        })?;
        Ok(x.iter().copied().collect())
    }

    /// First column whose `U` diagonal entry is zero.
    fn zero_pivot(&self) -> usize {
        self.lu
            .u()
            .diagonal()
            .iter()
            .position(|d| *d == 0.0)
            .unwrap_or(self.dim)
    }
}

/// LU solver; optionally fans right-hand sides out over rayon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuSolver {
    parallel: bool,
}

impl LuSolver {
    /// Solver matching an analysis configuration.
    pub fn from_config(config: &SolveConfig) -> Self {
        Self {
            parallel: config.parallel,
        }
    }

    /// Solve right-hand sides on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl LinearSolver for LuSolver {
    fn solve_many(
        &self,
        matrix: &Array2<f64>,
        rhs: &[Array1<f64>],
    ) -> LcrResult<Vec<Array1<f64>>> {
        let factors = LuFactors::factor(matrix)?;
        if self.parallel {
            rhs.par_iter().map(|b| factors.solve(b)).collect()
        } else {
            rhs.iter().map(|b| factors.solve(b)).collect()
        }
    }
}
