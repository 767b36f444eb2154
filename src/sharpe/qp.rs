//! # Quadratic Program Seam
//!
//! $$
//! \min_{x \ge 0} \ x^\top P x \quad \text{s.t.} \quad c^\top x = b
//! $$
//!
//! Backend-agnostic description of the single-equality, non-negative QP the
//! Sharpe-ratio maximization reduces to.

use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Array2;

use super::config::SolverConfig;
use crate::error::Result;

/// QP with a PSD cost, one linear equality and implicit `x >= 0` bounds.
#[derive(ImplNew, Clone, Debug)]
pub struct QpProblem {
  /// Symmetric positive semi-definite cost matrix.
  pub cost: Array2<f64>,
  /// Coefficients of the equality constraint.
  pub equality: Array1<f64>,
  /// Right-hand side of the equality constraint.
  pub rhs: f64,
}

impl QpProblem {
  pub fn dim(&self) -> usize {
    self.equality.len()
  }
}

/// Termination status reported by a backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QpStatus {
  /// Converged to the requested tolerances.
  #[default]
  Solved,
  /// Converged to a reduced accuracy after progress stalled.
  AlmostSolved,
  /// Infeasible, unbounded, out of iterations or numerically stuck.
  Failed,
}

impl QpStatus {
  /// Whether the iterate is usable. `AlmostSolved` counts, but callers
  /// should surface it.
  pub fn is_converged(&self) -> bool {
    matches!(self, Self::Solved | Self::AlmostSolved)
  }
}

/// Primal solution and convergence information.
#[derive(Clone, Debug)]
pub struct QpSolution {
  pub x: Array1<f64>,
  pub status: QpStatus,
  pub iterations: u32,
  /// Backend-specific status text, kept for diagnostics.
  pub detail: String,
}

/// A convex QP backend.
///
/// Implementations must report non-convergence through [`QpStatus`] or an
/// error instead of returning a degraded point silently.
pub trait QpSolver: Send + Sync {
  fn solve(&self, problem: &QpProblem, config: &SolverConfig) -> Result<QpSolution>;
}
