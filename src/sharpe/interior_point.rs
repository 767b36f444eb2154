//! # Interior-Point Backend
//!
//! $$
//! \min_x \tfrac12 x^\top P x + q^\top x \quad
//! \text{s.t.} \quad Ax + s = b,\ s \in \{0\}^{1} \times \mathbb{R}_+^{m}
//! $$
//!
//! Interior-point solution of [`QpProblem`] through `clarabel`.

use clarabel::algebra::*;
use clarabel::solver::*;
use ndarray::Array1;
use tracing::debug;

use super::config::SolverConfig;
use super::qp::QpProblem;
use super::qp::QpSolution;
use super::qp::QpSolver;
use super::qp::QpStatus;
use crate::error::HsrError;
use crate::error::Result;

/// [`QpSolver`] backed by the Clarabel interior-point method.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClarabelSolver;

/// Upper triangle of the cost matrix in CSC layout, as Clarabel expects.
fn upper_triangle_csc(problem: &QpProblem) -> CscMatrix<f64> {
  let n = problem.dim();
  let mut colptr = Vec::with_capacity(n + 1);
  let mut rowval = Vec::with_capacity(n * (n + 1) / 2);
  let mut nzval = Vec::with_capacity(n * (n + 1) / 2);
  colptr.push(0);

  for j in 0..n {
    for i in 0..=j {
      let v = problem.cost[[i, j]];
      if v != 0.0 {
        rowval.push(i);
        nzval.push(v);
      }
    }
    colptr.push(nzval.len());
  }

  CscMatrix::new(n, n, colptr, rowval, nzval)
}

/// Stack the equality row on top of `-I`, encoding `c'x = b` and `x >= 0`.
fn constraint_csc(problem: &QpProblem) -> CscMatrix<f64> {
  let n = problem.dim();
  let mut colptr = Vec::with_capacity(n + 1);
  let mut rowval = Vec::with_capacity(2 * n);
  let mut nzval = Vec::with_capacity(2 * n);
  colptr.push(0);

  for (j, &c) in problem.equality.iter().enumerate() {
    if c != 0.0 {
      rowval.push(0);
      nzval.push(c);
    }
    rowval.push(1 + j);
    nzval.push(-1.0);
    colptr.push(nzval.len());
  }

  CscMatrix::new(1 + n, n, colptr, rowval, nzval)
}

impl QpSolver for ClarabelSolver {
  fn solve(&self, problem: &QpProblem, config: &SolverConfig) -> Result<QpSolution> {
    let n = problem.dim();
    if problem.cost.dim() != (n, n) {
      return Err(HsrError::DimensionMismatch {
        expected: n,
        actual: problem.cost.nrows(),
      });
    }

    let p = upper_triangle_csc(problem);
    let q = vec![0.0; n];
    let a = constraint_csc(problem);
    let mut b = vec![problem.rhs];
    b.extend(std::iter::repeat(0.0).take(n));
    let cones = [ZeroConeT(1), NonnegativeConeT(n)];

    let settings = DefaultSettingsBuilder::default()
      .verbose(false)
      .max_iter(config.max_iter)
      .tol_gap_abs(config.abs_tol)
      .tol_gap_rel(config.rel_tol)
      .tol_feas(config.feas_tol)
      .build()
      .map_err(|e| HsrError::Solver(format!("invalid solver settings: {e}")))?;

    let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings)
      .map_err(|e| HsrError::Solver(format!("failed to set up solver: {e:?}")))?;
    solver.solve();

    let status = match solver.solution.status {
      SolverStatus::Solved => QpStatus::Solved,
      SolverStatus::AlmostSolved => QpStatus::AlmostSolved,
      _ => QpStatus::Failed,
    };
    debug!(
      assets = n,
      iterations = solver.solution.iterations,
      status = ?solver.solution.status,
      "clarabel finished"
    );

    Ok(QpSolution {
      x: Array1::from(solver.solution.x.clone()),
      status,
      iterations: solver.solution.iterations,
      detail: format!("{:?}", solver.solution.status),
    })
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn csc_layouts_have_expected_shape() {
    let problem = QpProblem::new(array![[2.0, 1.0], [1.0, 0.0]], array![0.5, 0.0], 1.0);
    let p = upper_triangle_csc(&problem);
    let a = constraint_csc(&problem);

    assert_eq!(p.colptr, vec![0, 1, 2]);
    assert_eq!(p.rowval, vec![0, 0]);
    assert_eq!(p.nzval, vec![2.0, 1.0]);
    assert_eq!(a.m, 3);
    assert_eq!(a.colptr, vec![0, 2, 3]);
    assert_eq!(a.rowval, vec![0, 1, 2]);
  }

  #[test]
  fn solves_two_asset_min_variance() {
    // min x1^2 + x2^2 s.t. x1 + x2 = 1, x >= 0 -> (0.5, 0.5)
    let problem = QpProblem::new(array![[1.0, 0.0], [0.0, 1.0]], array![1.0, 1.0], 1.0);
    let sol = ClarabelSolver
      .solve(&problem, &SolverConfig::default().tolerance(1e-10))
      .unwrap();

    assert!(sol.status.is_converged());
    assert_abs_diff_eq!(sol.x, array![0.5, 0.5], epsilon = 1e-7);
  }

  #[test]
  fn reports_infeasible_constraint() {
    // c'x = 1 with c <= 0 and x >= 0 has no solution.
    let problem = QpProblem::new(array![[1.0, 0.0], [0.0, 1.0]], array![-1.0, 0.0], 1.0);
    let sol = ClarabelSolver
      .solve(&problem, &SolverConfig::default())
      .unwrap();

    assert_eq!(sol.status, QpStatus::Failed);
  }
}
