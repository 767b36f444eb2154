//! # Sharpe Ratio Maximization
//!
//! $$
//! \max_{x \in \Delta} \frac{x^\top p - r_f}{\sqrt{x^\top Q x}}
//! \;\equiv\;
//! \min_{y \ge 0} y^\top Q y \ \text{ s.t. } (p - r_f)^\top y = 1,\quad x = \frac{y}{\mathbf 1^\top y}
//! $$
//!
//! Long-only tangency portfolio through its homogenized QP formulation.

pub mod config;
pub mod interior_point;
pub mod qp;

use ndarray::Array1;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use tracing::debug;
use tracing::warn;

pub use config::SolverConfig;
pub use interior_point::ClarabelSolver;
pub use qp::QpProblem;
pub use qp::QpSolution;
pub use qp::QpSolver;
pub use qp::QpStatus;

use crate::error::HsrError;
use crate::error::Result;

/// Output of a Sharpe-ratio maximization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SharpeResult {
  /// Optimal Sharpe ratio.
  pub ratio: f64,
  /// Portfolio expected return `x'p`.
  pub expected_return: f64,
  /// Portfolio volatility `sqrt(x'Qx)`.
  pub volatility: f64,
  /// Allocation on the simplex.
  pub weights: Array1<f64>,
  /// Backend status the allocation was derived from.
  pub status: QpStatus,
}

/// Sharpe ratio of allocation `x`.
///
/// A riskless allocation yields `+inf` for a positive excess return, `-inf`
/// for a negative one and `0` when there is no excess return at all.
pub fn sharpe_ratio(p: ArrayView1<f64>, q: ArrayView2<f64>, x: ArrayView1<f64>, rf: f64) -> f64 {
  let excess = x.dot(&p) - rf;
  let volatility = x.dot(&q.dot(&x)).max(0.0).sqrt();

  if volatility > 0.0 {
    excess / volatility
  } else if excess > 0.0 {
    f64::INFINITY
  } else if excess < 0.0 {
    f64::NEG_INFINITY
  } else {
    0.0
  }
}

/// Maximize the Sharpe ratio over long-only allocations summing to one.
pub fn maximize_sharpe(
  p: ArrayView1<f64>,
  q: ArrayView2<f64>,
  rf: f64,
  solver: &dyn QpSolver,
  config: &SolverConfig,
) -> Result<SharpeResult> {
  let m = p.len();
  if q.dim() != (m, m) {
    return Err(HsrError::DimensionMismatch {
      expected: m,
      actual: q.nrows(),
    });
  }
  if m == 0 {
    return Ok(SharpeResult::default());
  }

  if let Some(res) = riskless_allocation(p, q, rf) {
    return Ok(res);
  }

  let problem = QpProblem::new(q.to_owned(), p.mapv(|v| v - rf), 1.0);
  let solution = solver.solve(&problem, config)?;
  if !solution.status.is_converged() {
    return Err(HsrError::Solver(format!(
      "QP backend stopped with status {} after {} iterations",
      solution.detail, solution.iterations
    )));
  }
  if solution.x.len() != m {
    return Err(HsrError::DimensionMismatch {
      expected: m,
      actual: solution.x.len(),
    });
  }

  if solution.status == QpStatus::AlmostSolved {
    warn!(
      assets = m,
      iterations = solution.iterations,
      "QP backend reached reduced accuracy only"
    );
  }

  let total = solution.x.sum();
  if !(total.is_finite() && total > 0.0) {
    return Err(HsrError::Solver(format!(
      "degenerate QP solution with weight sum {total}"
    )));
  }

  let threshold = config.zero_threshold;
  let weights = solution
    .x
    .mapv(|y| y / total)
    .mapv_into(|w| if w > threshold { w } else { 0.0 });

  let ratio = sharpe_ratio(p, q, weights.view(), rf);
  let expected_return = weights.dot(&p);
  let volatility = weights.dot(&q.dot(&weights)).max(0.0).sqrt();
  debug!(
    assets = m,
    invested = weights.iter().filter(|&&w| w > 0.0).count(),
    ratio,
    "sharpe ratio maximized"
  );

  Ok(SharpeResult {
    ratio,
    expected_return,
    volatility,
    weights,
    status: solution.status,
  })
}

/// Equal split over the zero-variance assets with a positive excess return.
///
/// With `Q` positive semi-definite a zero diagonal entry forces a zero row,
/// so any mix of such assets is riskless and its ratio is `+inf`.
fn riskless_allocation(p: ArrayView1<f64>, q: ArrayView2<f64>, rf: f64) -> Option<SharpeResult> {
  let riskless: Vec<usize> = (0..p.len())
    .filter(|&i| q[[i, i]] <= 0.0 && p[i] > rf)
    .collect();
  if riskless.is_empty() {
    return None;
  }

  let mut weights = Array1::<f64>::zeros(p.len());
  let share = 1.0 / riskless.len() as f64;
  for &i in &riskless {
    weights[i] = share;
  }
  debug!(assets = p.len(), riskless = riskless.len(), "riskless assets found");

  Some(SharpeResult {
    ratio: f64::INFINITY,
    expected_return: weights.dot(&p),
    volatility: 0.0,
    weights,
    status: QpStatus::Solved,
  })
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use ndarray::Array2;
  use ndarray::array;
  use tracing_test::traced_test;

  use super::*;

  struct StalledSolver;

  impl QpSolver for StalledSolver {
    fn solve(&self, problem: &QpProblem, _: &SolverConfig) -> Result<QpSolution> {
      Ok(QpSolution {
        x: Array1::zeros(problem.dim()),
        status: QpStatus::Failed,
        iterations: 1000,
        detail: "MaxIterations".to_string(),
      })
    }
  }

  struct NoisySolver(Array1<f64>, QpStatus);

  impl QpSolver for NoisySolver {
    fn solve(&self, _: &QpProblem, _: &SolverConfig) -> Result<QpSolution> {
      Ok(QpSolution {
        x: self.0.clone(),
        status: self.1,
        iterations: 3,
        detail: format!("{:?}", self.1),
      })
    }
  }

  #[test]
  fn sharpe_ratio_of_uncorrelated_assets() {
    let p = array![0.1, 0.2];
    let q = array![[0.04, 0.0], [0.0, 0.09]];
    let x = array![0.5, 0.5];
    let expected = 0.15 / (0.25_f64 * 0.13).sqrt();

    assert_relative_eq!(sharpe_ratio(p.view(), q.view(), x.view(), 0.0), expected);
  }

  #[test]
  fn riskless_allocation_has_infinite_ratio() {
    let q = Array2::<f64>::zeros((1, 1));
    let x = array![1.0];

    assert_eq!(sharpe_ratio(array![0.5].view(), q.view(), x.view(), 0.0), f64::INFINITY);
    assert_eq!(sharpe_ratio(array![0.5].view(), q.view(), x.view(), 0.5), 0.0);
  }

  #[test]
  fn tangency_portfolio_of_uncorrelated_assets() {
    // Unconstrained tangency weights are proportional to Q^{-1}(p - rf).
    let p = array![0.1, 0.2];
    let q = array![[0.04, 0.0], [0.0, 0.09]];
    let res = maximize_sharpe(p.view(), q.view(), 0.0, &ClarabelSolver, &SolverConfig::default()).unwrap();

    let raw = array![0.1 / 0.04, 0.2 / 0.09];
    let expected = &raw / raw.sum();
    assert_abs_diff_eq!(res.weights, expected, epsilon = 1e-7);
    assert_abs_diff_eq!(res.weights.sum(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(
      res.ratio,
      sharpe_ratio(p.view(), q.view(), expected.view(), 0.0),
      max_relative = 1e-10
    );
  }

  #[test]
  fn dominated_asset_gets_no_weight() {
    // Asset 1 has lower return, higher risk and 0.9 correlation with asset 0.
    let p = array![0.2, 0.1];
    let q = array![[0.01, 0.0135], [0.0135, 0.0225]];
    let res = maximize_sharpe(p.view(), q.view(), 0.0, &ClarabelSolver, &SolverConfig::default()).unwrap();

    assert_eq!(res.weights[1], 0.0);
    assert_abs_diff_eq!(res.weights[0], 1.0, epsilon = 1e-9);
    assert_relative_eq!(res.ratio, 2.0, max_relative = 1e-8);
  }

  #[test]
  fn riskless_asset_takes_the_whole_allocation() {
    // The solver must not be consulted at all.
    let p = array![0.5, 1.0, 0.3];
    let q = array![[0.04, 0.0, 0.01], [0.0, 0.0, 0.0], [0.01, 0.0, 0.09]];
    let res = maximize_sharpe(p.view(), q.view(), 0.0, &StalledSolver, &SolverConfig::default()).unwrap();

    assert_eq!(res.weights, array![0.0, 1.0, 0.0]);
    assert_eq!(res.ratio, f64::INFINITY);
    assert_eq!(res.volatility, 0.0);
    assert_eq!(res.expected_return, 1.0);
  }

  #[test]
  fn riskless_copies_share_the_allocation() {
    let p = array![1.0, 0.5, 1.0];
    let q = array![[0.0, 0.0, 0.0], [0.0, 0.25, 0.0], [0.0, 0.0, 0.0]];
    let res = maximize_sharpe(p.view(), q.view(), 0.0, &StalledSolver, &SolverConfig::default()).unwrap();

    assert_eq!(res.weights, array![0.5, 0.0, 0.5]);
    assert_eq!(res.ratio, f64::INFINITY);
  }

  #[test]
  fn riskless_asset_without_excess_return_is_ignored() {
    let p = array![0.1, 0.2];
    let q = array![[0.0, 0.0], [0.0, 0.09]];
    let err = maximize_sharpe(p.view(), q.view(), 0.1, &StalledSolver, &SolverConfig::default()).unwrap_err();

    assert!(matches!(err, HsrError::Solver(_)));
  }

  #[test]
  #[traced_test]
  fn reduced_accuracy_is_reported() {
    let p = array![0.1, 0.2];
    let q = Array2::<f64>::eye(2);
    let solver = NoisySolver(array![0.3, 0.7], QpStatus::AlmostSolved);
    let res = maximize_sharpe(p.view(), q.view(), 0.0, &solver, &SolverConfig::default()).unwrap();

    assert_eq!(res.status, QpStatus::AlmostSolved);
    assert!(logs_contain("QP backend reached reduced accuracy only"));
  }

  #[test]
  fn solver_failure_is_propagated() {
    let p = array![0.1, 0.2];
    let q = array![[0.04, 0.0], [0.0, 0.09]];
    let err = maximize_sharpe(p.view(), q.view(), 0.0, &StalledSolver, &SolverConfig::default()).unwrap_err();

    assert!(matches!(err, HsrError::Solver(msg) if msg.contains("MaxIterations")));
  }

  #[test]
  fn tiny_weights_are_clipped_after_normalization() {
    let p = array![0.1, 0.2, 0.3];
    let q = Array2::<f64>::eye(3);
    let solver = NoisySolver(array![2.0, 1e-12, -1e-13], QpStatus::Solved);
    let res = maximize_sharpe(p.view(), q.view(), 0.0, &solver, &SolverConfig::default()).unwrap();

    assert_eq!(res.weights[1], 0.0);
    assert_eq!(res.weights[2], 0.0);
    assert!(res.weights.iter().all(|&w| w >= 0.0));
    assert_relative_eq!(res.weights[0], 2.0 / (2.0 + 1e-12 - 1e-13));
  }

  #[test]
  fn zero_weight_sum_is_an_error() {
    let p = array![0.1, 0.2];
    let q = Array2::<f64>::eye(2);
    let solver = NoisySolver(array![0.0, 0.0], QpStatus::Solved);

    assert!(maximize_sharpe(p.view(), q.view(), 0.0, &solver, &SolverConfig::default()).is_err());
  }

  #[test]
  fn mismatched_covariance_is_rejected() {
    let p = array![0.1, 0.2];
    let q = Array2::<f64>::eye(3);

    assert!(matches!(
      maximize_sharpe(p.view(), q.view(), 0.0, &ClarabelSolver, &SolverConfig::default()),
      Err(HsrError::DimensionMismatch { .. })
    ));
  }
}
