//! # Hypervolume Sharpe-Ratio Indicator
//!
//! $$
//! \operatorname{HSR}(A; \ell, u) = \max_{x \in \Delta}
//! \frac{x^\top p}{\sqrt{x^\top Q x}}
//! $$
//!
//! Each point of `A` is an asset paying off when a target drawn uniformly in
//! `[l, u]` is dominated by it; the indicator is the best achievable Sharpe
//! ratio of a long-only portfolio over those assets.

pub mod dedup;
pub mod moments;
pub mod reference;

use std::sync::Arc;

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView2;
use ndarray::Axis;
use tracing::debug;
use tracing::trace;

pub use dedup::argunique;
pub use moments::covariance_matrix;
pub use moments::expected_return;
pub use moments::expected_returns;
pub use moments::moments;
pub use reference::DominanceReport;
pub use reference::ReferenceBox;

use crate::error::HsrError;
use crate::error::Result;
use crate::sharpe::ClarabelSolver;
use crate::sharpe::QpSolver;
use crate::sharpe::SolverConfig;
use crate::sharpe::maximize_sharpe;

/// Risk-free rate of the indicator's portfolio problem.
const RISK_FREE: f64 = 0.0;

/// Indicator value and the optimal investment in each input point.
#[derive(Clone, Debug, PartialEq)]
pub struct HsrResult {
  /// HSR indicator value, `0` when no point lies inside the box.
  pub value: f64,
  /// Investment aligned with the input rows.
  pub investment: Array1<f64>,
}

impl HsrResult {
  fn empty(n: usize) -> Self {
    Self {
      value: 0.0,
      investment: Array1::zeros(n),
    }
  }
}

/// Reusable HSR evaluator holding the solver backend and its settings.
#[derive(Clone)]
pub struct HsrIndicator {
  config: SolverConfig,
  solver: Arc<dyn QpSolver>,
}

impl Default for HsrIndicator {
  fn default() -> Self {
    Self::new(SolverConfig::default())
  }
}

impl std::fmt::Debug for HsrIndicator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HsrIndicator")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

impl HsrIndicator {
  /// Evaluator using the Clarabel backend.
  pub fn new(config: SolverConfig) -> Self {
    Self::with_solver(config, Arc::new(ClarabelSolver))
  }

  /// Evaluator using a custom QP backend.
  pub fn with_solver(config: SolverConfig, solver: Arc<dyn QpSolver>) -> Self {
    Self { config, solver }
  }

  pub fn config(&self) -> &SolverConfig {
    &self.config
  }

  /// Compute the HSR indicator of `points` (one point per row).
  ///
  /// Points that do not strictly dominate the upper reference point get no
  /// investment. Coordinates below the lower reference point are raised to
  /// it. With `manage_duplicates`, only the first copy of a repeated point
  /// may receive investment.
  pub fn compute(&self, points: ArrayView2<f64>, rb: &ReferenceBox, manage_duplicates: bool) -> Result<HsrResult> {
    let n = points.nrows();
    if n == 0 {
      return Ok(HsrResult::empty(0));
    }
    if points.ncols() != rb.dim() {
      return Err(HsrError::DimensionMismatch {
        expected: rb.dim(),
        actual: points.ncols(),
      });
    }

    let valid: Vec<usize> = points
      .rows()
      .into_iter()
      .enumerate()
      .filter(|(_, row)| rb.is_inside_upper(*row))
      .map(|(i, _)| i)
      .collect();
    if valid.is_empty() {
      debug!(points = n, "no point dominates the upper reference point");
      return Ok(HsrResult::empty(n));
    }

    let mut inside = points.select(Axis(0), &valid);
    clamp_to_lower(&mut inside, rb);

    let (assets, index) = if manage_duplicates {
      let keep = argunique(inside.view());
      let rows: Vec<usize> = (0..valid.len()).filter(|&k| keep[k]).collect();
      let index = rows.iter().map(|&k| valid[k]).collect::<Vec<_>>();
      (inside.select(Axis(0), &rows), index)
    } else {
      (inside, valid)
    };
    debug!(points = n, assets = assets.nrows(), "computing return moments");

    let (p, q) = moments(assets.view(), rb);
    trace!(expected_returns = ?p, "return moments");

    let sharpe = maximize_sharpe(p.view(), q.view(), RISK_FREE, self.solver.as_ref(), &self.config)?;

    let mut investment = Array1::<f64>::zeros(n);
    for (&i, &w) in index.iter().zip(sharpe.weights.iter()) {
      investment[i] = w;
    }

    Ok(HsrResult {
      value: sharpe.ratio,
      investment,
    })
  }
}

/// Raise every coordinate below the lower reference point to it.
fn clamp_to_lower(points: &mut Array2<f64>, rb: &ReferenceBox) {
  for mut row in points.rows_mut() {
    row.zip_mut_with(&rb.lower(), |a, &l| *a = a.max(l));
  }
}

/// Compute the HSR indicator with the default solver settings.
///
/// Fails with [`HsrError::InvalidReferenceBox`] unless `lower` strictly
/// dominates `upper`.
pub fn hsr(points: ArrayView2<f64>, lower: Array1<f64>, upper: Array1<f64>, manage_duplicates: bool) -> Result<HsrResult> {
  let rb = ReferenceBox::new(lower, upper)?;
  HsrIndicator::default().compute(points, &rb, manage_duplicates)
}
