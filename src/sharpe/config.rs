/// Numerical settings of the Sharpe-ratio maximization.
///
/// Tight tolerances are the default so that indicator values of different
/// point sets can be compared reliably.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
  /// Absolute duality-gap tolerance.
  pub abs_tol: f64,
  /// Relative duality-gap tolerance.
  pub rel_tol: f64,
  /// Primal/dual feasibility tolerance.
  pub feas_tol: f64,
  /// Iteration cap of the QP backend.
  pub max_iter: u32,
  /// Normalized weights at or below this value are reported as exactly zero.
  pub zero_threshold: f64,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      abs_tol: 1e-15,
      rel_tol: 1e-15,
      feas_tol: 1e-15,
      max_iter: 1000,
      zero_threshold: 1e-9,
    }
  }
}

impl SolverConfig {
  /// Set all three convergence tolerances at once.
  pub fn tolerance(mut self, tol: f64) -> Self {
    self.abs_tol = tol;
    self.rel_tol = tol;
    self.feas_tol = tol;
    self
  }

  pub fn max_iter(mut self, max_iter: u32) -> Self {
    self.max_iter = max_iter;
    self
  }

  pub fn zero_threshold(mut self, threshold: f64) -> Self {
    self.zero_threshold = threshold.max(0.0);
    self
  }
}
