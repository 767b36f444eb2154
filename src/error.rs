//! # Errors
//!
//! $$
//! \ell \ll u \iff \ell_k < u_k \ \forall k
//! $$
//!
//! Domain errors raised by the indicator pipeline.

use thiserror::Error;

/// Errors produced while computing the HSR indicator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HsrError {
  /// The lower reference point does not strictly dominate the upper one.
  #[error(
    "the lower reference point does not strongly dominate the upper reference point \
     (dimension {dim}: lower = {lower}, upper = {upper})"
  )]
  InvalidReferenceBox { dim: usize, lower: f64, upper: f64 },

  /// The reference points have no coordinates.
  #[error("the reference points must have at least one dimension")]
  EmptyReferenceBox,

  /// Two inputs that must share a dimensionality do not.
  #[error("dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },

  /// The quadratic-program backend failed to produce a usable solution.
  #[error("portfolio optimization failed: {0}")]
  Solver(String),

  /// Malformed textual input (point-set file or reference point string).
  #[error("{0}")]
  Parse(String),

  /// Plotting is only defined for bi-objective point sets.
  #[error("plotting requires 2-dimensional points, got {0}")]
  Unplottable(usize),
}

pub type Result<T> = std::result::Result<T, HsrError>;
