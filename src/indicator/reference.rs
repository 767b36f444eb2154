//! # Reference Box
//!
//! $$
//! [\ell, u] = \prod_{k=1}^{d} [\ell_k, u_k], \qquad \ell \ll u
//! $$
//!
//! Axis-aligned region bounding the relevant part of objective space.

use ndarray::Array1;
use ndarray::ArrayView1;
use ndarray::ArrayView2;

use crate::error::HsrError;
use crate::error::Result;

/// Lower and upper reference points, with `lower[k] < upper[k]` in every dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceBox {
  lower: Array1<f64>,
  upper: Array1<f64>,
}

/// Counts of points lying (partially) outside a [`ReferenceBox`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DominanceReport {
  /// Points not weakly dominated by the lower reference point.
  pub below_lower: usize,
  /// Points that do not strictly dominate the upper reference point.
  pub outside_upper: usize,
}

impl DominanceReport {
  pub fn is_clean(&self) -> bool {
    self.below_lower == 0 && self.outside_upper == 0
  }
}

impl ReferenceBox {
  /// Build a reference box, rejecting any dimension where `lower >= upper`.
  pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
    if lower.len() != upper.len() {
      return Err(HsrError::DimensionMismatch {
        expected: lower.len(),
        actual: upper.len(),
      });
    }
    if lower.is_empty() {
      return Err(HsrError::EmptyReferenceBox);
    }

    // `!(l < u)` also rejects NaN bounds.
    if let Some((dim, (&l, &u))) = lower
      .iter()
      .zip(upper.iter())
      .enumerate()
      .find(|(_, (l, u))| !(**l < **u))
    {
      return Err(HsrError::InvalidReferenceBox {
        dim,
        lower: l,
        upper: u,
      });
    }

    Ok(Self { lower, upper })
  }

  /// Unit box `[0, 1]^d`, the default region of the command line tool.
  pub fn unit(dim: usize) -> Self {
    debug_assert!(dim > 0, "a reference box needs at least one dimension");
    Self {
      lower: Array1::zeros(dim),
      upper: Array1::ones(dim),
    }
  }

  pub fn dim(&self) -> usize {
    self.lower.len()
  }

  pub fn lower(&self) -> ArrayView1<'_, f64> {
    self.lower.view()
  }

  pub fn upper(&self) -> ArrayView1<'_, f64> {
    self.upper.view()
  }

  /// Box volume `prod(u - l)`, strictly positive by construction.
  pub fn volume(&self) -> f64 {
    self
      .upper
      .iter()
      .zip(self.lower.iter())
      .map(|(u, l)| u - l)
      .product()
  }

  /// Whether `point` strictly dominates the upper reference point.
  pub fn is_inside_upper(&self, point: ArrayView1<f64>) -> bool {
    point.iter().zip(self.upper.iter()).all(|(a, u)| a < u)
  }

  /// Whether the lower reference point weakly dominates `point`.
  pub fn is_above_lower(&self, point: ArrayView1<f64>) -> bool {
    point.iter().zip(self.lower.iter()).all(|(a, l)| l <= a)
  }

  /// Count the points of `points` falling outside the box on either side.
  pub fn dominance_report(&self, points: ArrayView2<f64>) -> Result<DominanceReport> {
    if points.nrows() > 0 && points.ncols() != self.dim() {
      return Err(HsrError::DimensionMismatch {
        expected: self.dim(),
        actual: points.ncols(),
      });
    }

    let mut report = DominanceReport::default();
    for row in points.rows() {
      if !self.is_above_lower(row) {
        report.below_lower += 1;
      }
      if !self.is_inside_upper(row) {
        report.outside_upper += 1;
      }
    }

    Ok(report)
  }
}
