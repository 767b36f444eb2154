//! # Return Moments
//!
//! $$
//! p_i = \frac{\prod_k (u_k - a_{ik})}{\prod_k (u_k - \ell_k)}, \qquad
//! Q_{ij} = p\big(\max(a_i, a_j)\big) - p_i p_j
//! $$
//!
//! Expected returns and covariances of the dominance-indicator "assets".
//! Every function here assumes `l <= A << u`; the orchestrator enforces it.

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use ndarray::Axis;
use ndarray::parallel::prelude::*;

use super::reference::ReferenceBox;

/// Below this many assets the covariance rows are filled sequentially.
const PAR_MIN_ASSETS: usize = 64;

/// Fraction of the box dominated by `point`.
pub fn expected_return(point: ArrayView1<f64>, rb: &ReferenceBox) -> f64 {
  let dominated: f64 = point
    .iter()
    .zip(rb.upper().iter())
    .map(|(a, u)| u - a)
    .product();
  dominated / rb.volume()
}

/// Expected return of every row of `points`.
pub fn expected_returns(points: ArrayView2<f64>, rb: &ReferenceBox) -> Array1<f64> {
  points
    .rows()
    .into_iter()
    .map(|row| expected_return(row, rb))
    .collect()
}

/// Joint dominance probability of two points, `p(max(a, b))`.
fn joint_return(a: ArrayView1<f64>, b: ArrayView1<f64>, upper: ArrayView1<f64>, volume: f64) -> f64 {
  let dominated: f64 = a
    .iter()
    .zip(b.iter())
    .zip(upper.iter())
    .map(|((&x, &y), u)| u - x.max(y))
    .product();
  dominated / volume
}

/// Covariance matrix of the asset returns given their expected returns `p`.
///
/// Only the upper triangle is evaluated; the lower one is mirrored, so the
/// result is exactly symmetric.
pub fn covariance_matrix(points: ArrayView2<f64>, p: ArrayView1<f64>, rb: &ReferenceBox) -> Array2<f64> {
  let m = points.nrows();
  let upper = rb.upper();
  let volume = rb.volume();
  let mut q = Array2::<f64>::zeros((m, m));

  let fill_row = |i: usize, mut row: ndarray::ArrayViewMut1<f64>| {
    let a = points.row(i);
    for j in i..m {
      row[j] = joint_return(a, points.row(j), upper, volume) - p[i] * p[j];
    }
  };

  if m >= PAR_MIN_ASSETS {
    q.axis_iter_mut(Axis(0))
      .into_par_iter()
      .enumerate()
      .for_each(|(i, row)| fill_row(i, row));
  } else {
    q.axis_iter_mut(Axis(0))
      .enumerate()
      .for_each(|(i, row)| fill_row(i, row));
  }

  for i in 0..m {
    for j in 0..i {
      q[[i, j]] = q[[j, i]];
    }
  }

  q
}

/// Expected-return vector and covariance matrix of `points` inside `rb`.
pub fn moments(points: ArrayView2<f64>, rb: &ReferenceBox) -> (Array1<f64>, Array2<f64>) {
  let p = expected_returns(points, rb);
  let q = covariance_matrix(points, p.view(), rb);
  (p, q)
}
