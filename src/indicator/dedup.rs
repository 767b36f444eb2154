//! # Duplicate Points
//!
//! $$
//! \mathcal{U}(A) = \{\, i : a_i \neq a_j \ \forall j < i \,\}
//! $$
//!
//! Identical assets make the covariance matrix singular along their
//! difference, so only one copy of each distinct point is kept.

use ndarray::ArrayView2;
use ordered_float::OrderedFloat;

/// Mark one representative per distinct row of `points`.
///
/// Rows are ranked by a stable lexicographic sort whose primary key is the
/// last coordinate. The first row of each run of equal rows is kept; since the
/// sort is stable it is the copy with the smallest index.
pub fn argunique(points: ArrayView2<f64>) -> Vec<bool> {
  let m = points.nrows();
  let mut order: Vec<usize> = (0..m).collect();

  let key = |i: usize| {
    points
      .row(i)
      .iter()
      .rev()
      .map(|&v| OrderedFloat(v))
      .collect::<Vec<_>>()
  };
  order.sort_by_cached_key(|&i| key(i));

  let mut unique = vec![true; m];
  for pair in order.windows(2) {
    if points.row(pair[0]) == points.row(pair[1]) {
      unique[pair[1]] = false;
    }
  }

  unique
}
