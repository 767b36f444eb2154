//! # Point-Set Input
//!
//! $$
//! \text{text} \mapsto A \in \mathbb{R}^{n \times d}
//! $$
//!
//! Readers for whitespace-delimited point sets and reference points.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array1;
use ndarray::Array2;

use crate::error::HsrError;
use crate::error::Result;

/// Read a point set from `reader`, one point per line.
///
/// Blank lines and lines starting with `#` are skipped. Every remaining line
/// must hold the same number of numeric fields.
pub fn read_points<R: BufRead>(reader: R) -> Result<Array2<f64>> {
  let mut data = Vec::new();
  let mut dim: Option<usize> = None;
  let mut rows = 0;

  for (lineno, line) in reader.lines().enumerate() {
    let line = line.map_err(|e| HsrError::Parse(format!("line {}: {e}", lineno + 1)))?;
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let row = parse_row(line).map_err(|e| HsrError::Parse(format!("line {}: {e}", lineno + 1)))?;
    match dim {
      None => dim = Some(row.len()),
      Some(d) if d != row.len() => {
        return Err(HsrError::Parse(format!(
          "line {}: expected {d} values, found {}",
          lineno + 1,
          row.len()
        )));
      }
      Some(_) => {}
    }

    data.extend(row);
    rows += 1;
  }

  let dim = dim.ok_or_else(|| HsrError::Parse("empty point set".to_string()))?;
  Array2::from_shape_vec((rows, dim), data).map_err(|e| HsrError::Parse(e.to_string()))
}

/// Read a point set from the file at `path`.
pub fn read_points_file<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
  let path = path.as_ref();
  let file = File::open(path)
    .map_err(|e| HsrError::Parse(format!("could not read a point set from {}: {e}", path.display())))?;
  read_points(BufReader::new(file))
}

/// Parse a reference point such as `"0 0.5 1"` and check its dimension.
pub fn parse_reference_point(s: &str, dim: usize) -> Result<Array1<f64>> {
  let values = parse_row(s).map_err(|_| HsrError::Parse(format!("invalid reference point: \"{s}\"")))?;
  if values.len() != dim {
    return Err(HsrError::Parse(format!(
      "the number of dimensions of the reference point \"{s}\" is incorrect ({} != {dim})",
      values.len()
    )));
  }
  Ok(Array1::from(values))
}

fn parse_row(line: &str) -> std::result::Result<Vec<f64>, String> {
  let values = line
    .split(|c: char| c.is_whitespace() || c == ',')
    .filter(|tok| !tok.is_empty())
    .map(|tok| tok.parse::<f64>().map_err(|_| format!("invalid number \"{tok}\"")))
    .collect::<std::result::Result<Vec<_>, _>>()?;

  if values.is_empty() {
    return Err("no values".to_string());
  }
  Ok(values)
}
