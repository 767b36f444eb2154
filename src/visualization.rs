//! # Visualization
//!
//! $$
//! \text{marker area}_i \propto n\,x_i
//! $$
//!
//! Bi-objective point sets drawn inside their reference box, each point
//! circled in proportion to the investment it receives.
use std::fs;
use std::path::Path;

use ndarray::ArrayView1;
use ndarray::ArrayView2;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;
use plotly::common::Line;
use plotly::common::Marker;
use plotly::common::MarkerSymbol;
use plotly::common::Mode;
use plotly::common::Title;
use plotly::layout::Axis;

use crate::error::HsrError;
use crate::error::Result;
use crate::indicator::ReferenceBox;

pub struct InvestmentPlot<'a> {
  points: ArrayView2<'a, f64>,
  investment: ArrayView1<'a, f64>,
  rb: &'a ReferenceBox,
  title: String,
}

/// Width and height of the square plot, in pixels.
const PLOT_SIZE: usize = 450;

impl<'a> InvestmentPlot<'a> {
  pub fn new(points: ArrayView2<'a, f64>, investment: ArrayView1<'a, f64>, rb: &'a ReferenceBox) -> Result<Self> {
    if points.ncols() != 2 || rb.dim() != 2 {
      return Err(HsrError::Unplottable(points.ncols()));
    }
    if investment.len() != points.nrows() {
      return Err(HsrError::DimensionMismatch {
        expected: points.nrows(),
        actual: investment.len(),
      });
    }

    Ok(Self {
      points,
      investment,
      rb,
      title: String::new(),
    })
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }

  /// Circle diameters, `sqrt(64 n x_i)`.
  fn marker_sizes(&self) -> Vec<usize> {
    let n = self.points.nrows() as f64;
    self
      .investment
      .iter()
      .map(|&x| (64.0 * n * x.max(0.0)).sqrt().round() as usize)
      .collect()
  }

  pub fn plot(&self) -> Plot {
    let xs = self.points.column(0).to_vec();
    let ys = self.points.column(1).to_vec();
    let hover = self
      .investment
      .iter()
      .map(|x| format!("investment: {x:.6}"))
      .collect::<Vec<String>>();

    let points = Scatter::new(xs.clone(), ys.clone())
      .mode(Mode::Markers)
      .name("points")
      .marker(Marker::new().size(4).color("#1f77b4"))
      .show_legend(false);

    let investment = Scatter::new(xs, ys)
      .mode(Mode::Markers)
      .name("investment")
      .marker(
        Marker::new()
          .size_array(self.marker_sizes())
          .symbol(MarkerSymbol::CircleOpen)
          .color("blue")
          .line(Line::new().width(1.0)),
      )
      .hover_text_array(hover)
      .show_legend(false);

    let lower = self.rb.lower();
    let upper = self.rb.upper();

    let mut plot = Plot::new();
    plot.set_layout(
      Layout::new()
        .title(self.title.as_str())
        .width(PLOT_SIZE)
        .height(PLOT_SIZE)
        .x_axis(
          Axis::new()
            .title(Title::from("Objective 1"))
            .range(vec![lower[0], upper[0]]),
        )
        .y_axis(
          Axis::new()
            .title(Title::from("Objective 2"))
            .range(vec![lower[1], upper[1]])
            .scale_anchor("x"),
        ),
    );
    plot.add_trace(points);
    plot.add_trace(investment);

    plot
  }

  /// Write a standalone HTML page holding the plot.
  pub fn write_html<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
    fs::write(path, self.plot().to_html())
  }
}
