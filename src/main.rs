use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use hsr_indicator::HsrIndicator;
use hsr_indicator::HsrResult;
use hsr_indicator::ReferenceBox;
use hsr_indicator::io::parse_reference_point;
use hsr_indicator::io::read_points_file;
use hsr_indicator::visualization::InvestmentPlot;
use ndarray::Array1;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use ndarray::Axis;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Calculate the Hypervolume Sharpe-ratio (HSR) indicator of the point set in
/// FILE. Prints the optimal investment and the corresponding HSR value.
#[derive(Parser, Debug)]
#[command(name = "hsr", version, about, long_about = None)]
struct Cli {
  /// Read point set from FILE
  #[arg(value_name = "FILE")]
  file: PathBuf,

  /// Lower reference point (default: "0 ... 0")
  #[arg(short = 'l', allow_hyphen_values = true)]
  lower: Option<String>,

  /// Upper reference point (default: "1 ... 1")
  #[arg(short = 'u', allow_hyphen_values = true)]
  upper: Option<String>,

  /// Plot the input points and their investment (2-dimensional point sets only)
  #[arg(short, long, default_value_t = false)]
  plot: bool,

  /// HTML file the plot is written to
  #[arg(long, default_value = "hsr-plot.html")]
  plot_out: PathBuf,

  /// Verbose mode
  #[arg(short = 'v', default_value_t = false)]
  verbose: bool,

  /// Quiet mode, do not show warnings
  #[arg(short, long, default_value_t = false)]
  quiet: bool,

  /// Output format: 0 = investment then HSR value, 1 = investment only, 2 = HSR value only
  #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
  format: u8,
}

fn init_logging(cli: &Cli) {
  let default = if cli.quiet {
    "error"
  } else if cli.verbose {
    "debug"
  } else {
    "warn"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

fn join(v: ArrayView1<f64>) -> String {
  v.iter()
    .map(|x| format!("{x:?}"))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Verbose header describing the point set.
fn write_summary<W: Write>(out: &mut W, points: ArrayView2<f64>) -> std::io::Result<()> {
  let (n, d) = points.dim();
  let amin = points.fold_axis(Axis(0), f64::INFINITY, |&a, &b| a.min(b));
  let amax = points.fold_axis(Axis(0), f64::NEG_INFINITY, |&a, &b| a.max(b));
  writeln!(out, "# Point set size: {n}")?;
  writeln!(out, "# Number of dimensions: {d}")?;
  writeln!(out, "# Coordinate-wise minimum: {}", join(amin.view()))?;
  writeln!(out, "# Coordinate-wise maximum: {}", join(amax.view()))
}

/// Investment lines (formats 0 and 1) followed by the indicator value
/// (formats 0 and 2).
fn write_result<W: Write>(out: &mut W, res: &HsrResult, format: u8, verbose: bool) -> std::io::Result<()> {
  if format != 2 {
    if verbose {
      writeln!(out, "# Optimal investment:")?;
    }
    for x in res.investment.iter() {
      writeln!(out, "{x:?}")?;
    }
  }
  if format != 1 {
    if verbose {
      writeln!(out, "# HSR indicator value:")?;
    }
    writeln!(out, "{:.6}", res.value)?;
  }
  Ok(())
}

fn reference_point(arg: Option<&str>, dim: usize, default: f64) -> Result<Array1<f64>> {
  match arg {
    Some(s) => Ok(parse_reference_point(s, dim)?),
    None => Ok(Array1::from_elem(dim, default)),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(&cli);

  let points = read_points_file(&cli.file)?;
  let d = points.ncols();
  if d < 2 {
    bail!("The point set in FILE has less than 2 dimensions.");
  }

  let mut out = std::io::stdout().lock();
  if cli.verbose {
    write_summary(&mut out, points.view())?;
  }

  let lower = reference_point(cli.lower.as_deref(), d, 0.0)?;
  let upper = reference_point(cli.upper.as_deref(), d, 1.0)?;
  if cli.verbose {
    writeln!(out, "# Lower reference point: {}", join(lower.view()))?;
    writeln!(out, "# Upper reference point: {}", join(upper.view()))?;
  }

  let rb = ReferenceBox::new(lower, upper).context("invalid reference box")?;
  let report = rb.dominance_report(points.view())?;
  if !report.is_clean() {
    if report.below_lower > 0 {
      warn!(
        points = report.below_lower,
        "The lower reference point does not weakly dominate all points in the input set."
      );
    }
    if report.outside_upper > 0 {
      warn!(
        points = report.outside_upper,
        "Not all points in the input set strongly dominate the upper reference point."
      );
    }
  }
  if cli.plot && d > 2 {
    warn!("The point set has more than 2 dimensions. No plot will be shown.");
  }

  let res = HsrIndicator::default()
    .compute(points.view(), &rb, true)
    .context("failed to compute the HSR indicator")?;

  write_result(&mut out, &res, cli.format, cli.verbose)?;
  out.flush()?;

  if cli.plot && d == 2 {
    InvestmentPlot::new(points.view(), res.investment.view(), &rb)?
      .title("HSR investment")
      .write_html(&cli.plot_out)
      .with_context(|| format!("failed to write the plot to {}", cli.plot_out.display()))?;
    info!(path = %cli.plot_out.display(), "plot written");
  }

  Ok(())
}
