//! # hsr-indicator
//!
//! $$
//! \operatorname{HSR}(A; \ell, u) = \max_{x \in \Delta}
//! \frac{\mathbb E[R_x]}{\sqrt{\operatorname{Var}[R_x]}}
//! $$
//!
//! Hypervolume Sharpe-ratio indicator of point sets in multi-objective
//! optimization.
//!
//! ```ignore
//! use hsr_indicator::hsr;
//! use ndarray::array;
//!
//! let a = array![[1.0, 3.0], [2.0, 2.0], [3.0, 1.0]];
//! let res = hsr(a.view(), array![0.0, 0.0], array![4.0, 4.0], true)?;
//! println!("{} {}", res.value, res.investment);
//! ```

pub mod error;
pub mod indicator;
pub mod io;
pub mod sharpe;
pub mod visualization;

pub use error::HsrError;
pub use error::Result;
pub use indicator::HsrIndicator;
pub use indicator::HsrResult;
pub use indicator::ReferenceBox;
pub use indicator::hsr;
pub use sharpe::SolverConfig;
pub use sharpe::maximize_sharpe;
pub use sharpe::sharpe_ratio;
