//! SciPy functions port.
//!
//! Ported from:
//! - scipy.spatial.distance
//! - scipy.optimize
//!
//! License: BSD 3-Clause (SciPy Developers)

mod distance;
mod optimize;

pub use distance::*;
pub use optimize::*;
