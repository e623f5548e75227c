//! Numeric kernels: fit basis functions, metallicity interpolation, bisection.

pub mod basis;
pub mod bisect;
pub mod interp;

pub use basis::*;
pub use bisect::*;
pub use interp::*;
