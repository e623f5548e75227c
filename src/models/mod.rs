//! The mass–luminosity relation.
//!
//! - `grid`: reference fits at the two anchor metallicities (constant tables)
//! - `relation`: forward evaluation (luminosity bounds, slope)
//! - `mass`: inversion (mass from luminosity)

pub mod grid;
pub mod mass;
pub mod relation;

pub use grid::*;
pub use relation::*;
