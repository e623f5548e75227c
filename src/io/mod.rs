//! Input/output helpers.
//!
//! - batch CSV ingest + per-star CSV export (`batch`)
//! - JSON result exports (`export`)
//! - custom reference grids from JSON (`grid`)

pub mod batch;
pub mod export;
pub mod grid;

pub use batch::*;
pub use export::*;
pub use grid::*;
