//! Domain types used throughout the model.
//!
//! This module defines:
//!
//! - validated inputs (`Composition`, `checked_mass`, `checked_luminosity`)
//! - branch/bound identifiers and slope labels (`Branch`, `Bound`, `Slope`)
//! - result triples (`Bounds`) and solver settings (`SolverConfig`)

pub mod config;
pub mod types;

pub use types::*;
