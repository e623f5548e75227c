//! `stellar-ml` library crate.
//!
//! Metallicity-dependent mass–luminosity relation for stars in the LMC/SMC
//! reference grid. The binary (`ml`) is a thin wrapper around this library so
//! that:
//!
//! - the model is testable without spawning processes
//! - the forward/inverse entry points (`calc::forward`, `calc::inverse`) can be
//!   called directly from other tools

pub mod app;
pub mod calc;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod validate;
