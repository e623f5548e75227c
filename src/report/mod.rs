//! Reporting: formatted terminal output for single stars and batches.
//!
//! Formatting lives here so the model code never decides how numbers are shown.

pub mod format;

pub use format::*;
