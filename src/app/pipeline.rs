//! Shared evaluation pipeline used by the single-star and batch commands.
//!
//! Every star is independent and the model is pure, so batches are evaluated
//! with a rayon parallel iterator and no coordination. Input order is preserved.

use rayon::prelude::*;

use crate::calc::{Output, evaluate};
use crate::domain::{Composition, Direction, SolverConfig};
use crate::error::ModelError;
use crate::io::batch::StarRow;
use crate::models::MlRelation;

/// One evaluated star (or the reason it could not be evaluated).
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub row: StarRow,
    pub result: Result<Output, ModelError>,
}

/// Validate the composition and evaluate a single star.
pub fn evaluate_star(
    rel: &MlRelation,
    direction: Direction,
    value: f64,
    x: f64,
    z: f64,
    solver: &SolverConfig,
) -> Result<Output, ModelError> {
    let composition = Composition::new(x, z)?;
    evaluate(rel, direction, value, composition, solver)
}

/// Evaluate every row in parallel.
pub fn run_batch(
    rel: &MlRelation,
    rows: &[StarRow],
    direction: Direction,
    solver: &SolverConfig,
) -> Vec<BatchOutcome> {
    rows.par_iter()
        .map(|row| {
            let result = evaluate_star(rel, direction, row.value, row.x, row.z, solver);
            if let Err(err) = &result {
                log::warn!("star '{}' failed: {err}", row.id);
            }
            BatchOutcome {
                row: row.clone(),
                result,
            }
        })
        .collect()
}
