//! JSON exports.
//!
//! An export carries everything needed to reproduce a result: the reference
//! grid, the solver settings, and the result itself, stamped with the time it
//! was produced.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::SolverConfig;
use crate::error::AppError;
use crate::models::ReferenceGrid;

/// A saved result file (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct ExportFile<'a, T: Serialize> {
    pub tool: String,
    pub version: String,
    pub generated: DateTime<Utc>,
    pub grid: &'a ReferenceGrid,
    pub solver: &'a SolverConfig,
    pub result: &'a T,
}

impl<'a, T: Serialize> ExportFile<'a, T> {
    pub fn new(grid: &'a ReferenceGrid, solver: &'a SolverConfig, result: &'a T) -> Self {
        Self {
            tool: "ml".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: Utc::now(),
            grid,
            solver,
            result,
        }
    }
}

/// Write an export envelope around `result`.
pub fn write_export_json<T: Serialize>(
    path: &Path,
    grid: &ReferenceGrid,
    solver: &SolverConfig,
    result: &T,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, &ExportFile::new(grid, solver, result))
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::forward;
    use crate::domain::Composition;
    use crate::models::{MlRelation, STANDARD_GRID};

    #[test]
    fn export_envelope_carries_grid_solver_and_result() {
        let rel = MlRelation::standard();
        let out = forward(&rel, 5.0, Composition::new(0.3, 0.008).unwrap()).unwrap();
        let solver = SolverConfig::default();

        let value = serde_json::to_value(ExportFile::new(&STANDARD_GRID, &solver, &out)).unwrap();
        assert_eq!(value["tool"], "ml");
        assert_eq!(value["grid"]["first"]["z"], 0.008);
        assert_eq!(value["solver"]["max_iter"], 100);
        assert_eq!(value["result"]["mass"], 5.0);
        assert_eq!(value["result"]["composition"]["x"], 0.3);
        assert!(value["generated"].is_string());
    }
}
