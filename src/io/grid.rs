//! Read reference grids from JSON.
//!
//! The file has the same shape as the built-in grid:
//!
//! ```json
//! { "first":  { "z": 0.008, "l_min": [10 numbers], "l_max": [10], "slope": [9] },
//!   "second": { "z": 0.004, ... } }
//! ```

use std::fs::File;
use std::path::Path;

use crate::error::AppError;
use crate::models::{MlRelation, ReferenceGrid};

/// Parse a grid from any reader and validate it.
pub fn read_grid<R: std::io::Read>(reader: R) -> Result<MlRelation, AppError> {
    let grid: ReferenceGrid = serde_json::from_reader(reader)
        .map_err(|e| AppError::new(2, format!("Invalid grid JSON: {e}")))?;
    Ok(MlRelation::new(grid)?)
}

/// Load a grid JSON file.
pub fn load_grid(path: &Path) -> Result<MlRelation, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open grid JSON '{}': {e}", path.display()))
    })?;
    read_grid(file)
}
