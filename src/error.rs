//! Error types.
//!
//! - [`ModelError`] is the library taxonomy: bad inputs, bad coefficient tables,
//!   bad solver settings, and failed inversions.
//! - [`AppError`] is what the `ml` binary reports; it carries a process exit code.

use thiserror::Error;

use crate::domain::Branch;

/// Failures raised by the mass–luminosity model.
///
/// Range advisories are *not* errors; they are reported through
/// [`crate::validate::Warning`] alongside a successful result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A value outside the mathematical domain of the model (e.g. mass ≤ 0).
    #[error("{quantity} must be {requirement} (got {value})")]
    Domain {
        quantity: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// Hydrogen and metal fractions add up to more than the whole star.
    #[error("X + Z must not exceed 1 (got X = {x}, Z = {z})")]
    Composition { x: f64, z: f64 },

    /// A luminosity coefficient vector with an unusable exponential decay scale.
    #[error("luminosity decay scale must be finite and non-zero (got {value})")]
    DecayScale { value: f64 },

    /// Both reference fits sit at the same metallicity, so no interpolation is possible.
    #[error("reference metallicities must differ (both are {z})")]
    DegenerateReference { z: f64 },

    /// The bisection bracket showed no sign change for one of the anchor solves.
    #[error("One or more inputs are well beyond the grid range. The fit calculations failed.")]
    Bracketing { branch: Branch, z: f64 },

    /// Solver settings that cannot produce a meaningful root search.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    pub(crate) fn domain(quantity: &'static str, requirement: &'static str, value: f64) -> Self {
        Self::Domain {
            quantity,
            requirement,
            value,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        let exit_code = match err {
            ModelError::Bracketing { .. } => 3,
            ModelError::Domain { .. }
            | ModelError::Composition { .. }
            | ModelError::DecayScale { .. }
            | ModelError::DegenerateReference { .. }
            | ModelError::InvalidConfig(_) => 2,
        };
        AppError::new(exit_code, format!("Error: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketing_failure_maps_to_fit_exit_code() {
        let err: AppError = ModelError::Bracketing {
            branch: Branch::LMax,
            z: 0.008,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("fit calculations failed"));
    }

    #[test]
    fn input_errors_map_to_usage_exit_code() {
        let err: AppError = ModelError::domain("mass", "> 0", -1.0).into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Error: mass must be > 0 (got -1)");
    }
}
