//! Reference fits and the standard coefficient tables.
//!
//! The fit was derived from a stellar-evolution grid computed at two
//! metallicities, `Z = 0.008` (LMC-like, ~0.4 Zsun) and `Z = 0.004` (SMC-like,
//! ~0.2 Zsun). Each anchor carries two luminosity vectors (lower and upper
//! bound) and one slope vector.

use serde::{Deserialize, Serialize};

use crate::domain::Branch;
use crate::error::ModelError;
use crate::math::{LUMINOSITY_TERMS, SLOPE_TERMS};

/// Fit coefficients at a single reference metallicity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFit {
    pub z: f64,
    pub l_min: [f64; LUMINOSITY_TERMS],
    pub l_max: [f64; LUMINOSITY_TERMS],
    pub slope: [f64; SLOPE_TERMS],
}

impl ReferenceFit {
    pub fn luminosity_coeffs(&self, branch: Branch) -> &[f64; LUMINOSITY_TERMS] {
        match branch {
            Branch::LMin => &self.l_min,
            Branch::LMax => &self.l_max,
        }
    }
}

/// The two anchors of the metallicity interpolation.
///
/// `first` sits at interpolation factor 0 and `second` at factor 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGrid {
    pub first: ReferenceFit,
    pub second: ReferenceFit,
}

impl ReferenceGrid {
    /// Reject grids the model cannot evaluate.
    pub fn validate(&self) -> Result<(), ModelError> {
        for fit in [&self.first, &self.second] {
            if !fit.z.is_finite() {
                return Err(ModelError::domain("reference Z", "finite", fit.z));
            }
            for coeffs in [&fit.l_min, &fit.l_max] {
                let scale = coeffs[LUMINOSITY_TERMS - 1];
                if !(scale.is_finite() && scale != 0.0) {
                    return Err(ModelError::DecayScale { value: scale });
                }
                if let Some(bad) = coeffs.iter().find(|c| !c.is_finite()) {
                    return Err(ModelError::domain("luminosity coefficient", "finite", *bad));
                }
            }
            if let Some(bad) = fit.slope.iter().find(|c| !c.is_finite()) {
                return Err(ModelError::domain("slope coefficient", "finite", *bad));
            }
        }
        if self.first.z == self.second.z {
            return Err(ModelError::DegenerateReference { z: self.first.z });
        }
        Ok(())
    }

    pub fn metallicities(&self) -> (f64, f64) {
        (self.first.z, self.second.z)
    }
}

/// LMC-like anchor metallicity.
pub const Z_LMC: f64 = 0.008;
/// SMC-like anchor metallicity.
pub const Z_SMC: f64 = 0.004;

pub const L_MIN_LMC: [f64; LUMINOSITY_TERMS] = [
    2.053491, 3.790927, -0.802070, -2.976704, 0.965973, 0.185089, 0.369268, -0.374144, 0.105449,
    0.005,
];
pub const L_MAX_LMC: [f64; LUMINOSITY_TERMS] = [
    3.751088, 2.209607, -0.453056, -0.520778, 0.245808, -0.016714, -1.329120, 1.228870, -0.262928,
    0.005,
];
pub const L_MIN_SMC: [f64; LUMINOSITY_TERMS] = [
    2.125432, 3.689468, -0.763519, -2.900812, 0.934060, 0.173159, 0.308744, -0.307890, 0.090761,
    0.005,
];
pub const L_MAX_SMC: [f64; LUMINOSITY_TERMS] = [
    3.733297, 2.198926, -0.424813, -0.552451, 0.309716, -0.060483, -1.305613, 1.228668, -0.286156,
    0.005,
];

pub const SLOPE_LMC: [f64; SLOPE_TERMS] = [
    0.698967, -0.025170, 0.003576, 5.017684, -1.125765, 1.362459, -2.995227, 1.177010, -0.692827,
];
pub const SLOPE_SMC: [f64; SLOPE_TERMS] = [
    0.709244, 0.007519, -0.020923, 4.636537, -1.631714, 1.744423, -2.711640, 2.088682, -1.369483,
];

/// The published LMC/SMC grid.
pub const STANDARD_GRID: ReferenceGrid = ReferenceGrid {
    first: ReferenceFit {
        z: Z_LMC,
        l_min: L_MIN_LMC,
        l_max: L_MAX_LMC,
        slope: SLOPE_LMC,
    },
    second: ReferenceFit {
        z: Z_SMC,
        l_min: L_MIN_SMC,
        l_max: L_MAX_SMC,
        slope: SLOPE_SMC,
    },
};
