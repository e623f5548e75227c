//! Grid-range validation.
//!
//! The fits are only calibrated over part of parameter space. This module
//! turns an evaluated point into an ordered list of [`Warning`]s:
//!
//! 1. reliability: bound ordering has inverted (terminal, nothing else is checked)
//! 2. mass range (input mass, or each solved mass)
//! 3. hydrogen fraction range
//! 4. metallicity: interpolated or extrapolated away from the anchors
//!
//! Warnings never block a result; failures are [`crate::error::ModelError`]s.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::{Bound, Bounds, Composition, Direction, MassSolution};

/// Lowest mass in the model grid (Msun).
pub const GRID_MASS_MIN: f64 = 1.0;
/// Highest mass covered by the `L_max` / `M_min` fit (Msun).
pub const GRID_MASS_MAX_UPPER: f64 = 18.0;
/// Highest mass covered by the `L_min`, `L_He` / `M_max`, `M_He` fits (Msun).
pub const GRID_MASS_MAX: f64 = 40.0;
/// Highest hydrogen fraction in the model grid.
pub const GRID_X_MAX: f64 = 0.7;

/// How a metallicity relates to the two anchors, when it is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZBlend {
    Interpolated,
    Extrapolated,
}

/// `None` at an anchor, otherwise whether `z` lies strictly between them.
pub fn z_blend(z1: f64, z2: f64, z: f64) -> Option<ZBlend> {
    if z == z1 || z == z2 {
        None
    } else if z1.min(z2) < z && z < z1.max(z2) {
        Some(ZBlend::Interpolated)
    } else {
        Some(ZBlend::Extrapolated)
    }
}

/// A soft advisory (or the terminal reliability warning) about a result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warning {
    /// Min/max/helium ordering has inverted; no number should be trusted.
    Unreliable,
    /// Input mass outside the range of the `L_max` fit.
    InputMassOutsideUpperFit,
    /// Input mass outside the range of the `L_min` and `L_He` fits.
    InputMassOutsideLowerFit,
    /// A solved mass outside the range of the fit it came from.
    OutputMassOutsideGrid { bound: Bound },
    HydrogenOutsideGrid,
    Metallicity {
        direction: Direction,
        blend: ZBlend,
        z1: f64,
        z2: f64,
    },
}

impl Warning {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Warning::Unreliable)
    }
}

fn mass_limit(bound: Bound) -> f64 {
    match bound {
        Bound::Min => GRID_MASS_MAX_UPPER,
        Bound::Max | Bound::Helium => GRID_MASS_MAX,
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Unreliable => f.write_str(
                "One or more inputs are well beyond the grid range. \
                 The fit calculations may not be reliable.",
            ),
            Warning::InputMassOutsideUpperFit => write!(
                f,
                "Input mass is outside the grid range for L_max ({GRID_MASS_MIN} ≤ M ≤ {GRID_MASS_MAX_UPPER})"
            ),
            Warning::InputMassOutsideLowerFit => write!(
                f,
                "Input mass is outside the grid range for L_min and L_He ({GRID_MASS_MIN} ≤ M ≤ {GRID_MASS_MAX})"
            ),
            Warning::OutputMassOutsideGrid { bound } => {
                let name = match bound {
                    Bound::Min => "M_min",
                    Bound::Max => "M_max",
                    Bound::Helium => "M_He",
                };
                write!(
                    f,
                    "Output {name} is outside grid range ({GRID_MASS_MIN} ≤ M ≤ {})",
                    mass_limit(*bound)
                )
            }
            Warning::HydrogenOutsideGrid => {
                write!(f, "Input X is outside grid range (0 ≤ X ≤ {GRID_X_MAX})")
            }
            Warning::Metallicity {
                direction,
                blend,
                z1,
                z2,
            } => {
                let quantity = match direction {
                    Direction::Luminosity => "Luminosity",
                    Direction::Mass => "Mass",
                };
                match blend {
                    ZBlend::Interpolated => write!(
                        f,
                        "{quantity} and slope values are interpolated between Z = {z1} and {z2}"
                    ),
                    ZBlend::Extrapolated => write!(
                        f,
                        "{quantity} and slope values are extrapolated beyond Z = {z1} and {z2}"
                    ),
                }
            }
        }
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What was evaluated, for validation purposes.
#[derive(Debug, Clone, Copy)]
pub enum Evaluation<'a> {
    /// Forward direction: the input mass and the luminosity bounds it produced.
    Luminosity { mass: f64, bounds: &'a Bounds },
    /// Inverse direction: the solved masses.
    Mass(&'a MassSolution),
}

impl Evaluation<'_> {
    fn direction(&self) -> Direction {
        match self {
            Evaluation::Luminosity { .. } => Direction::Luminosity,
            Evaluation::Mass(_) => Direction::Mass,
        }
    }
}

fn outside(value: f64, lo: f64, hi: f64) -> bool {
    value < lo || value > hi
}

/// Check an evaluated point against the grid ranges.
///
/// `anchors` are the reference metallicities `(Z1, Z2)`. The order of the
/// returned list is fixed (see module docs) and nothing is deduplicated.
pub fn validate(
    composition: &Composition,
    evaluation: Evaluation<'_>,
    anchors: (f64, f64),
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    match evaluation {
        Evaluation::Luminosity { mass, bounds } => {
            if !bounds.is_ordered() {
                return vec![Warning::Unreliable];
            }
            if outside(mass, GRID_MASS_MIN, GRID_MASS_MAX_UPPER) {
                warnings.push(Warning::InputMassOutsideUpperFit);
            }
            if outside(mass, GRID_MASS_MIN, GRID_MASS_MAX) {
                warnings.push(Warning::InputMassOutsideLowerFit);
            }
        }
        Evaluation::Mass(MassSolution::HeliumOnly { he }) => {
            if outside(*he, GRID_MASS_MIN, GRID_MASS_MAX) {
                warnings.push(Warning::OutputMassOutsideGrid { bound: Bound::Helium });
            }
        }
        Evaluation::Mass(MassSolution::Bracketed { bounds }) => {
            if !bounds.is_ordered() {
                return vec![Warning::Unreliable];
            }
            for bound in [Bound::Min, Bound::Max, Bound::Helium] {
                if outside(bounds.get(bound), GRID_MASS_MIN, mass_limit(bound)) {
                    warnings.push(Warning::OutputMassOutsideGrid { bound });
                }
            }
        }
    }

    if composition.x() > GRID_X_MAX {
        warnings.push(Warning::HydrogenOutsideGrid);
    }

    let (z1, z2) = anchors;
    if let Some(blend) = z_blend(z1, z2, composition.z()) {
        warnings.push(Warning::Metallicity {
            direction: evaluation.direction(),
            blend,
            z1,
            z2,
        });
    }

    warnings
}
