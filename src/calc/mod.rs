//! Public entry points: luminosity from mass, and mass from luminosity.
//!
//! Both directions return the numbers together with the grid-range warnings,
//! and attach a slope label to every reported bound:
//!
//! | direction  | min            | max    | helium |
//! |------------|----------------|--------|--------|
//! | luminosity | interpolated s | `0`    | `inf`  |
//! | mass       | interpolated s | `0`    | `inf`  |
//!
//! Hydrogen-free inputs (`X = 0`) only report the helium bound.

use serde::Serialize;

use crate::domain::{
    Bound, Bounds, Branch, Composition, Direction, MassSolution, Slope, SolverConfig,
    checked_luminosity, checked_mass,
};
use crate::error::ModelError;
use crate::models::MlRelation;
use crate::validate::{Evaluation, Warning, validate};

/// One reported value with its slope label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Row {
    pub bound: Bound,
    pub value: f64,
    pub slope: Slope,
}

/// Result of the luminosity direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuminosityOutput {
    pub mass: f64,
    pub composition: Composition,
    /// `log10(L/Lsun)` bounds. Always computed, even when only `he` is reported.
    pub bounds: Bounds,
    /// Slope attached to `L_min`.
    pub slope: f64,
    pub warnings: Vec<Warning>,
}

impl LuminosityOutput {
    pub fn rows(&self) -> Vec<Row> {
        if self.composition.is_helium_only() {
            return vec![Row {
                bound: Bound::Helium,
                value: self.bounds.he,
                slope: Slope::Vertical,
            }];
        }
        bracketed_rows(&self.bounds, self.slope)
    }
}

/// Result of the mass direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassOutput {
    /// Target `log10(L/Lsun)`.
    pub luminosity: f64,
    pub composition: Composition,
    pub solution: MassSolution,
    /// Slope at `M_min`; absent for hydrogen-free inputs.
    pub slope: Option<f64>,
    pub warnings: Vec<Warning>,
}

impl MassOutput {
    pub fn rows(&self) -> Vec<Row> {
        match (&self.solution, self.slope) {
            (MassSolution::Bracketed { bounds }, Some(slope)) => bracketed_rows(bounds, slope),
            _ => vec![Row {
                bound: Bound::Helium,
                value: self.solution.helium(),
                slope: Slope::Vertical,
            }],
        }
    }
}

fn bracketed_rows(bounds: &Bounds, slope: f64) -> Vec<Row> {
    vec![
        Row {
            bound: Bound::Min,
            value: bounds.min,
            slope: Slope::Finite(slope),
        },
        Row {
            bound: Bound::Max,
            value: bounds.max,
            slope: Slope::Flat,
        },
        Row {
            bound: Bound::Helium,
            value: bounds.he,
            slope: Slope::Vertical,
        },
    ]
}

/// Either direction's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum Output {
    Luminosity(LuminosityOutput),
    Mass(MassOutput),
}

impl Output {
    pub fn direction(&self) -> Direction {
        match self {
            Output::Luminosity(_) => Direction::Luminosity,
            Output::Mass(_) => Direction::Mass,
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        match self {
            Output::Luminosity(out) => out.rows(),
            Output::Mass(out) => out.rows(),
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match self {
            Output::Luminosity(out) => &out.warnings,
            Output::Mass(out) => &out.warnings,
        }
    }

    /// `false` when the bound ordering inverted and the numbers are not to be trusted.
    pub fn is_reliable(&self) -> bool {
        !self.warnings().iter().any(Warning::is_terminal)
    }
}

/// Luminosity bounds and slope for a star of `mass` Msun.
pub fn forward(
    rel: &MlRelation,
    mass: f64,
    composition: Composition,
) -> Result<LuminosityOutput, ModelError> {
    let mass = checked_mass(mass)?;
    let (x, z) = (composition.x(), composition.z());

    let bounds = rel.luminosity_bounds(mass, x, z)?;
    let slope = rel.slope(mass, x, z)?;
    let warnings = validate(
        &composition,
        Evaluation::Luminosity {
            mass,
            bounds: &bounds,
        },
        rel.metallicities(),
    );

    Ok(LuminosityOutput {
        mass,
        composition,
        bounds,
        slope,
        warnings,
    })
}

/// Mass bounds and slope for a star of `log10(L/Lsun) = lum`.
///
/// Any failed inversion fails the whole call; there is no partial result.
pub fn inverse(
    rel: &MlRelation,
    lum: f64,
    composition: Composition,
    solver: &SolverConfig,
) -> Result<MassOutput, ModelError> {
    let lum = checked_luminosity(lum)?;
    solver.validate()?;
    let opts = solver.bisect_options();
    let (x, z) = (composition.x(), composition.z());

    let (solution, slope) = if composition.is_helium_only() {
        let he = rel.solve_mass(lum, 0.0, z, Branch::LMax, solver.bracket(Bound::Helium), &opts)?;
        (MassSolution::HeliumOnly { he }, None)
    } else {
        let max = rel.solve_mass(lum, x, z, Branch::LMin, solver.bracket(Bound::Max), &opts)?;
        let min = rel.solve_mass(lum, x, z, Branch::LMax, solver.bracket(Bound::Min), &opts)?;
        let he = rel.solve_mass(lum, 0.0, z, Branch::LMax, solver.bracket(Bound::Helium), &opts)?;
        let slope = rel.slope(min, x, z)?;
        (
            MassSolution::Bracketed {
                bounds: Bounds { min, max, he },
            },
            Some(slope),
        )
    };

    let warnings = validate(&composition, Evaluation::Mass(&solution), rel.metallicities());

    Ok(MassOutput {
        luminosity: lum,
        composition,
        solution,
        slope,
        warnings,
    })
}

/// Dispatch on `direction`: `value` is a mass (Msun) or a `log10(L/Lsun)`.
pub fn evaluate(
    rel: &MlRelation,
    direction: Direction,
    value: f64,
    composition: Composition,
    solver: &SolverConfig,
) -> Result<Output, ModelError> {
    match direction {
        Direction::Luminosity => forward(rel, value, composition).map(Output::Luminosity),
        Direction::Mass => inverse(rel, value, composition, solver).map(Output::Mass),
    }
}
