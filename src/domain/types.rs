//! Shared domain types.
//!
//! These types are small `Copy` values so they can be passed freely between the
//! model, the validator, and the reporting layer, and serialized for exports.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::math::BisectOptions;

/// One of the two monotone luminosity branches of the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Lower luminosity bound at a given mass.
    LMin,
    /// Upper luminosity bound at a given mass (also the pure-helium curve at X = 0).
    LMax,
}

impl Branch {
    pub fn display_name(self) -> &'static str {
        match self {
            Branch::LMin => "L_min",
            Branch::LMax => "L_max",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which way the relation is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Mass in, luminosity bounds out.
    #[value(name = "lum")]
    Luminosity,
    /// Luminosity in, mass bounds out.
    #[value(name = "mass")]
    Mass,
}

/// Position of a value inside a min/max/helium triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
    Helium,
}

/// Slope annotation attached to a reported bound.
///
/// `Flat` and `Vertical` are labels tied to the branch that produced a value,
/// not numbers; keeping them symbolic stops an infinity from leaking into
/// arithmetic downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slope {
    /// Bound that is flat by construction ("0").
    Flat,
    /// Interpolated slope from the slope fit.
    Finite(f64),
    /// Pure-helium branch ("inf").
    Vertical,
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slope::Flat => f.write_str("0"),
            Slope::Finite(s) => write!(f, "{s:.2}"),
            Slope::Vertical => f.write_str("inf"),
        }
    }
}

/// Hydrogen (`X`) and metal (`Z`) mass fractions of a star.
///
/// Construction enforces `X ≥ 0`, `Z ≥ 0`, `X + Z ≤ 1` and finiteness, so
/// every `Composition` reaching the model is physically meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Composition {
    x: f64,
    z: f64,
}

impl Composition {
    pub fn new(x: f64, z: f64) -> Result<Self, ModelError> {
        let (x, z) = checked_fractions(x, z)?;
        if x + z > 1.0 {
            return Err(ModelError::Composition { x, z });
        }
        Ok(Self { x, z })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// A hydrogen-free star: only the pure-helium branch is meaningful.
    pub fn is_helium_only(&self) -> bool {
        self.x == 0.0
    }
}

/// Check that a mass can be fed to `log10`.
pub fn checked_mass(mass: f64) -> Result<f64, ModelError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(ModelError::domain("mass", "a finite value > 0", mass))
    }
}

/// Check that a log-luminosity is usable as a root-finding target.
pub fn checked_luminosity(lum: f64) -> Result<f64, ModelError> {
    if lum.is_finite() {
        Ok(lum)
    } else {
        Err(ModelError::domain("log L", "finite", lum))
    }
}

/// Check that `X` and `Z` are finite, non-negative mass fractions.
///
/// The sum is not checked here; [`Composition::new`] adds that.
pub fn checked_fractions(x: f64, z: f64) -> Result<(f64, f64), ModelError> {
    if !(x.is_finite() && x >= 0.0) {
        return Err(ModelError::domain("X", "a finite value >= 0", x));
    }
    if !(z.is_finite() && z >= 0.0) {
        return Err(ModelError::domain("Z", "a finite value >= 0", z));
    }
    Ok((x, z))
}

/// A `(min, max, helium)` triple of luminosities or masses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub he: f64,
}

impl Bounds {
    pub fn get(&self, bound: Bound) -> f64 {
        match bound {
            Bound::Min => self.min,
            Bound::Max => self.max,
            Bound::Helium => self.he,
        }
    }

    /// `min ≤ he ≤ max`, evaluated the way the reliability check phrases it.
    ///
    /// Comparisons involving NaN count as ordered, so only a genuine inversion
    /// trips this.
    pub fn is_ordered(&self) -> bool {
        !(self.min > self.max || self.min > self.he || self.max < self.he)
    }
}

/// Masses recovered from a luminosity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MassSolution {
    /// `X = 0`: only the pure-helium mass exists.
    HeliumOnly { he: f64 },
    /// `X > 0`: `M_min ≤ M_He ≤ M_max` when the fit behaves.
    Bracketed { bounds: Bounds },
}

impl MassSolution {
    pub fn helium(&self) -> f64 {
        match self {
            MassSolution::HeliumOnly { he } => *he,
            MassSolution::Bracketed { bounds } => bounds.he,
        }
    }
}

/// Root-finding settings for the mass direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Stop when `|f(mid)|` or the bracket half-width drops below this.
    pub tolerance: f64,
    pub max_iter: usize,
    /// Decimal digits kept on a returned root.
    pub round_digits: u32,
    /// Lower end of every mass bracket (Msun).
    pub mass_floor: f64,
    /// Upper end of the `M_max` and `M_He` brackets (Msun).
    pub mass_ceiling: f64,
    /// Upper end of the `M_min` bracket (Msun).
    pub min_mass_ceiling: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iter: 100,
            round_digits: 5,
            mass_floor: 0.01,
            mass_ceiling: 100.0,
            min_mass_ceiling: 50.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "tolerance must be finite and > 0 (got {})",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(ModelError::InvalidConfig("max_iter must be >= 1".to_string()));
        }
        if !(self.mass_floor.is_finite() && self.mass_floor > 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "mass_floor must be finite and > 0 (got {})",
                self.mass_floor
            )));
        }
        for (name, ceiling) in [
            ("mass_ceiling", self.mass_ceiling),
            ("min_mass_ceiling", self.min_mass_ceiling),
        ] {
            if !(ceiling.is_finite() && ceiling > self.mass_floor) {
                return Err(ModelError::InvalidConfig(format!(
                    "{name} must be finite and above mass_floor={} (got {ceiling})",
                    self.mass_floor
                )));
            }
        }
        Ok(())
    }

    pub fn bisect_options(&self) -> BisectOptions {
        BisectOptions {
            tol: self.tolerance,
            max_iter: self.max_iter,
            round_digits: self.round_digits,
        }
    }

    /// Bracket used to invert `branch` when solving for `bound`.
    pub fn bracket(&self, bound: Bound) -> (f64, f64) {
        match bound {
            Bound::Min => (self.mass_floor, self.min_mass_ceiling),
            Bound::Max | Bound::Helium => (self.mass_floor, self.mass_ceiling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_accepts_zero_fractions() {
        let c = Composition::new(0.0, 0.0).unwrap();
        assert!(c.is_helium_only());
    }

    #[test]
    fn composition_rejects_negative_and_overfull() {
        assert!(matches!(
            Composition::new(-0.1, 0.01),
            Err(ModelError::Domain { quantity: "X", .. })
        ));
        assert!(matches!(
            Composition::new(0.3, -0.01),
            Err(ModelError::Domain { quantity: "Z", .. })
        ));
        assert!(matches!(
            Composition::new(0.995, 0.01),
            Err(ModelError::Composition { .. })
        ));
        assert!(Composition::new(f64::NAN, 0.01).is_err());
    }

    #[test]
    fn fractions_must_be_finite_and_non_negative() {
        assert_eq!(checked_fractions(0.3, 0.0).unwrap(), (0.3, 0.0));
        assert!(checked_fractions(-4.0, 0.008).is_err());
        assert!(checked_fractions(0.3, f64::NAN).is_err());
        assert!(checked_fractions(f64::INFINITY, 0.008).is_err());
    }

    #[test]
    fn mass_must_be_positive() {
        assert!(checked_mass(0.0).is_err());
        assert!(checked_mass(-3.0).is_err());
        assert!(checked_mass(f64::INFINITY).is_err());
        assert_eq!(checked_mass(2.5).unwrap(), 2.5);
    }

    #[test]
    fn slope_labels_match_report_convention() {
        assert_eq!(Slope::Flat.to_string(), "0");
        assert_eq!(Slope::Vertical.to_string(), "inf");
        assert_eq!(Slope::Finite(1.926064).to_string(), "1.93");
    }

    #[test]
    fn ordering_check_flags_inversions_only() {
        let ok = Bounds { min: 3.6, max: 4.9, he: 4.4 };
        assert!(ok.is_ordered());
        let inverted = Bounds { min: 2.422759, max: 2.421968, he: 2.421968 };
        assert!(!inverted.is_ordered());
        let he_above_max = Bounds { min: 5.5, max: 6.07, he: 6.19 };
        assert!(!he_above_max.is_ordered());
    }

    #[test]
    fn default_solver_config_is_valid() {
        let cfg = SolverConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.bracket(Bound::Min), (0.01, 50.0));
        assert_eq!(cfg.bracket(Bound::Helium), (0.01, 100.0));
    }

    #[test]
    fn solver_config_rejects_bad_settings() {
        let zero_tol = SolverConfig { tolerance: 0.0, ..SolverConfig::default() };
        assert!(zero_tol.validate().is_err());
        let no_iter = SolverConfig { max_iter: 0, ..SolverConfig::default() };
        assert!(no_iter.validate().is_err());
        let inverted = SolverConfig { min_mass_ceiling: 0.001, ..SolverConfig::default() };
        assert!(inverted.validate().is_err());
    }
}
