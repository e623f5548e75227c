//! Inverse model: mass from luminosity.
//!
//! Each branch is inverted at the two reference metallicities separately (a 1-D
//! bisection at a fixed anchor), and the two masses are then blended to the
//! target `Z`. This is not identical to inverting the already-blended curve;
//! the difference grows away from the anchors.
//!
//! Both branches increase with mass over the supported range and `L_max` lies
//! above `L_min`, so for a given luminosity the `L_max` branch is met at the
//! *smaller* mass. Hence the pairing used by callers:
//!
//! - `M_min` ← invert `L_max`
//! - `M_max` ← invert `L_min`
//! - `M_He`  ← invert `L_max` with `X = 0`

use crate::domain::{Branch, checked_fractions, checked_luminosity, checked_mass};
use crate::error::ModelError;
use crate::math::{BisectOptions, blend, bisect, luminosity_basis};
use crate::models::{MlRelation, ReferenceFit};

impl MlRelation {
    /// Mass (Msun) at which `branch` reaches `log10(L) = lum`, interpolated to `z`.
    ///
    /// Fails with [`ModelError::Bracketing`] if either anchor solve finds no sign
    /// change inside `bracket`; there is no partial result.
    pub fn solve_mass(
        &self,
        lum: f64,
        x: f64,
        z: f64,
        branch: Branch,
        bracket: (f64, f64),
        opts: &BisectOptions,
    ) -> Result<f64, ModelError> {
        let lum = checked_luminosity(lum)?;
        let (x, z) = checked_fractions(x, z)?;
        let low = checked_mass(bracket.0)?;
        let high = checked_mass(bracket.1)?;

        let grid = self.grid();
        let at_first = solve_at_anchor(&grid.first, lum, x, branch, (low, high), opts)?;
        let at_second = solve_at_anchor(&grid.second, lum, x, branch, (low, high), opts)?;
        log::debug!(
            "{branch} inversion of logL={lum}: M={at_first} at Z={}, M={at_second} at Z={}",
            grid.first.z,
            grid.second.z
        );

        Ok(blend(at_first, at_second, self.factor(z)))
    }
}

fn solve_at_anchor(
    fit: &ReferenceFit,
    lum: f64,
    x: f64,
    branch: Branch,
    (low, high): (f64, f64),
    opts: &BisectOptions,
) -> Result<f64, ModelError> {
    let coeffs = fit.luminosity_coeffs(branch);
    bisect(|m| luminosity_basis(m.log10(), x, coeffs) - lum, low, high, opts)
        .ok_or(ModelError::Bracketing { branch, z: fit.z })
}
