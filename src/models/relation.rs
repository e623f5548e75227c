//! Forward model: luminosity bounds and slope at arbitrary metallicity.
//!
//! Every quantity is evaluated at both reference fits and then carried to the
//! target `Z` with [`crate::math::blend`]. The pure-helium luminosity always
//! uses the `L_max` coefficients with `X` forced to 0, whatever the caller's `X`.

use crate::domain::{Bounds, Branch, checked_fractions, checked_mass};
use crate::error::ModelError;
use crate::math::{blend, luminosity_basis, metallicity_factor, slope_basis};
use crate::models::{ReferenceFit, ReferenceGrid, STANDARD_GRID};

/// The mass–luminosity relation defined by a validated reference grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MlRelation {
    grid: ReferenceGrid,
}

impl Default for MlRelation {
    fn default() -> Self {
        Self::standard()
    }
}

impl MlRelation {
    /// The relation built on the published LMC/SMC coefficients.
    pub fn standard() -> Self {
        Self { grid: STANDARD_GRID }
    }

    /// Build a relation from a custom grid, rejecting grids that would divide by zero.
    pub fn new(grid: ReferenceGrid) -> Result<Self, ModelError> {
        grid.validate()?;
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &ReferenceGrid {
        &self.grid
    }

    /// `(Z1, Z2)` of the two anchors.
    pub fn metallicities(&self) -> (f64, f64) {
        self.grid.metallicities()
    }

    pub(crate) fn factor(&self, z: f64) -> f64 {
        let (z1, z2) = self.metallicities();
        metallicity_factor(z1, z2, z)
    }

    /// Evaluate `f` at both anchors and blend the results to `z`.
    pub(crate) fn across_anchors(&self, z: f64, f: impl Fn(&ReferenceFit) -> f64) -> f64 {
        blend(f(&self.grid.first), f(&self.grid.second), self.factor(z))
    }

    /// `log10(L)` of one branch at `(mass, x, z)`.
    pub fn branch_luminosity(
        &self,
        mass: f64,
        x: f64,
        z: f64,
        branch: Branch,
    ) -> Result<f64, ModelError> {
        let log_m = checked_mass(mass)?.log10();
        let (x, z) = checked_fractions(x, z)?;
        Ok(self.across_anchors(z, |fit| {
            luminosity_basis(log_m, x, fit.luminosity_coeffs(branch))
        }))
    }

    /// `(L_min, L_max, L_He)` in `log10(L/Lsun)`.
    pub fn luminosity_bounds(&self, mass: f64, x: f64, z: f64) -> Result<Bounds, ModelError> {
        let log_m = checked_mass(mass)?.log10();
        let (x, z) = checked_fractions(x, z)?;
        let min = self.across_anchors(z, |fit| luminosity_basis(log_m, x, &fit.l_min));
        let max = self.across_anchors(z, |fit| luminosity_basis(log_m, x, &fit.l_max));
        let he = self.across_anchors(z, |fit| luminosity_basis(log_m, 0.0, &fit.l_max));
        Ok(Bounds { min, max, he })
    }

    /// Interpolated slope of the relation at `(mass, x, z)`.
    pub fn slope(&self, mass: f64, x: f64, z: f64) -> Result<f64, ModelError> {
        let log_m = checked_mass(mass)?.log10();
        let (x, z) = checked_fractions(x, z)?;
        Ok(self.across_anchors(z, |fit| slope_basis(log_m, x, &fit.slope)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{L_MAX_LMC, L_MAX_SMC, L_MIN_LMC, L_MIN_SMC};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unit_mass_hydrogen_free_reduces_to_two_coefficients() {
        let rel = MlRelation::standard();
        let b = rel.luminosity_bounds(1.0, 0.0, 0.008).unwrap();
        assert!(close(b.min, 2.422759), "L_min = {}", b.min);
        assert!(close(b.max, 2.421968), "L_max = {}", b.max);
        assert_eq!(b.he, b.max);
        assert!(b.min > b.max);
    }

    #[test]
    fn anchors_match_direct_evaluation() {
        let rel = MlRelation::standard();
        for &(m, x) in &[(2.0, 0.1), (5.0, 0.3), (17.5, 0.7), (30.0, 0.45)] {
            let log_m = f64::log10(m);

            let at_lmc = rel.luminosity_bounds(m, x, 0.008).unwrap();
            assert_eq!(at_lmc.min, luminosity_basis(log_m, x, &L_MIN_LMC));
            assert_eq!(at_lmc.max, luminosity_basis(log_m, x, &L_MAX_LMC));
            assert_eq!(at_lmc.he, luminosity_basis(log_m, 0.0, &L_MAX_LMC));

            let at_smc = rel.luminosity_bounds(m, x, 0.004).unwrap();
            assert_eq!(at_smc.min, luminosity_basis(log_m, x, &L_MIN_SMC));
            assert_eq!(at_smc.max, luminosity_basis(log_m, x, &L_MAX_SMC));
            assert_eq!(at_smc.he, luminosity_basis(log_m, 0.0, &L_MAX_SMC));
        }
    }

    #[test]
    fn known_points() {
        let rel = MlRelation::standard();

        let b = rel.luminosity_bounds(5.0, 0.3, 0.006).unwrap();
        assert!(close(b.min, 3.6651423196803883));
        assert!(close(b.max, 4.960065783045012));
        assert!(close(b.he, 4.4758394251817535));
        assert!(close(rel.slope(5.0, 0.3, 0.006).unwrap(), 1.8809761201240525));

        let b = rel.luminosity_bounds(15.0, 0.5, 0.002).unwrap();
        assert!(close(b.min, 4.635544732959673));
        assert!(close(b.max, 5.59600241218412));
        assert!(close(b.he, 5.475368319984702));
        assert!(close(rel.slope(15.0, 0.5, 0.002).unwrap(), 2.6649078940550304));

        assert!(close(rel.slope(1.0, 0.0, 0.008).unwrap(), 0.698967));
        assert!(close(rel.slope(10.0, 0.5, 0.004).unwrap(), 2.57235275));
    }

    #[test]
    fn helium_branch_ignores_caller_hydrogen() {
        let rel = MlRelation::standard();
        let a = rel.luminosity_bounds(8.0, 0.2, 0.005).unwrap();
        let b = rel.luminosity_bounds(8.0, 0.6, 0.005).unwrap();
        assert_eq!(a.he, b.he);
        assert_eq!(a.he, rel.branch_luminosity(8.0, 0.0, 0.005, Branch::LMax).unwrap());
    }

    #[test]
    fn non_positive_mass_is_a_domain_error() {
        let rel = MlRelation::standard();
        assert!(matches!(
            rel.luminosity_bounds(0.0, 0.3, 0.008),
            Err(ModelError::Domain { quantity: "mass", .. })
        ));
        assert!(rel.slope(-2.0, 0.3, 0.008).is_err());
    }

    #[test]
    fn unphysical_fractions_are_domain_errors() {
        let rel = MlRelation::standard();
        assert!(matches!(
            rel.luminosity_bounds(5.0, -4.0, 0.008),
            Err(ModelError::Domain { quantity: "X", .. })
        ));
        assert!(matches!(
            rel.slope(5.0, f64::NAN, 0.008),
            Err(ModelError::Domain { quantity: "X", .. })
        ));
        assert!(matches!(
            rel.luminosity_bounds(5.0, 0.3, f64::NAN),
            Err(ModelError::Domain { quantity: "Z", .. })
        ));
        assert!(matches!(
            rel.branch_luminosity(5.0, 0.3, -0.01, Branch::LMin),
            Err(ModelError::Domain { quantity: "Z", .. })
        ));
        assert!(rel.luminosity_bounds(5.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn bounds_are_ordered_inside_the_grid() {
        let rel = MlRelation::standard();
        for i in 0..14 {
            let x = 0.05 + 0.05 * i as f64;
            for j in 0..60 {
                let m = 1.0 + 17.0 * j as f64 / 59.0;
                for z in [0.008, 0.004] {
                    let b = rel.luminosity_bounds(m, x, z).unwrap();
                    assert!(b.is_ordered(), "M={m} X={x} Z={z}: {b:?}");
                }
            }
        }
    }

    #[test]
    fn both_branches_increase_with_mass() {
        // Inverting each branch by bisection relies on this.
        let rel = MlRelation::standard();
        for x in [0.0, 0.05, 0.3, 0.7] {
            for z in [0.008, 0.004] {
                let mut prev: Option<(f64, f64)> = None;
                for k in 0..200 {
                    let m = 1.0 + 39.0 * k as f64 / 199.0;
                    let lo = rel.branch_luminosity(m, x, z, Branch::LMin).unwrap();
                    let hi = rel.branch_luminosity(m, x, z, Branch::LMax).unwrap();
                    if let Some((p_lo, p_hi)) = prev {
                        assert!(lo > p_lo && hi > p_hi, "not increasing at M={m} X={x} Z={z}");
                    }
                    prev = Some((lo, hi));
                }
            }
        }
    }

    #[test]
    fn custom_grid_must_validate() {
        let mut grid = STANDARD_GRID;
        grid.first.l_min[9] = 0.0;
        assert!(MlRelation::new(grid).is_err());
        assert_eq!(MlRelation::new(STANDARD_GRID).unwrap(), MlRelation::standard());
    }
}
