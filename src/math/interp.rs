//! Linear interpolation between the two reference metallicities.
//!
//! The fit exists only at two anchors `Z1` and `Z2`. Any quantity computed at
//! both anchors is carried to a target `Z` with
//!
//! ```text
//! factor = (Z - Z1) / (Z2 - Z1)
//! value  = v1·(1 - factor) + v2·factor
//! ```
//!
//! Targets outside `[min(Z1,Z2), max(Z1,Z2)]` extrapolate along the same line;
//! nothing is clamped.

/// Position of `z` along the `z1 → z2` axis (0 at `z1`, 1 at `z2`).
///
/// Callers guarantee `z1 != z2`; the reference grid is validated for this when
/// it is built.
pub fn metallicity_factor(z1: f64, z2: f64, z: f64) -> f64 {
    (z - z1) / (z2 - z1)
}

/// Blend two anchor values with a precomputed factor.
///
/// The two-weight form reproduces each anchor value bit-for-bit at factor 0 and 1.
pub fn blend(at_z1: f64, at_z2: f64, factor: f64) -> f64 {
    at_z1 * (1.0 - factor) + at_z2 * factor
}

/// Interpolate (or extrapolate) `at_z1`/`at_z2` to metallicity `z`.
pub fn interpolate(at_z1: f64, at_z2: f64, z1: f64, z2: f64, z: f64) -> f64 {
    blend(at_z1, at_z2, metallicity_factor(z1, z2, z))
}
