//! Basis functions of the mass–luminosity fit.
//!
//! Both fits are written in terms of `ℓ = log10(M)` and the hydrogen fraction `X`:
//!
//! - luminosity (10 coefficients):
//!   `q(c0,c1,c2) + X·q(c3,c4,c5) + exp(-X / c9)·q(c6,c7,c8)`
//! - slope (9 coefficients):
//!   `q(f1,f2,f3) + X·q(f4,f5,f6) + X²·q(f7,f8,f9)`
//!
//! where `q(a,b,c) = a + b·ℓ + c·ℓ²`.
//!
//! The functions take `ℓ` rather than `M` so the domain check on the mass lives
//! with the caller; given finite inputs and a non-zero decay scale they cannot
//! produce a non-finite value.

/// Number of coefficients in a luminosity vector.
pub const LUMINOSITY_TERMS: usize = 10;

/// Number of coefficients in a slope vector.
pub const SLOPE_TERMS: usize = 9;

#[inline]
fn quadratic(a: f64, b: f64, c: f64, log_m: f64) -> f64 {
    a + b * log_m + c * log_m * log_m
}

/// Evaluate the luminosity basis at `log_m = log10(M)`.
///
/// At `X = 0` the exponential factor is exactly 1, so the third quadratic is
/// always fully present for hydrogen-free stars.
pub fn luminosity_basis(log_m: f64, x: f64, c: &[f64; LUMINOSITY_TERMS]) -> f64 {
    let decay = (-x / c[9]).exp();
    quadratic(c[0], c[1], c[2], log_m)
        + x * quadratic(c[3], c[4], c[5], log_m)
        + decay * quadratic(c[6], c[7], c[8], log_m)
}

/// Evaluate the slope basis at `log_m = log10(M)`.
pub fn slope_basis(log_m: f64, x: f64, f: &[f64; SLOPE_TERMS]) -> f64 {
    quadratic(f[0], f[1], f[2], log_m)
        + x * quadratic(f[3], f[4], f[5], log_m)
        + x * x * quadratic(f[6], f[7], f[8], log_m)
}
