//! Bracketing root finder.
//!
//! Plain bisection: robust, derivative-free, and good enough for the smooth,
//! monotone 1-D curves we invert. The caller supplies a bracket `[a, b]`; if
//! `f(a)` and `f(b)` share a sign there is no guaranteed root and we report
//! `None` instead of guessing.

/// Stopping rules for [`bisect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectOptions {
    /// Stop once `|f(mid)| < tol` or the bracket half-width is below `tol`.
    pub tol: f64,
    pub max_iter: usize,
    /// Decimal digits kept on the returned midpoint.
    pub round_digits: u32,
}

impl Default for BisectOptions {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iter: 100,
            round_digits: 5,
        }
    }
}

/// Find a root of `f` inside `[a, b]`.
///
/// Returns `None` when the endpoints do not bracket a sign change (or `f` is
/// not finite there). If `max_iter` runs out before either stopping rule is
/// met, the midpoint of the final bracket is returned as a best effort.
pub fn bisect<F>(f: F, a: f64, b: f64, opts: &BisectOptions) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let fb = f(b);

    if !(fa.is_finite() && fb.is_finite()) || fa * fb > 0.0 {
        log::debug!("bisect: no sign change on [{a}, {b}] (f(a)={fa}, f(b)={fb})");
        return None;
    }

    for iter in 0..opts.max_iter {
        let c = (a + b) / 2.0;
        let fc = f(c);
        if fc.abs() < opts.tol || (b - a) / 2.0 < opts.tol {
            log::debug!("bisect: converged after {} iterations at {c}", iter + 1);
            return Some(round_to(c, opts.round_digits));
        }
        if fa * fc < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }

    log::debug!(
        "bisect: max_iter={} exhausted, returning midpoint of [{a}, {b}]",
        opts.max_iter
    );
    Some(round_to((a + b) / 2.0, opts.round_digits))
}

/// Round `value` to `digits` decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
