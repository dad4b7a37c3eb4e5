//! Numerically careful scalar helpers.

use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

pub(crate) const PI_SQ: f64 = PI * PI;
/// π²/8, the decay rate of the leading Jacobi term.
pub(crate) const PI_SQ_8: f64 = PI_SQ / 8.0;
/// ½·ln(2π)
pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// `ln Φ(x)` for the standard normal CDF, accurate far into the lower tail.
pub(crate) fn log_norm_cdf(x: f64) -> f64 {
    if x > -30.0 {
        (0.5 * erfc(-x * FRAC_1_SQRT_2)).ln()
    } else {
        // Mills ratio expansion; erfc underflows below here.
        let x2 = x * x;
        -0.5 * x2 - (-x).ln() - LN_SQRT_2PI + (-1.0 / x2 + 3.0 / (x2 * x2)).ln_1p()
    }
}

/// `ln(e^a + e^b)` without overflow.
pub(crate) fn log_add_exp(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if hi == f64::NEG_INFINITY {
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// `1 / (1 + e^x)`, saturating to 0 or 1.
pub(crate) fn logistic_complement(x: f64) -> f64 {
    if x > 0.0 {
        let e = (-x).exp();
        e / (1.0 + e)
    } else {
        1.0 / (1.0 + x.exp())
    }
}

/// `tanh(x) / x`, equal to 1 at the origin.
pub(crate) fn tanhc(x: f64) -> f64 {
    if x.abs() < 1e-4 {
        1.0 - x * x / 3.0
    } else {
        x.tanh() / x
    }
}

/// Mean of PG(h, z).
pub(crate) fn pg_mean(h: f64, z: f64) -> f64 {
    0.25 * h * tanhc(0.5 * z)
}

/// Variance of PG(h, z).
pub(crate) fn pg_variance(h: f64, z: f64) -> f64 {
    let z = z.abs();
    if z < 1e-3 {
        h * (1.0 / 24.0 - z * z / 120.0)
    } else {
        // sinh(z)/cosh²(z/2) = 2·tanh(z/2), which stays finite for large z.
        let th = (0.5 * z).tanh();
        h * (2.0 * th - z * (1.0 - th * th)) / (4.0 * z * z * z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::distribution::{ContinuousCDF, Normal};

    #[test]
    fn log_norm_cdf_matches_statrs_in_the_bulk() {
        let n = Normal::standard();
        for &x in &[-8.0, -2.5, -0.3, 0.0, 1.0, 4.0] {
            assert_relative_eq!(log_norm_cdf(x), n.cdf(x).ln(), max_relative = 1e-10);
        }
    }

    #[test]
    fn log_norm_cdf_is_continuous_at_the_switch() {
        let inside = log_norm_cdf(-29.999_999);
        let outside = log_norm_cdf(-30.000_001);
        assert_relative_eq!(inside, outside, max_relative = 1e-6);
        assert!(log_norm_cdf(-1e4).is_finite());
    }

    #[test]
    fn log_add_exp_handles_extremes() {
        assert_relative_eq!(log_add_exp(0.0, 0.0), 2f64.ln());
        assert_relative_eq!(log_add_exp(1000.0, 0.0), 1000.0);
        assert_eq!(log_add_exp(f64::NEG_INFINITY, -5.0), -5.0);
        assert_eq!(
            log_add_exp(f64::NEG_INFINITY, f64::NEG_INFINITY),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn logistic_complement_saturates() {
        assert_relative_eq!(logistic_complement(0.0), 0.5);
        assert_eq!(logistic_complement(f64::INFINITY), 0.0);
        assert_eq!(logistic_complement(f64::NEG_INFINITY), 1.0);
        assert!(logistic_complement(800.0) >= 0.0);
    }

    #[test]
    fn moments_are_continuous_at_the_origin() {
        assert_relative_eq!(pg_mean(2.0, 0.0), 0.5);
        assert_relative_eq!(pg_mean(2.0, 1e-5), 0.5, max_relative = 1e-9);
        assert_relative_eq!(pg_variance(3.0, 0.0), 0.125);
        assert_relative_eq!(
            pg_variance(3.0, 0.999e-3),
            pg_variance(3.0, 1.001e-3),
            max_relative = 1e-6
        );
    }

    #[test]
    fn moments_agree_with_textbook_formulae() {
        let (h, z) = (1.7, 2.3_f64);
        let mean = h * (0.5 * z).tanh() / (2.0 * z);
        let var = h * (z.sinh() - z) / (4.0 * z.powi(3) * (0.5 * z).cosh().powi(2));
        assert_relative_eq!(pg_mean(h, z), mean, max_relative = 1e-12);
        assert_relative_eq!(pg_variance(h, -z), var, max_relative = 1e-12);
        assert!(pg_variance(1.0, 2000.0).is_finite());
    }
}
