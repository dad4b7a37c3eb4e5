//! Saddle-point approximation for large shapes.
//!
//! J*(h, c) is the sum of `h` copies of a unit variable whose cumulant generating function is
//!
//! ```text
//! K(s) = ln cosh(c) − ln cos(√(2s − c²)),      s < c²/2 + π²/8
//! ```
//!
//! (`cos √q` reads as `cosh √−q` for negative `q`). For a draw `x = h·K'(s)` the
//! Barndorff-Nielsen statistic
//!
//! ```text
//! w  = sign(s) · √(2h·(s·K'(s) − K(s)))
//! v  = s · √(h·K''(s))
//! r* = w + ln(v/w) / w
//! ```
//!
//! is standard normal up to `O(1/h^{3/2})`. Sampling inverts this: draw `Z ~ N(0, 1)`, solve
//! `r*(s) = Z` and return `h·K'(s)/4`. There is no rejection step, so each draw consumes
//! exactly one normal variate.

use crate::{math::PI_SQ_8, rng::BitSource};
use std::f64::consts::LN_2;

/// Below this `|q|` the power series are used in place of the trigonometric closed forms.
const SERIES_RADIUS: f64 = 0.05;
/// Below this `|q|` the series for `ln cos √q` is used.
const LOG_COS_SERIES_RADIUS: f64 = 0.01;
/// Below this `|s|·√K''(0)` the signed root is expanded around the mean.
const EXPANSION_RADIUS: f64 = 1e-5;
const MAX_NEWTON_STEPS: usize = 200;
const MAX_BRACKET_DOUBLINGS: usize = 1000;
const NEWTON_TOLERANCE: f64 = 1e-12;

/// Taylor coefficients of `tan(√q)/√q` in powers of `q`.
const TAN_SERIES: [f64; 8] = [
    1.0,
    1.0 / 3.0,
    2.0 / 15.0,
    17.0 / 315.0,
    62.0 / 2835.0,
    1382.0 / 155_925.0,
    21844.0 / 6_081_075.0,
    929_569.0 / 638_512_875.0,
];

#[derive(Debug, Clone)]
pub(crate) struct SaddlePoint {
    shape: f64,
    half_tilt: f64,
    /// c²
    c2: f64,
    /// ln cosh(c)
    log_cosh_tilt: f64,
    /// K''(0), the unit variance.
    k2: f64,
    /// K'''(0)
    k3: f64,
    /// Limit of `r* − w` at the mean.
    offset: f64,
    /// Upper end of the domain of K.
    upper: f64,
}

impl SaddlePoint {
    pub(crate) fn new(shape: f64, tilt: f64) -> Self {
        let half_tilt = 0.5 * tilt.abs();
        let c2 = half_tilt * half_tilt;
        let (_, f1, f2) = tan_ratio(-c2);
        let k2 = 2.0 * f1;
        let k3 = 4.0 * f2;
        Self {
            shape,
            half_tilt,
            c2,
            log_cosh_tilt: log_cos_sqrt(-c2),
            k2,
            k3,
            offset: k3 / (6.0 * k2.powf(1.5) * shape.sqrt()),
            upper: 0.5 * c2 + PI_SQ_8,
        }
    }

    pub(crate) fn draw<B: BitSource + ?Sized>(&self, bits: &mut B) -> f64 {
        let s = self.solve(bits.normal());
        let (k1, _) = self.derivatives(s);
        0.25 * self.shape * k1
    }

    /// Find `s` with `r*(s) = target`.
    fn solve(&self, target: f64) -> f64 {
        let scale = (self.shape * self.k2).sqrt();
        let (mut lo, mut hi) = if target > self.offset {
            (0.0, self.upper)
        } else {
            let mut lo = -scale.recip();
            for _ in 0..MAX_BRACKET_DOUBLINGS {
                if self.signed_root(lo).0 <= target {
                    break;
                }
                lo *= 2.0;
            }
            (lo, 0.0)
        };

        let mut s = ((target - self.offset) / scale).clamp(lo, hi);
        if s <= lo || s >= hi {
            s = 0.5 * (lo + hi);
        }
        for _ in 0..MAX_NEWTON_STEPS {
            let (r, slope) = self.signed_root(s);
            // A NaN near the pole is treated as overshooting.
            if r.is_nan() || r > target {
                hi = s;
            } else {
                lo = s;
            }
            let mut next = s - (r - target) / slope;
            if !(next > lo && next < hi) {
                next = 0.5 * (lo + hi);
            }
            let done = (next - s).abs() <= NEWTON_TOLERANCE * (1.0 + s.abs());
            s = next;
            if done {
                break;
            }
        }
        s
    }

    /// `r*(s)` and the derivative of its leading part `w(s)`.
    fn signed_root(&self, s: f64) -> (f64, f64) {
        let h = self.shape;
        if (s * self.k2.sqrt()).abs() < EXPANSION_RADIUS {
            let scale = (h * self.k2).sqrt();
            let w = s * scale * (1.0 + self.k3 * s / (3.0 * self.k2));
            return (w + self.offset, scale);
        }
        let (k1, k2) = self.derivatives(s);
        let gap = (s * k1 - self.cgf(s)).max(0.0);
        let w = s.signum() * (2.0 * h * gap).sqrt();
        if w == 0.0 {
            let scale = (h * self.k2).sqrt();
            return (self.offset, scale);
        }
        let v = s * (h * k2).sqrt();
        (w + (v / w).ln() / w, h * s * k2 / w)
    }

    /// K(s)
    fn cgf(&self, s: f64) -> f64 {
        let q = 2.0 * s - self.c2;
        if q < -LOG_COS_SERIES_RADIUS && self.c2 > LOG_COS_SERIES_RADIUS {
            // Both sides are ln cosh; subtract the linear parts exactly.
            let u = (-q).sqrt();
            let c = self.half_tilt;
            2.0 * s / (c + u) + (-2.0 * c).exp().ln_1p() - (-2.0 * u).exp().ln_1p()
        } else {
            self.log_cosh_tilt - log_cos_sqrt(q)
        }
    }

    /// K'(s) and K''(s).
    fn derivatives(&self, s: f64) -> (f64, f64) {
        let (f, f1, _) = tan_ratio(2.0 * s - self.c2);
        (f, 2.0 * f1)
    }
}

/// `ln cos √q`, continued to `ln cosh √−q` for negative `q`.
fn log_cos_sqrt(q: f64) -> f64 {
    if q.abs() < LOG_COS_SERIES_RADIUS {
        -q * (0.5 + q * (1.0 / 12.0 + q * (1.0 / 45.0 + q * (17.0 / 2520.0 + q * 31.0 / 14175.0))))
    } else if q > 0.0 {
        q.sqrt().cos().ln()
    } else {
        let u = (-q).sqrt();
        u + (-2.0 * u).exp().ln_1p() - LN_2
    }
}

/// `f(q) = tan(√q)/√q` (or `tanh(√−q)/√−q`) with its first two derivatives in `q`.
fn tan_ratio(q: f64) -> (f64, f64, f64) {
    if q.abs() < SERIES_RADIUS {
        tan_ratio_series(q)
    } else {
        tan_ratio_closed(q)
    }
}

fn tan_ratio_series(q: f64) -> (f64, f64, f64) {
    let mut f = 0.0;
    let mut f1 = 0.0;
    let mut f2 = 0.0;
    for (n, &a) in TAN_SERIES.iter().enumerate().rev() {
        let nf = n as f64;
        f = f * q + a;
        if n >= 1 {
            f1 = f1 * q + nf * a;
        }
        if n >= 2 {
            f2 = f2 * q + nf * (nf - 1.0) * a;
        }
    }
    (f, f1, f2)
}

fn tan_ratio_closed(q: f64) -> (f64, f64, f64) {
    let u = q.abs().sqrt();
    let (t, dt, d2t, sign) = if q > 0.0 {
        let t = u.tan();
        let dt = 1.0 + t * t;
        (t, dt, 2.0 * t * dt, 1.0)
    } else {
        let t = u.tanh();
        let dt = 1.0 - t * t;
        (t, dt, -2.0 * t * dt, -1.0)
    };
    let u2 = u * u;
    let f = t / u;
    // derivatives in u
    let fu = dt / u - t / u2;
    let fuu = d2t / u - 2.0 * dt / u2 + 2.0 * t / (u2 * u);
    let f1 = sign * fu / (2.0 * u);
    let f2 = fuu / (4.0 * u2) - fu / (4.0 * u2 * u);
    (f, f1, f2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{pg_mean, pg_variance};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn tan_ratio_branches_agree_at_the_series_switch() {
        for &q in &[SERIES_RADIUS, -SERIES_RADIUS, 0.02, -0.02] {
            let series = tan_ratio_series(q);
            let closed = tan_ratio_closed(q);
            assert_relative_eq!(series.0, closed.0, max_relative = 1e-12);
            assert_relative_eq!(series.1, closed.1, max_relative = 1e-9);
            assert_relative_eq!(series.2, closed.2, max_relative = 1e-7);
        }
        let u = SERIES_RADIUS.sqrt();
        assert_relative_eq!(tan_ratio(SERIES_RADIUS).0, u.tan() / u, max_relative = 1e-14);
    }

    #[test]
    fn tan_ratio_derivatives_match_finite_differences() {
        for &q in &[-30.0, -2.0, 0.7, 2.0] {
            let eps = 1e-6;
            let (_, f1, f2) = tan_ratio(q);
            let fd1 = (tan_ratio(q + eps).0 - tan_ratio(q - eps).0) / (2.0 * eps);
            let fd2 = (tan_ratio(q + eps).1 - tan_ratio(q - eps).1) / (2.0 * eps);
            assert_relative_eq!(f1, fd1, max_relative = 1e-6);
            assert_relative_eq!(f2, fd2, max_relative = 1e-5);
        }
    }

    #[test]
    fn unit_cumulants_match_pg_moments() {
        for &z in &[0.0, 1.0, 6.0, -40.0] {
            let sp = SaddlePoint::new(1.0, z);
            let (k1, k2) = sp.derivatives(0.0);
            assert_relative_eq!(0.25 * k1, pg_mean(1.0, z), max_relative = 1e-9);
            assert_relative_eq!(0.0625 * k2, pg_variance(1.0, z), max_relative = 1e-6);
            assert_relative_eq!(sp.cgf(0.0), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn cgf_branches_agree() {
        let sp = SaddlePoint::new(10.0, 6.0);
        let s = -0.4;
        let direct = sp.log_cosh_tilt - log_cos_sqrt(2.0 * s - sp.c2);
        assert_relative_eq!(sp.cgf(s), direct, max_relative = 1e-10);
    }

    #[test]
    fn signed_root_is_increasing_and_inverted() {
        let sp = SaddlePoint::new(20.0, 3.0);
        let grid: Vec<f64> = (-40..40).map(|i| i as f64 * 0.05).collect();
        let roots: Vec<f64> = grid.iter().map(|&s| sp.signed_root(s).0).collect();
        assert!(roots.windows(2).all(|w| w[1] > w[0]));
        for &target in &[-4.0, -0.5, 0.0, 0.3, 3.0, 6.0] {
            let s = sp.solve(target);
            assert_relative_eq!(sp.signed_root(s).0, target, epsilon = 1e-8);
        }
    }

    #[test]
    fn extreme_normals_stay_in_the_domain() {
        let sp = SaddlePoint::new(8.0, 0.0);
        for &target in &[-12.0, 12.0] {
            let s = sp.solve(target);
            assert!(s < sp.upper);
            let (k1, _) = sp.derivatives(s);
            assert!(k1.is_finite() && k1 > 0.0, "{target}: {k1}");
        }
    }

    #[test]
    fn moments_match_theory() {
        let mut rng = StdRng::seed_from_u64(51);
        for &(h, z) in &[(8.0, 0.0), (30.0, 5.0), (300.0, -2.0)] {
            let sp = SaddlePoint::new(h, z);
            let n = 20_000;
            let xs: Vec<f64> = (0..n).map(|_| sp.draw(&mut rng)).collect();
            let m = xs.iter().sum::<f64>() / n as f64;
            let v = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n as f64 - 1.0);
            assert_relative_eq!(m, pg_mean(h, z), max_relative = 0.01);
            assert_relative_eq!(v, pg_variance(h, z), max_relative = 0.06);
        }
    }
}
