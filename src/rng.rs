use rand::Rng;
use rand::distributions::{Distribution, Open01};
use rand_distr::{Exp1, StandardNormal};

/// Source of the uniform, exponential and normal variates the samplers consume.
///
/// Every [`rand::Rng`] is a `BitSource`, so any seeded generator can be passed straight to
/// [`sample`](crate::sample) or [`PolyaGamma::draw`](crate::PolyaGamma::draw). Implement the
/// trait directly to drive the samplers from something else, such as a recorded stream.
pub trait BitSource {
    /// A draw from U(0, 1) that is never exactly 0 or 1.
    fn uniform(&mut self) -> f64;
    /// A draw from Exp(1).
    fn exponential(&mut self) -> f64;
    /// A draw from N(0, 1).
    fn normal(&mut self) -> f64;
}

impl<R: Rng + ?Sized> BitSource for R {
    #[inline(always)]
    fn uniform(&mut self) -> f64 {
        Open01.sample(self)
    }

    #[inline(always)]
    fn exponential(&mut self) -> f64 {
        Exp1.sample(self)
    }

    #[inline(always)]
    fn normal(&mut self) -> f64 {
        StandardNormal.sample(self)
    }
}

/// Sample from Gamma(shape, 1) using Marsaglia & Tsang (2000).
///
/// Shapes below one are boosted: `G(a) = G(a + 1)·U^(1/a)`.
pub(crate) fn sample_gamma<B: BitSource + ?Sized>(bits: &mut B, shape: f64) -> f64 {
    if shape < 1.0 {
        let boost = (bits.uniform().ln() / shape).exp();
        return sample_gamma(bits, shape + 1.0) * boost;
    }
    let d = shape - 1.0 / 3.0;
    let c = (9.0 * d).sqrt().recip();
    loop {
        let (x, v) = loop {
            let x = bits.normal();
            let v = 1.0 + c * x;
            if v > 0.0 {
                break (x, v * v * v);
            }
        };
        let u = bits.uniform();
        let x2 = x * x;
        if u < 1.0 - 0.0331 * x2 * x2 || u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

/// Sample from Gamma(shape, rate) restricted to `(truncation, ∞)`. Requires `shape >= 1`.
///
/// When the truncation point lies below the mode, plain rejection accepts with probability
/// above one half. Otherwise the proposal is an exponential anchored at the truncation point
/// whose ratio to the target peaks there.
pub(crate) fn sample_trunc_gamma<B: BitSource + ?Sized>(
    bits: &mut B,
    shape: f64,
    rate: f64,
    truncation: f64,
) -> f64 {
    debug_assert!(shape >= 1.0);
    let mode = (shape - 1.0) / rate;
    if truncation <= mode {
        loop {
            let x = sample_gamma(bits, shape) / rate;
            if x > truncation {
                return x;
            }
        }
    }
    let slope = (shape - 1.0) / truncation;
    let proposal_rate = rate - slope;
    loop {
        let x = truncation + bits.exponential() / proposal_rate;
        let log_accept = (shape - 1.0) * (x / truncation).ln() - slope * (x - truncation);
        if bits.uniform().ln() <= log_accept {
            return x;
        }
    }
}

/// Sample from the inverse Gaussian IG(h/z, h²) truncated to `(0, truncation]`.
///
/// IG(h/z, h²) is `h²` times IG(1/(hz), 1), so the draw is delegated to the unit-shape
/// samplers with a rescaled tilt and truncation point. `z = 0` gives the truncated Lévy
/// distribution.
pub(crate) fn sample_trunc_inv_gauss<B: BitSource + ?Sized>(
    bits: &mut B,
    shape: f64,
    tilt: f64,
    truncation: f64,
) -> f64 {
    let h2 = shape * shape;
    let z = shape * tilt.abs();
    let truncation = truncation / h2;
    let mean = z.recip();
    let unit = if mean > truncation {
        sample_small_z(bits, z, truncation)
    } else {
        sample_large_z(bits, mean, truncation)
    };
    h2 * unit
}

/// Truncated IG(1/z, 1) for a mean beyond the truncation point.
///
/// Draws a truncated Lévy variate with the chi-square trick and accepts it with probability
/// `exp(-z²x/2)`.
fn sample_small_z<B: BitSource + ?Sized>(bits: &mut B, z: f64, truncation_point: f64) -> f64 {
    loop {
        let exp_sample = loop {
            let e1 = bits.exponential();
            let e2 = bits.exponential();
            if e1 * e1 <= 2.0 * e2 / truncation_point {
                break e1;
            }
        };
        let sample = 1.0 + exp_sample * truncation_point;
        let sample = truncation_point / (sample * sample);
        if bits.uniform() <= (-0.5 * z * z * sample).exp() {
            return sample;
        }
    }
}

/// Truncated IG(mean, 1) for a mean inside the truncation interval.
///
/// Michael, Schucany & Haas transform of a squared normal, repeated until the draw falls
/// below the truncation point.
fn sample_large_z<B: BitSource + ?Sized>(bits: &mut B, mean: f64, truncation_point: f64) -> f64 {
    loop {
        let normal_sample = bits.normal();
        let mean_times_normal_sq = mean * normal_sample * normal_sample;
        let half_mean = 0.5 * mean;
        let discriminant =
            (4.0 * mean_times_normal_sq + mean_times_normal_sq * mean_times_normal_sq).sqrt();
        let mut sample = mean + half_mean * mean_times_normal_sq - half_mean * discriminant;
        if bits.uniform() > mean / (mean + sample) {
            sample = mean * mean / sample;
        }
        if sample <= truncation_point {
            return sample;
        }
    }
}
