use crate::{
    config::SamplerConfig,
    error::NumericalStall,
    math::{LN_SQRT_2PI, PI_SQ_8, log_add_exp, log_norm_cdf, logistic_complement},
    method::Sampler,
    rng::{BitSource, sample_trunc_gamma, sample_trunc_inv_gauss},
};
use statrs::function::gamma::{gamma_ur, ln_gamma};
use std::f64::consts::{FRAC_PI_2, LN_2};

/// Largest shape handled in one piece; larger shapes are split.
pub(crate) const MAX_PIECE_SHAPE: f64 = 4.0;

/// Crossing points of the two envelope kernels for h = 1.0, 1.1, …, 4.0.
///
/// Putting the truncation point at the crossing minimises the envelope mass. At h = 1 it
/// reduces to Devroye's 2/π.
const TRUNCATION_POINTS: [f64; 31] = [
    0.636_619_772_367_581,
    0.905_374_715_309_092,
    1.069_894_095_924_063,
    1.208_146_526_907_771,
    1.334_862_802_111_883,
    1.455_210_792_628_165,
    1.571_585_970_298_823,
    1.685_283_621_232_403,
    1.797_077_062_227_413,
    1.907_461_251_754_365,
    2.016_769_838_470_432,
    2.125_236_971_587_058,
    2.233_032_361_568_906,
    2.340_282_317_538_787,
    2.447_082_957_135_889,
    2.553_508_818_745_968,
    2.659_618_656_593_171,
    2.765_459_446_923_030,
    2.871_069_222_941_618,
    2.976_479_122_316_283,
    3.081_714_892_842_458,
    3.186_798_017_550_476,
    3.291_746_567_597_067,
    3.396_575_857_225_198,
    3.501_298_952_662_527,
    3.605_927_071_780_825,
    3.710_469_901_051_300,
    3.814_935_849_180_528,
    3.919_332_251_766_850,
    4.023_665_537_708_225,
    4.127_941_365_477_644,
];
const TRUNCATION_STEP: f64 = 0.1;

/// Windle's alternate exact sampler for PG(h, z), `1 <= h <= 4`.
///
/// Works on the Jacobi variable J*(h, c) with `c = |z|/2`, whose density is the alternating
/// series
///
/// ```text
/// f(x | h) = Σ_n (-1)^n a_n(x | h),
/// a_n(x | h) = 2^h · Γ(n + h) / (Γ(h) n!) · (2n + h) / √(2πx³) · exp(-(2n + h)² / 2x)
/// ```
///
/// exponentially tilted by `cosh^h(c)·e^{-c²x/2}`. The envelope is `a_0` on `(0, t]` (an
/// inverse Gaussian kernel once tilted) and `(π/2)^h x^{h-1} e^{-π²x/8} / Γ(h)` on `(t, ∞)`
/// (a gamma kernel once tilted). Candidates are accepted or rejected by the partial sums of
/// the series, but only once its terms have started to decrease: the ratio
/// `a_{n+1}/a_n` falls with `n`, so from then on every partial sum bounds the density.
#[derive(Debug, Clone)]
pub(crate) struct AlternateEnvelope {
    shape: f64,
    half_tilt: f64,
    truncation: f64,
    /// π²/8 + c²/2, the rate of the gamma piece.
    rate: f64,
    /// Probability of proposing from the gamma piece.
    right_mass: f64,
    /// h·ln 2 − ½·ln 2π
    log_coef_scale: f64,
    ln_gamma_shape: f64,
}

impl AlternateEnvelope {
    pub(crate) fn new(shape: f64, tilt: f64) -> Self {
        debug_assert!((1.0..=MAX_PIECE_SHAPE).contains(&shape), "shape {shape}");
        let half_tilt = 0.5 * tilt.abs();
        let truncation = truncation_point(shape);
        let rate = PI_SQ_8 + 0.5 * half_tilt * half_tilt;

        // Left piece: 2^h e^{-hc} times the IG(h/c, h²) mass on (0, t].
        let sqrt_trunc = truncation.sqrt();
        let upper = (truncation * half_tilt - shape) / sqrt_trunc;
        let lower = -(truncation * half_tilt + shape) / sqrt_trunc;
        let log_left = shape * LN_2
            + log_add_exp(
                -shape * half_tilt + log_norm_cdf(upper),
                shape * half_tilt + log_norm_cdf(lower),
            );
        // Right piece: (π/2)^h λ^{-h} Q(h, λt).
        let log_right =
            shape * (FRAC_PI_2.ln() - rate.ln()) + gamma_ur(shape, rate * truncation).ln();

        Self {
            shape,
            half_tilt,
            truncation,
            rate,
            right_mass: logistic_complement(log_left - log_right),
            log_coef_scale: shape * LN_2 - LN_SQRT_2PI,
            ln_gamma_shape: ln_gamma(shape),
        }
    }

    /// Draw one PG(h, z) variate, or report that a safety cap was reached.
    pub(crate) fn draw<B: BitSource + ?Sized>(
        &self,
        bits: &mut B,
        config: &SamplerConfig,
    ) -> Result<f64, NumericalStall> {
        let h = self.shape;
        'proposal: for _ in 0..config.max_proposals {
            let from_right = bits.uniform() < self.right_mass;
            let x = if from_right {
                sample_trunc_gamma(bits, h, self.rate, self.truncation)
            } else {
                sample_trunc_inv_gauss(bits, h, self.half_tilt, self.truncation)
            };
            let log_x = x.ln();

            let first = self.coefficient(0, x, log_x, 0.0);
            let bound = if from_right {
                self.gamma_kernel(x, log_x)
            } else {
                first
            };
            let threshold = bits.uniform() * bound;

            let mut series_sum = first;
            let mut previous = first;
            // ln(Γ(n + h) / (Γ(h) n!))
            let mut log_weight = 0.0;
            for n in 1..=config.max_series_terms {
                let nf = n as f64;
                log_weight += (nf - 1.0 + h).ln() - nf.ln();
                let term = self.coefficient(n, x, log_x, log_weight);
                let decreasing = term <= previous;
                if n % 2 == 1 {
                    series_sum -= term;
                    if decreasing && threshold <= series_sum {
                        return Ok(0.25 * x);
                    }
                } else {
                    series_sum += term;
                    if decreasing && threshold > series_sum {
                        continue 'proposal;
                    }
                }
                previous = term;
            }
            return Err(NumericalStall {
                sampler: Sampler::Alternate,
                limit: config.max_series_terms,
            });
        }
        Err(NumericalStall {
            sampler: Sampler::Alternate,
            limit: config.max_proposals,
        })
    }

    /// `a_n(x | h)` given `ln(Γ(n + h) / (Γ(h) n!))`.
    #[inline]
    fn coefficient(&self, n: usize, x: f64, log_x: f64, log_weight: f64) -> f64 {
        let a = 2.0 * n as f64 + self.shape;
        (self.log_coef_scale + log_weight + a.ln() - 1.5 * log_x - 0.5 * a * a / x).exp()
    }

    /// Dominating kernel on the right piece.
    #[inline]
    fn gamma_kernel(&self, x: f64, log_x: f64) -> f64 {
        let h = self.shape;
        (h * FRAC_PI_2.ln() + (h - 1.0) * log_x - PI_SQ_8 * x - self.ln_gamma_shape).exp()
    }
}

/// Linear interpolation in [`TRUNCATION_POINTS`].
fn truncation_point(shape: f64) -> f64 {
    let pos = ((shape - 1.0) / TRUNCATION_STEP).clamp(0.0, (TRUNCATION_POINTS.len() - 1) as f64);
    let i = (pos as usize).min(TRUNCATION_POINTS.len() - 2);
    let frac = pos - i as f64;
    TRUNCATION_POINTS[i] + frac * (TRUNCATION_POINTS[i + 1] - TRUNCATION_POINTS[i])
}
