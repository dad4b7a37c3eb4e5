use crate::{
    config::SamplerConfig,
    error::NumericalStall,
    math::{PI_SQ, PI_SQ_8, log_add_exp, log_norm_cdf, logistic_complement},
    method::Sampler,
    rng::{BitSource, sample_trunc_inv_gauss},
};
use std::f64::consts::{FRAC_2_PI, PI};

/// Truncation point separating the two pieces of the Jacobi density.
const TRUNC: f64 = FRAC_2_PI;

/// Devroye's exact sampler for PG(1, z).
///
/// This is Algorithm 1 of Polson, Scott & Windle (2013), following Devroye (2009): the
/// Jacobi density J*(1, z/2) is bounded by a mixture of a truncated inverse Gaussian on
/// `(0, 2/π]` and a shifted exponential on `(2/π, ∞)`, and each candidate is accepted or
/// rejected by walking the alternating series of the density until a partial sum decides.
#[derive(Debug, Clone)]
pub(crate) struct DevroyeEnvelope {
    half_tilt: f64,
    /// π²/8 + c²/2, the rate of the exponential piece.
    rate: f64,
    /// Probability of proposing from the exponential piece.
    exp_mass: f64,
}

impl DevroyeEnvelope {
    pub(crate) fn new(tilt: f64) -> Self {
        let half_tilt = 0.5 * tilt.abs();
        let rate = PI_SQ_8 + 0.5 * half_tilt * half_tilt;
        Self {
            half_tilt,
            rate,
            exp_mass: exponential_tail_mass(half_tilt, rate),
        }
    }

    /// Draw one PG(1, z) variate, or report that a safety cap was reached.
    pub(crate) fn draw<B: BitSource + ?Sized>(
        &self,
        bits: &mut B,
        config: &SamplerConfig,
    ) -> Result<f64, NumericalStall> {
        'proposal: for _ in 0..config.max_proposals {
            let proposal = if bits.uniform() < self.exp_mass {
                TRUNC + bits.exponential() / self.rate
            } else {
                sample_trunc_inv_gauss(bits, 1.0, self.half_tilt, TRUNC)
            };

            let mut series_sum = series_coefficient(0, proposal);
            let threshold = bits.uniform() * series_sum;

            for term_index in 1..=config.max_series_terms {
                let term = series_coefficient(term_index, proposal);
                if term_index % 2 == 1 {
                    series_sum -= term;
                    if threshold <= series_sum {
                        return Ok(0.25 * proposal);
                    }
                } else {
                    series_sum += term;
                    if threshold > series_sum {
                        continue 'proposal;
                    }
                }
            }
            return Err(NumericalStall {
                sampler: Sampler::Devroye,
                limit: config.max_series_terms,
            });
        }
        Err(NumericalStall {
            sampler: Sampler::Devroye,
            limit: config.max_proposals,
        })
    }
}

/// Probability that a proposal comes from the exponential piece, `p / (p + q)`.
///
/// With `K = π²/8 + c²/2`, the exponential piece carries mass `p = π/(2K)·e^{-Kt}` and the
/// inverse Gaussian piece `q = 2·(e^{-c}Φ(a) + e^{c}Φ(b))`. Both are combined in log space
/// so that large tilts neither overflow nor lose the smaller term.
fn exponential_tail_mass(half_tilt: f64, rate: f64) -> f64 {
    let sqrt_trunc = TRUNC.sqrt();
    let upper = (TRUNC * half_tilt - 1.0) / sqrt_trunc;
    let lower = -(TRUNC * half_tilt + 1.0) / sqrt_trunc;

    let log_ig_mass = log_add_exp(
        -half_tilt + log_norm_cdf(upper),
        half_tilt + log_norm_cdf(lower),
    );
    // ln(q/p)
    let log_ratio = (4.0 / PI).ln() + rate.ln() + rate * TRUNC + log_ig_mass;
    logistic_complement(log_ratio)
}

/// The n-th coefficient of the alternating series for the J*(1) density at `x`.
///
/// Left of the truncation point it is `πk·(2/(πx))^{3/2}·e^{-2k²/x}`, right of it
/// `πk·e^{-k²π²x/2}`, with `k = n + ½` (equations 15 and 16 of Polson et al.). Both
/// sequences decrease in `n` on their own piece, which is what makes the squeeze valid.
fn series_coefficient(n: usize, x: f64) -> f64 {
    let k = n as f64 + 0.5;
    if x <= 0.0 {
        0.0
    } else if x <= TRUNC {
        ((PI * k).ln() + 1.5 * (FRAC_2_PI / x).ln() - 2.0 * k * k / x).exp()
    } else {
        PI * k * (-0.5 * k * k * PI_SQ * x).exp()
    }
}
